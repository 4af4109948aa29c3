//! Audit the posts directory

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::content::loader::ContentLoader;
use crate::content::{PostBody, PostCollection, PostId};
use crate::error::{CollectionError, ContentError};
use crate::helpers::asset_path;
use crate::Site;

/// Something wrong with a post file
#[derive(Debug)]
pub enum Problem {
    /// Two files resolve to the same identifier
    Duplicate {
        id: PostId,
        first: PathBuf,
        second: PathBuf,
    },
    /// The file could not be loaded as a post
    Unloadable { path: PathBuf, error: ContentError },
    /// An image the post references is not under the source directory
    MissingAsset {
        id: PostId,
        src: String,
        expected: PathBuf,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Duplicate { id, first, second } => write!(
                f,
                "duplicate identifier {}: {:?} and {:?}",
                id, first, second
            ),
            Problem::Unloadable { path, error } => write!(f, "{:?}: {}", path, error),
            Problem::MissingAsset { id, src, expected } => {
                write!(f, "{}: image {} not found at {:?}", id, src, expected)
            }
        }
    }
}

/// Outcome of a check
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Posts that loaded and are published, as `list` shows them
    pub posts: usize,
    pub problems: Vec<Problem>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Load every post strictly and collect what is wrong
pub fn check_site(site: &Site) -> Result<CheckReport> {
    let loader = ContentLoader::new(site);
    let mut posts = PostCollection::new();
    let mut sources: HashMap<PostId, PathBuf> = HashMap::new();
    let mut report = CheckReport::default();

    for path in loader.post_files() {
        let (id, post) = match loader.load_post(&path) {
            Ok(loaded) => loaded,
            Err(error) => {
                report.problems.push(Problem::Unloadable { path, error });
                continue;
            }
        };

        if !loader.is_published(&post) {
            tracing::debug!("Not checking unpublished post {}", id);
            continue;
        }

        let body = PostBody::inspect(&post.body, &site.config.excerpt_separator);
        for img in &body.images {
            if let Some(relative) = asset_path(&site.config, &img.src) {
                let expected = site.source_dir.join(&relative);
                if !expected.exists() {
                    report.problems.push(Problem::MissingAsset {
                        id: id.clone(),
                        src: img.src.clone(),
                        expected,
                    });
                }
            }
        }

        match posts.add_post(id, post) {
            Ok(id) => {
                sources.insert(id, path);
            }
            Err(CollectionError::DuplicateIdentifier(id)) => {
                let first = sources.get(&id).cloned().unwrap_or_default();
                report.problems.push(Problem::Duplicate {
                    id,
                    first,
                    second: path,
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    report.posts = posts.len();
    Ok(report)
}

/// Run the check and print the report; returns whether the site is clean
pub fn run(site: &Site) -> Result<bool> {
    let report = check_site(site)?;

    for problem in &report.problems {
        tracing::warn!("{}", problem);
    }
    println!(
        "Checked {} posts: {} problem(s)",
        report.posts,
        report.problems.len()
    );

    Ok(report.is_clean())
}
