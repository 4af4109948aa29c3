//! Content loader - loads posts from the posts directory

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post, PostCollection, PostId};
use crate::error::ContentError;
use crate::Site;

/// Loads posts from `<source>/_posts`
pub struct ContentLoader<'a> {
    site: &'a Site,
    extensions: Vec<String>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            extensions: site.config.markdown_extensions(),
        }
    }

    /// Markdown files under the posts directory, in path order
    pub fn post_files(&self) -> Vec<PathBuf> {
        if !self.site.posts_dir.exists() {
            return Vec::new();
        }

        WalkDir::new(&self.site.posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|path| path.is_file() && self.is_markdown_file(path))
            .collect()
    }

    /// Load every post into a collection
    ///
    /// Unreadable or undated files are skipped with a warning; two files
    /// resolving to the same identifier are an error.
    pub fn load_posts(&self) -> Result<PostCollection, ContentError> {
        let mut posts = PostCollection::new();

        for path in self.post_files() {
            let (id, post) = match self.load_post(&path) {
                Ok(loaded) => loaded,
                Err(e) => {
                    tracing::warn!("Skipping post {:?}: {}", path, e);
                    continue;
                }
            };

            if !self.is_published(&post) {
                tracing::debug!("Skipping unpublished post {}", id);
                continue;
            }

            posts.add_post(id, post)?;
        }

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.site.posts_dir);
        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<(PostId, Post), ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) =
            FrontMatter::parse(&content).map_err(|e| ContentError::InvalidFrontMatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let id = PostId::new(stem)?;

        // Front-matter date wins over the filename date
        let published_date = fm
            .parse_date()
            .or_else(|| id.date())
            .ok_or_else(|| ContentError::MissingDate(path.to_path_buf()))?;

        // Untitled posts take their title from the slug
        let title = fm.title.unwrap_or_else(|| title_from_slug(id.slug()));

        let mut extra = fm.extra;
        if !fm.published {
            extra.insert("published".to_string(), serde_yaml::Value::Bool(false));
        }

        let post = Post {
            title,
            layout: fm
                .layout
                .unwrap_or_else(|| self.site.config.default_layout.clone()),
            published_date,
            body: body.to_string(),
            source: Some(path.to_path_buf()),
            extra,
        };

        Ok((id, post))
    }

    /// Whether the post is visible under the current config
    pub fn is_published(&self, post: &Post) -> bool {
        self.site.config.unpublished
            || post.extra.get("published") != Some(&serde_yaml::Value::Bool(false))
    }

    /// Check if a file has one of the configured markdown extensions
    fn is_markdown_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|ext| ext.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

/// "react-file-structure" -> "React file structure"
fn title_from_slug(slug: &str) -> String {
    let words = slug.replace(['-', '_'], " ");
    let mut chars = words.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
