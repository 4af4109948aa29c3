//! Create a new post

use anyhow::{bail, Result};
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::ContentLoader;
use crate::Site;

/// Create a new post file and return its path
pub fn create_post(
    site: &Site,
    title: &str,
    layout: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<PathBuf> {
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let layout = layout.unwrap_or(&site.config.default_layout);
    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    let filename = site
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &date.format("%Y").to_string())
        .replace(":month", &date.format("%m").to_string())
        .replace(":day", &date.format("%d").to_string())
        .replace(":i_month", &date.format("%-m").to_string())
        .replace(":i_day", &date.format("%-d").to_string());
    let file_path = site.posts_dir.join(&filename);

    // The identifier is the file stem, whatever the extension
    let stem = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let taken = ContentLoader::new(site)
        .post_files()
        .into_iter()
        .find(|p| p.file_stem().and_then(|s| s.to_str()) == Some(stem.as_str()));
    if let Some(existing) = taken {
        bail!("Post {} already exists: {:?}", stem, existing);
    }
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let mut front_matter = IndexMap::new();
    front_matter.insert("layout", layout.to_string());
    front_matter.insert("title", title.to_string());
    front_matter.insert("date", date.format("%Y-%m-%d").to_string());
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front_matter)?);

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    tracing::info!("Created post {}", stem);

    Ok(file_path)
}
