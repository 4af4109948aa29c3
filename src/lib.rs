//! postshelf: author and audit a Jekyll-style collection of blog posts
//!
//! Posts live as markdown files under `_posts/`, named `YYYY-MM-DD-slug.md`,
//! each with a YAML front-matter header. This crate loads them into a
//! [`content::PostCollection`] keyed by identifier; rendering them to HTML is
//! left to the static-site generator that consumes the same files.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::{CollectionError, ContentError};

/// A site on disk
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Posts directory
    pub posts_dir: PathBuf,
}

impl Site {
    /// Open a site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source);
        let posts_dir = source_dir.join(&config.posts_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            posts_dir,
        })
    }

    /// Load every post of the site
    pub fn load_posts(&self) -> Result<content::PostCollection> {
        Ok(content::loader::ContentLoader::new(self).load_posts()?)
    }
}
