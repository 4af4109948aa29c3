//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub baseurl: String,

    // Directory
    pub source: String,
    pub posts_dir: String,

    // Writing
    pub default_layout: String,
    pub new_post_name: String,
    pub markdown_ext: String,
    pub excerpt_separator: String,
    /// Include posts marked `published: false`
    pub unpublished: bool,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: String::new(),

            url: String::new(),
            baseurl: String::new(),

            source: ".".to_string(),
            posts_dir: "_posts".to_string(),

            default_layout: "post".to_string(),
            new_post_name: ":year-:month-:day-:title.md".to_string(),
            markdown_ext: "markdown,mkdown,mkdn,mkd,md".to_string(),
            excerpt_separator: "\n\n".to_string(),
            unpublished: false,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        // An empty _config.yml is valid
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// File extensions treated as markdown, lowercased and without dots
    pub fn markdown_extensions(&self) -> Vec<String> {
        self.markdown_ext
            .split(',')
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }
}
