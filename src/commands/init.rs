//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("_posts"))?;
    fs::create_dir_all(target_dir.join("img"))?;

    let config_content = r#"# Site settings
title: My Blog
description: ''
author: ''

# URL
url: ''
baseurl: ''

# Writing
posts_dir: _posts
default_layout: post
new_post_name: ":year-:month-:day-:title.md"
markdown_ext: markdown,mkdown,mkdn,mkd,md
excerpt_separator: "\n\n"
unpublished: false
"#;
    fs::write(&config_path, config_content)?;

    let today = chrono::Local::now().date_naive();
    let sample_post = r#"---
layout: post
title: Welcome
---

This is your first post. Posts live in `_posts/` and are named
`YEAR-MONTH-DAY-slug.md`.

```bash
$ postshelf new "My New Post"
```

Images are referenced relative to the site base URL:

![Placeholder]({{ site.baseurl }}/img/placeholder.png)
"#;
    let post_path = target_dir
        .join("_posts")
        .join(format!("{}-welcome.md", today.format("%Y-%m-%d")));
    fs::write(&post_path, sample_post)?;
    tracing::debug!("Wrote sample post {:?}", post_path);

    Ok(())
}
