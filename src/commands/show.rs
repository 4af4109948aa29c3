//! Show a single post

use anyhow::Result;
use serde_json::json;

use crate::content::PostBody;
use crate::helpers::resolve_asset;
use crate::Site;

/// Print a post's front-matter, excerpt, code snippets and images
pub fn run(site: &Site, id: &str, as_json: bool) -> Result<()> {
    let posts = site.load_posts()?;
    let post = posts.get_post(id)?;
    let body = PostBody::inspect(&post.body, &site.config.excerpt_separator);

    let images: Vec<_> = body
        .images
        .iter()
        .map(|img| (img, resolve_asset(&site.config, &img.src)))
        .collect();

    if as_json {
        let value = json!({
            "id": id.trim(),
            "post": post,
            "excerpt": body.excerpt,
            "snippets": body.snippets,
            "images": images
                .iter()
                .map(|(img, url)| json!({ "alt": img.alt, "src": img.src, "url": url }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", post.title);
    println!("  id:     {}", id.trim());
    println!("  date:   {}", post.published_date.format("%Y-%m-%d"));
    println!("  layout: {}", post.layout);
    if let Some(source) = &post.source {
        println!("  source: {}", source.display());
    }
    if let Some(excerpt) = &body.excerpt {
        println!();
        println!("{}", excerpt);
    }

    if !body.snippets.is_empty() {
        println!();
        println!("Snippets ({}):", body.snippets.len());
        for snippet in &body.snippets {
            println!(
                "  {} ({} lines)",
                snippet.lang.as_deref().unwrap_or("text"),
                snippet.code.lines().count()
            );
        }
    }

    if !images.is_empty() {
        println!();
        println!("Images ({}):", images.len());
        for (img, url) in &images {
            println!("  {} [{}]", url, img.alt);
        }
    }

    Ok(())
}
