//! List posts

use anyhow::Result;
use serde_json::json;

use crate::content::{Order, SortKey};
use crate::Site;

/// List posts sorted by `sort`
pub fn run(site: &Site, sort: SortKey, reverse: bool, as_json: bool) -> Result<()> {
    let posts = site.load_posts()?;
    let order = if reverse {
        Order::Descending
    } else {
        Order::Ascending
    };
    let listing = posts.list_sorted(sort, order);

    if as_json {
        let entries: Vec<_> = listing
            .iter()
            .map(|(id, post)| {
                json!({
                    "id": id,
                    "title": post.title,
                    "layout": post.layout,
                    "date": post.published_date,
                    "source": post.source,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Posts ({}):", listing.len());
    for (id, post) in listing {
        println!(
            "  {} - {} [{}]",
            post.published_date.format("%Y-%m-%d"),
            post.title,
            id
        );
    }

    Ok(())
}
