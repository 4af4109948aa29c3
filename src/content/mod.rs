//! Content module - posts, their front-matter and the collection holding them

mod body;
mod collection;
mod frontmatter;
pub mod loader;
mod post;

pub use body::{CodeSnippet, ImageRef, PostBody};
pub use collection::{Order, PostCollection, SortKey};
pub use frontmatter::{parse_date_string, FrontMatter};
pub use post::{Post, PostId, DEFAULT_LAYOUT};
