//! Post collection keyed by unique identifier

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::str::FromStr;

use super::{Post, PostId};
use crate::error::CollectionError;

/// Field a listing is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Title,
    Id,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "title" => Ok(SortKey::Title),
            "id" | "name" => Ok(SortKey::Id),
            other => Err(format!("unknown sort key: {} (expected date, title or id)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// All posts of a site, keyed by [`PostId`]
///
/// Iteration follows insertion order, which carries no meaning; callers that
/// care about order ask for [`PostCollection::list_sorted`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostCollection {
    posts: IndexMap<PostId, Post>,
}

impl PostCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new post
    ///
    /// Fails with [`CollectionError::DuplicateIdentifier`] when `id` is taken;
    /// the collection is left untouched in that case.
    pub fn add_post(&mut self, id: PostId, post: Post) -> Result<PostId, CollectionError> {
        match self.posts.entry(id) {
            Entry::Occupied(entry) => Err(CollectionError::DuplicateIdentifier(entry.key().clone())),
            Entry::Vacant(entry) => {
                let id = entry.key().clone();
                tracing::debug!("Registered post {}", id);
                entry.insert(post);
                Ok(id)
            }
        }
    }

    /// Look up a post by identifier
    pub fn get_post(&self, id: &str) -> Result<&Post, CollectionError> {
        self.posts
            .get(id)
            .ok_or_else(|| CollectionError::NotFound(PostId::unchecked(id)))
    }

    /// All posts with their identifiers
    pub fn list_posts(&self) -> impl Iterator<Item = (&PostId, &Post)> + '_ {
        self.posts.iter()
    }

    /// All posts sorted by `key`; ties break on the identifier
    pub fn list_sorted(&self, key: SortKey, order: Order) -> Vec<(&PostId, &Post)> {
        let mut posts: Vec<_> = self.posts.iter().collect();
        posts.sort_by(|(a_id, a), (b_id, b)| {
            let primary = match key {
                SortKey::Date => a.published_date.cmp(&b.published_date),
                SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                SortKey::Id => Ordering::Equal,
            };
            let ordering = primary.then_with(|| a_id.cmp(b_id));
            match order {
                Order::Ascending => ordering,
                Order::Descending => ordering.reverse(),
            }
        });
        posts
    }

    pub fn contains(&self, id: &str) -> bool {
        self.posts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
