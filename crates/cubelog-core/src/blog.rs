//! Training blog posts.
//!
//! Posts are markdown text with a category, free-form tags and a privacy
//! flag. Rendering the markdown is left to whatever displays the post.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A blog post as stored and exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_private: bool,
    /// RFC 3339 creation time.
    #[serde(default)]
    pub date: String,
    /// Epoch milliseconds, used for ordering.
    #[serde(default)]
    pub timestamp: i64,
}

impl Post {
    /// New post stamped with the current time.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyField`] if the title is blank.
    pub fn new(
        title: &str,
        category: &str,
        tags: Vec<String>,
        content: &str,
        is_private: bool,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        let now = Utc::now();
        Ok(Self {
            id: 0,
            title: title.to_string(),
            category: category.trim().to_string(),
            tags,
            content: content.to_string(),
            is_private,
            date: now.to_rfc3339(),
            timestamp: now.timestamp_millis(),
        })
    }
}

/// Partial update applied by [`Post::apply`].
#[derive(Debug, Clone, Default)]
pub struct PostEdit {
    pub title: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub content: Option<String>,
    pub is_private: Option<bool>,
}

impl Post {
    /// Apply an edit in place. Date and ordering are left untouched.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyField`] if the edit blanks the title.
    pub fn apply(&mut self, edit: PostEdit) -> Result<(), ValidationError> {
        if let Some(title) = edit.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(ValidationError::EmptyField("title"));
            }
            self.title = title.to_string();
        }
        if let Some(category) = edit.category {
            self.category = category.trim().to_string();
        }
        if let Some(tags) = edit.tags {
            self.tags = tags;
        }
        if let Some(content) = edit.content {
            self.content = content;
        }
        if let Some(is_private) = edit.is_private {
            self.is_private = is_private;
        }
        Ok(())
    }
}

/// Split a comma-separated tag list, dropping blanks.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Blog list filter. `None` means "all".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub show_private: bool,
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category) = &self.category {
            if &post.category != category {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !post.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        self.show_private || !post.is_private
    }
}

/// Posts passing `filter`, in their given order.
pub fn filter_posts<'a>(posts: &'a [Post], filter: &PostFilter) -> Vec<&'a Post> {
    posts.iter().filter(|p| filter.matches(p)).collect()
}

/// Every distinct tag, in first-seen order.
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in posts.iter().flat_map(|p| &p.tags) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Sort newest first.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
