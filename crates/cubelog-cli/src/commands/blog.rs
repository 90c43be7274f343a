//! Blog commands for CLI.

use clap::Subcommand;
use cubelog_core::blog::{all_tags, filter_posts, parse_tags};
use cubelog_core::{Config, Database, Post, PostEdit, PostFilter, ValidationError};

use super::CmdResult;

#[derive(Subcommand)]
pub enum BlogAction {
    /// Write a new post
    Add {
        /// Post title
        title: String,
        /// Category (default: blog.default_category)
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
        /// Markdown body
        #[arg(long, default_value = "")]
        content: String,
        /// Hide the post from default listings
        #[arg(long)]
        private: bool,
    },
    /// Edit a post
    Edit {
        /// Post ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags (replaces existing)
        #[arg(long)]
        tags: Option<String>,
        /// New body
        #[arg(long)]
        content: Option<String>,
        /// Set privacy
        #[arg(long)]
        private: Option<bool>,
    },
    /// List posts, newest first
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
        /// Include private posts
        #[arg(long)]
        private: bool,
    },
    /// Show one post
    Show {
        /// Post ID
        id: i64,
    },
    /// Delete a post
    Delete {
        /// Post ID
        id: i64,
    },
    /// List every tag in use
    Tags,
}

pub fn run(action: BlogAction) -> CmdResult {
    let db = Database::open()?;

    match action {
        BlogAction::Add {
            title,
            category,
            tags,
            content,
            private,
        } => {
            let category =
                category.unwrap_or_else(|| Config::load_or_default().blog.default_category);
            let mut post = Post::new(&title, &category, parse_tags(&tags), &content, private)?;
            post.id = db.add_post(&post)?;
            println!("Post created: {}", post.id);
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
        BlogAction::Edit {
            id,
            title,
            category,
            tags,
            content,
            private,
        } => {
            let mut post = db
                .get_post(id)?
                .ok_or(ValidationError::NotFound { kind: "post", id })?;
            post.apply(PostEdit {
                title,
                category,
                tags: tags.as_deref().map(parse_tags),
                content,
                is_private: private,
            })?;
            db.update_post(&post)?;
            println!("Post updated: {id}");
        }
        BlogAction::List {
            category,
            tag,
            private,
        } => {
            let posts = db.list_posts()?;
            let filter = PostFilter {
                category,
                tag,
                show_private: private || Config::load_or_default().blog.show_private,
            };
            println!("{}", serde_json::to_string_pretty(&filter_posts(&posts, &filter))?);
        }
        BlogAction::Show { id } => {
            let post = db
                .get_post(id)?
                .ok_or(ValidationError::NotFound { kind: "post", id })?;
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
        BlogAction::Delete { id } => {
            if !db.delete_post(id)? {
                return Err(ValidationError::NotFound { kind: "post", id }.into());
            }
            println!("Post deleted: {id}");
        }
        BlogAction::Tags => {
            let posts = db.list_posts()?;
            println!("{}", serde_json::to_string_pretty(&all_tags(&posts))?);
        }
    }
    Ok(())
}
