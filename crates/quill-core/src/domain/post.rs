use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - a blog post with an optional image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub author: String,
    pub category: String,
    /// Relative URL of the stored image, empty when none was uploaded.
    pub image: String,
    pub likes: i64,
    pub comments: i64,
}

/// Post fields as submitted by a client. Every field is optional here;
/// [`Post::create`] decides which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub likes: Option<String>,
    pub comments: Option<String>,
    /// Set from an accepted upload only, never from a text field.
    pub image: Option<String>,
}

impl PostFields {
    /// Assign a submitted text field by name.
    ///
    /// Returns `false` for names that are not post fields. `image` is one of
    /// them: it can only be set from a stored upload.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "content" => &mut self.content,
            "author" => &mut self.author,
            "category" => &mut self.category,
            "likes" => &mut self.likes,
            "comments" => &mut self.comments,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

impl Post {
    /// Create a new post, assigning its id and date.
    ///
    /// Fails when any of `title`, `content`, `author` or `category` is
    /// missing or empty, or when a count is not an integer.
    pub fn create(fields: PostFields) -> Result<Self, DomainError> {
        let mut missing = Vec::new();
        let title = required("title", fields.title, &mut missing);
        let content = required("content", fields.content, &mut missing);
        let author = required("author", fields.author, &mut missing);
        let category = required("category", fields.category, &mut missing);

        if !missing.is_empty() {
            let reasons: Vec<String> = missing
                .iter()
                .map(|field| format!("{field} is required"))
                .collect();
            return Err(DomainError::Validation(format!(
                "Post validation failed: {}",
                reasons.join(", ")
            )));
        }

        let likes = parse_count("likes", fields.likes.as_deref())?.unwrap_or(0);
        let comments = parse_count("comments", fields.comments.as_deref())?.unwrap_or(0);

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            date: Utc::now(),
            author,
            category,
            image: fields.image.unwrap_or_default(),
            likes,
            comments,
        })
    }

    /// Overwrite every field for which a truthy value was supplied.
    ///
    /// Empty text and a count of `0` count as "not supplied", so neither can
    /// be used to clear a field. Nothing is changed if a count fails to parse.
    pub fn apply(&mut self, fields: PostFields) -> Result<(), DomainError> {
        let likes = parse_count("likes", fields.likes.as_deref())?;
        let comments = parse_count("comments", fields.comments.as_deref())?;

        overwrite(&mut self.title, fields.title);
        overwrite(&mut self.content, fields.content);
        overwrite(&mut self.author, fields.author);
        overwrite(&mut self.category, fields.category);
        overwrite(&mut self.image, fields.image);

        if let Some(likes) = likes.filter(|n| *n != 0) {
            self.likes = likes;
        }
        if let Some(comments) = comments.filter(|n| *n != 0) {
            self.comments = comments;
        }

        Ok(())
    }
}

fn required(name: &'static str, value: Option<String>, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

fn overwrite(slot: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *slot = value;
    }
}

/// Parse a submitted count. Blank input is treated as absent.
fn parse_count(name: &str, raw: Option<&str>) -> Result<Option<i64>, DomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| DomainError::Validation(format!("{name} must be an integer"))),
    }
}
