//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};

/// JSON body accepted by create and update. Multipart forms carry the same
/// field names, plus the `image` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub likes: Option<CountValue>,
    pub comments: Option<CountValue>,
}

/// A count sent either as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountValue {
    Number(i64),
    Text(String),
}

impl CountValue {
    pub fn into_text(self) -> String {
        match self {
            CountValue::Number(n) => n.to_string(),
            CountValue::Text(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accept_numbers_and_text() {
        let req: PostRequest =
            serde_json::from_str(r#"{"title":"t","likes":4,"comments":"7"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("t"));
        assert_eq!(req.likes.map(CountValue::into_text).as_deref(), Some("4"));
        assert_eq!(req.comments.map(CountValue::into_text).as_deref(), Some("7"));
        assert!(req.author.is_none());
    }

    #[test]
    fn test_empty_object_is_empty_request() {
        let req: PostRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none() && req.likes.is_none());
    }
}
