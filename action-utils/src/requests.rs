use serde::{Deserialize, Serialize};

use crate::Category;

/// Body of `POST /api/items`.
///
/// `category` stays a raw string so the server can fall back to the default
/// instead of rejecting the request.
#[derive(Debug, Serialize, Deserialize, Clone, Default, schemars::JsonSchema)]
pub struct CreateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CreateItemRequest {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: Some(text.into()),
            category: Some(category.to_string()),
        }
    }
}

/// Body of `PUT /api/items/:id`. Absent fields are left untouched.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, schemars::JsonSchema)]
pub struct UpdateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateItemRequest {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.category.is_none() && self.completed.is_none()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, schemars::JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_omits_absent_fields() {
        let body = serde_json::to_value(UpdateItemRequest::completed(true)).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn test_update_request_ignores_immutable_fields() {
        let body = r#"{"id":"x","createdAt":"2020-01-01T00:00:00Z","text":"new"}"#;
        let request: UpdateItemRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request, UpdateItemRequest::text("new"));
    }
}
