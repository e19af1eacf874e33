use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Status assigned on create when the payload omits one
pub const DEFAULT_STATUS: &str = "NEW";

/// Status written by the batch processor
pub const PROCESSED_STATUS: &str = "PROCESSED";

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// A stored item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = "A small widget")]
    pub description: String,
    /// Free-form status, `PROCESSED` once the batch processor has run
    #[schema(example = "NEW")]
    pub status: String,
    #[schema(example = "owner@example.com")]
    pub email: String,
}

impl Item {
    /// Apply the fields present in `update`.
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }

    pub fn mark_processed(&mut self) {
        self.status = PROCESSED_STATUS.to_string();
    }

    pub fn is_processed(&self) -> bool {
        self.status == PROCESSED_STATUS
    }
}

/// Payload for creating an item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 256))]
    #[schema(example = "Widget")]
    pub name: String,

    #[validate(length(min = 1, max = 256))]
    #[schema(example = "A small widget")]
    pub description: String,

    #[serde(default = "default_status")]
    #[validate(length(min = 1, max = 256))]
    #[schema(default = "NEW", example = "NEW")]
    pub status: String,

    #[validate(email, length(max = 256))]
    #[schema(example = "owner@example.com")]
    pub email: String,
}

impl CreateItem {
    /// Payload with the default status.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: default_status(),
            email: email.into(),
        }
    }
}

/// Partial update; absent fields keep their stored value.
///
/// The identifier always comes from the request path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub status: Option<String>,

    #[validate(email, length(max = 256))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item {
            id: 7,
            name: "Widget".to_string(),
            description: "A small widget".to_string(),
            status: DEFAULT_STATUS.to_string(),
            email: "owner@example.com".to_string(),
        }
    }

    #[test]
    fn test_create_item_defaults_status() {
        let input: CreateItem = serde_json::from_value(serde_json::json!({
            "name": "Widget",
            "description": "A small widget",
            "email": "owner@example.com"
        }))
        .unwrap();

        assert_eq!(input.status, "NEW");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_item_validation() {
        let mut input = CreateItem::new("Widget", "A small widget", "not-an-email");
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        input.email = "owner@example.com".to_string();
        input.name = "x".repeat(257);
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        input.name = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_item_validates_present_fields_only() {
        assert!(UpdateItem::default().validate().is_ok());

        let update = UpdateItem {
            email: Some("broken".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_apply_update_keeps_absent_fields() {
        let mut item = item();
        item.apply_update(UpdateItem {
            name: Some("Gadget".to_string()),
            ..Default::default()
        });

        assert_eq!(item.id, 7);
        assert_eq!(item.name, "Gadget");
        assert_eq!(item.description, "A small widget");
        assert_eq!(item.status, "NEW");
    }

    #[test]
    fn test_mark_processed() {
        let mut item = item();
        assert!(!item.is_processed());
        item.mark_processed();
        assert!(item.is_processed());
        assert_eq!(item.status, PROCESSED_STATUS);
    }
}
