//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    /// Copies owned by the library (at least 1)
    pub total_copies: i32,
    /// Copies currently on the shelf
    pub available_copies: i32,
    pub added_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(
        required(message = "Title and author are required"),
        length(min = 1, message = "Title and author are required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Title and author are required"),
        length(min = 1, message = "Title and author are required")
    )]
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    /// Defaults to 1
    #[validate(range(min = 1, message = "totalCopies must be at least 1"))]
    pub total_copies: Option<i32>,
    /// Defaults to totalCopies
    #[validate(range(min = 0, message = "availableCopies cannot be negative"))]
    pub available_copies: Option<i32>,
}

impl CreateBook {
    /// Resolved `(total, available)` copy counts
    pub fn copies(&self) -> (i32, i32) {
        let total = self.total_copies.unwrap_or(1);
        (total, self.available_copies.unwrap_or(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: Option<&str>, author: Option<&str>) -> CreateBook {
        CreateBook {
            title: title.map(str::to_string),
            author: author.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_copies_defaults() {
        let mut book = request(Some("Dune"), Some("Herbert"));
        assert_eq!(book.copies(), (1, 1));

        book.total_copies = Some(4);
        assert_eq!(book.copies(), (4, 4));

        book.available_copies = Some(2);
        assert_eq!(book.copies(), (4, 2));
    }

    #[test]
    fn test_title_and_author_required() {
        assert!(request(Some("Dune"), Some("Herbert")).validate().is_ok());
        assert!(request(None, Some("Herbert")).validate().is_err());
        assert!(request(Some("Dune"), None).validate().is_err());
        assert!(request(Some(""), Some("Herbert")).validate().is_err());
    }

    #[test]
    fn test_copy_ranges() {
        let mut book = request(Some("Dune"), Some("Herbert"));
        book.total_copies = Some(0);
        assert!(book.validate().is_err());

        book.total_copies = Some(2);
        book.available_copies = Some(-1);
        assert!(book.validate().is_err());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let book: CreateBook = serde_json::from_str(
            r#"{"title":"Dune","author":"Herbert","totalCopies":3,"availableCopies":1}"#,
        )
        .unwrap();
        assert_eq!(book.copies(), (3, 1));
    }
}
