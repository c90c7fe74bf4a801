//! Member model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Library member
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    /// Unique across members
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Inactive members cannot borrow
    pub is_active: bool,
    pub join_date: DateTime<Utc>,
}

/// Create member request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMember {
    #[validate(
        required(message = "Name and email are required"),
        length(min = 1, message = "Name and email are required")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Name and email are required"),
        length(min = 1, message = "Name and email are required")
    )]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_email_required() {
        let member = CreateMember {
            name: Some("Ada".into()),
            email: Some("ada@example.org".into()),
            ..Default::default()
        };
        assert!(member.validate().is_ok());

        let missing_email = CreateMember {
            name: Some("Ada".into()),
            ..Default::default()
        };
        assert!(missing_email.validate().is_err());
    }
}
