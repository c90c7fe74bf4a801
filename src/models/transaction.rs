//! Borrow/return transaction model and related types

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{book::Book, member::Member};

/// Transaction lifecycle status
///
/// Only `Borrowed` and `Returned` are written by the circulation workflow.
/// `Overdue` and `Lost` are reserved for administrative tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Borrowed,
    Returned,
    Overdue,
    Lost,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Borrowed => "BORROWED",
            TransactionStatus::Returned => "RETURNED",
            TransactionStatus::Overdue => "OVERDUE",
            TransactionStatus::Lost => "LOST",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BORROWED" => Ok(TransactionStatus::Borrowed),
            "RETURNED" => Ok(TransactionStatus::Returned),
            "OVERDUE" => Ok(TransactionStatus::Overdue),
            "LOST" => Ok(TransactionStatus::Lost),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

// SQLx conversion for TransactionStatus (stored as TEXT)
impl sqlx::Type<Postgres> for TransactionStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for TransactionStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: &str = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for TransactionStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Transaction row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub book_id: Uuid,
    pub member_id: Uuid,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
    pub fine_amount: Decimal,
}

/// Transaction joined with its book and member
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub id: Uuid,
    pub book_id: Uuid,
    pub member_id: Uuid,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub fine_amount: Decimal,
    /// Still borrowed past the due date (computed, never persisted)
    pub is_overdue: bool,
    pub book: Book,
    pub member: Member,
}

/// Flat row of the transactions/books/members join
#[derive(Debug, FromRow)]
pub struct TransactionDetailsRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub member_id: Uuid,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: TransactionStatus,
    pub fine_amount: Decimal,
    pub book_title: String,
    pub book_author: String,
    pub book_isbn: Option<String>,
    pub book_genre: Option<String>,
    pub book_description: Option<String>,
    pub book_total_copies: i32,
    pub book_available_copies: i32,
    pub book_added_at: DateTime<Utc>,
    pub member_name: String,
    pub member_email: String,
    pub member_phone: Option<String>,
    pub member_address: Option<String>,
    pub member_is_active: bool,
    pub member_join_date: DateTime<Utc>,
}

impl TransactionDetailsRow {
    /// Assemble the joined record, evaluating overdue state at `now`
    pub fn into_details(self, now: DateTime<Utc>) -> TransactionDetails {
        TransactionDetails {
            is_overdue: crate::circulation::is_overdue(self.status, self.due_date, now),
            id: self.id,
            book_id: self.book_id,
            member_id: self.member_id,
            borrow_date: self.borrow_date,
            due_date: self.due_date,
            return_date: self.return_date,
            status: self.status,
            fine_amount: self.fine_amount,
            book: Book {
                id: self.book_id,
                title: self.book_title,
                author: self.book_author,
                isbn: self.book_isbn,
                genre: self.book_genre,
                description: self.book_description,
                total_copies: self.book_total_copies,
                available_copies: self.book_available_copies,
                added_at: self.book_added_at,
            },
            member: Member {
                id: self.member_id,
                name: self.member_name,
                email: self.member_email,
                phone: self.member_phone,
                address: self.member_address,
                is_active: self.member_is_active,
                join_date: self.member_join_date,
            },
        }
    }
}

/// Borrow request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    #[validate(required(message = "Book, member, and due date are required"))]
    pub book_id: Option<Uuid>,
    #[validate(required(message = "Book, member, and due date are required"))]
    pub member_id: Option<Uuid>,
    /// RFC 3339 timestamp, or a bare `YYYY-MM-DD` read as midnight UTC.
    /// The client is expected to send a future date; the server does not enforce it
    #[serde(default, deserialize_with = "deserialize_due_date")]
    #[validate(required(message = "Book, member, and due date are required"))]
    pub due_date: Option<DateTime<Utc>>,
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    parse_due_date(&raw).map(Some).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid dueDate `{}`, expected an RFC 3339 timestamp or YYYY-MM-DD",
            raw
        ))
    })
}

fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn row(status: TransactionStatus, due_date: DateTime<Utc>) -> TransactionDetailsRow {
        let now = Utc::now();
        TransactionDetailsRow {
            id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            borrow_date: now,
            due_date,
            return_date: None,
            status,
            fine_amount: Decimal::ZERO,
            book_title: "Dune".into(),
            book_author: "Frank Herbert".into(),
            book_isbn: None,
            book_genre: Some("Science fiction".into()),
            book_description: None,
            book_total_copies: 2,
            book_available_copies: 1,
            book_added_at: now,
            member_name: "Ada".into(),
            member_email: "ada@example.org".into(),
            member_phone: None,
            member_address: None,
            member_is_active: true,
            member_join_date: now,
        }
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [
            TransactionStatus::Borrowed,
            TransactionStatus::Returned,
            TransactionStatus::Overdue,
            TransactionStatus::Lost,
        ] {
            assert_eq!(status.as_str().parse::<TransactionStatus>(), Ok(status));
        }
        assert!("borrowed".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_into_details_inlines_book_and_member() {
        let now = Utc::now();
        let r = row(TransactionStatus::Borrowed, now + Duration::days(7));
        let (book_id, member_id) = (r.book_id, r.member_id);

        let details = r.into_details(now);
        assert_eq!(details.book.id, book_id);
        assert_eq!(details.member.id, member_id);
        assert_eq!(details.book.available_copies, 1);
        assert!(!details.is_overdue);
    }

    #[test]
    fn test_into_details_flags_overdue_loans() {
        let now = Utc::now();
        let details = row(TransactionStatus::Borrowed, now - Duration::hours(1)).into_details(now);
        assert!(details.is_overdue);

        let details = row(TransactionStatus::Returned, now - Duration::hours(1)).into_details(now);
        assert!(!details.is_overdue);
    }

    #[test]
    fn test_details_serialize_as_camel_case_with_numeric_fine() {
        let now = Utc::now();
        let mut r = row(TransactionStatus::Returned, now);
        r.fine_amount = Decimal::new(200, 2);

        let json = serde_json::to_value(r.into_details(now)).unwrap();
        assert_eq!(json["status"], "RETURNED");
        assert_eq!(json["fineAmount"], 2.0);
        assert_eq!(json["book"]["title"], "Dune");
        assert_eq!(json["member"]["isActive"], true);
        assert!(json["returnDate"].is_null());
    }

    #[test]
    fn test_borrow_request_requires_all_fields() {
        let request: CreateTransaction =
            serde_json::from_str(&format!(r#"{{"bookId":"{}"}}"#, Uuid::new_v4())).unwrap();
        assert!(request.validate().is_err());

        let request: CreateTransaction = serde_json::from_str(&format!(
            r#"{{"bookId":"{}","memberId":"{}","dueDate":"2030-01-01T00:00:00Z"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .unwrap();
        assert!(request.validate().is_ok());
    }

    fn borrow_request(due_date: &str) -> serde_json::Result<CreateTransaction> {
        serde_json::from_value(serde_json::json!({
            "bookId": Uuid::new_v4(),
            "memberId": Uuid::new_v4(),
            "dueDate": due_date,
        }))
    }

    #[test]
    fn test_due_date_accepts_bare_date_as_midnight_utc() {
        let request = borrow_request("2030-01-01").unwrap();
        let expected = DateTime::parse_from_rfc3339("2030-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(request.due_date, Some(expected));
    }

    #[test]
    fn test_due_date_keeps_timestamp_offset() {
        let request = borrow_request("2030-01-01T02:30:00+02:00").unwrap();
        let expected = DateTime::parse_from_rfc3339("2030-01-01T00:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(request.due_date, Some(expected));
    }

    #[test]
    fn test_due_date_rejects_garbage() {
        let err = borrow_request("next tuesday").unwrap_err();
        assert!(err.to_string().contains("invalid dueDate"));
        assert!(borrow_request("2030-02-30").is_err());
    }

    #[test]
    fn test_null_due_date_fails_validation() {
        let request: CreateTransaction = serde_json::from_value(serde_json::json!({
            "bookId": Uuid::new_v4(),
            "memberId": Uuid::new_v4(),
            "dueDate": null,
        }))
        .unwrap();
        assert!(request.due_date.is_none());
        assert!(request.validate().is_err());
    }
}
