//! Dashboard statistics

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Library-wide counters
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total_books: i64,
    pub total_members: i64,
    /// Transactions with status BORROWED
    pub active_transactions: i64,
    /// Borrowed transactions past their due date
    pub overdue_transactions: i64,
}
