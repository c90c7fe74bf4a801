//! Statistics queries

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::LibraryStats};

#[derive(Clone)]
pub struct StatsRepository {
    pool: Pool<Postgres>,
}

impl StatsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn library_stats(&self) -> AppResult<LibraryStats> {
        let stats = sqlx::query_as::<_, LibraryStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM books) AS total_books,
                (SELECT COUNT(*) FROM members) AS total_members,
                (SELECT COUNT(*) FROM transactions WHERE status = 'BORROWED') AS active_transactions,
                (SELECT COUNT(*) FROM transactions
                  WHERE status = 'BORROWED' AND due_date < NOW()) AS overdue_transactions
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
