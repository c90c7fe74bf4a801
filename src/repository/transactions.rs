//! Transactions repository: borrow/return workflow persistence

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

use crate::{
    circulation::{self, ReturnSettlement},
    error::{AppError, AppResult},
    models::{
        transaction::TransactionDetailsRow, Book, Member, Transaction, TransactionDetails,
        TransactionStatus,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT t.id, t.book_id, t.member_id, t.borrow_date, t.due_date, t.return_date,
           t.status, t.fine_amount,
           b.title AS book_title, b.author AS book_author, b.isbn AS book_isbn,
           b.genre AS book_genre, b.description AS book_description,
           b.total_copies AS book_total_copies, b.available_copies AS book_available_copies,
           b.added_at AS book_added_at,
           m.name AS member_name, m.email AS member_email, m.phone AS member_phone,
           m.address AS member_address, m.is_active AS member_is_active,
           m.join_date AS member_join_date
    FROM transactions t
    JOIN books b ON b.id = t.book_id
    JOIN members m ON m.id = t.member_id
"#;

#[derive(Clone)]
pub struct TransactionsRepository {
    pool: Pool<Postgres>,
}

impl TransactionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List joined transactions, most recent borrow first
    ///
    /// `pattern` filters on book title or member name.
    pub async fn list(&self, pattern: Option<&str>) -> AppResult<Vec<TransactionDetails>> {
        let query = format!(
            "{} WHERE $1::text IS NULL OR b.title ILIKE $1 OR m.name ILIKE $1 \
             ORDER BY t.borrow_date DESC",
            DETAILS_SELECT
        );

        let rows = sqlx::query_as::<_, TransactionDetailsRow>(&query)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        let now = Utc::now();
        Ok(rows.into_iter().map(|row| row.into_details(now)).collect())
    }

    /// Get joined transaction by ID
    pub async fn get_details(&self, id: Uuid) -> AppResult<TransactionDetails> {
        fetch_details(&self.pool, id).await
    }

    /// Borrow a copy of a book
    ///
    /// The transaction insert and the copy decrement commit together or not
    /// at all. The book row stays locked until commit, and the decrement only
    /// applies while a copy is left.
    pub async fn borrow(
        &self,
        book_id: Uuid,
        member_id: Uuid,
        due_date: DateTime<Utc>,
    ) -> AppResult<TransactionDetails> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?;

        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1 FOR SHARE")
            .bind(member_id)
            .fetch_optional(&mut *tx)
            .await?;

        circulation::check_borrow(book.as_ref(), member.as_ref())?;

        let transaction_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO transactions (id, book_id, member_id, borrow_date, due_date, status, fine_amount)
            VALUES ($1, $2, $3, $4, $5, $6, 0)
            "#,
        )
        .bind(transaction_id)
        .bind(book_id)
        .bind(member_id)
        .bind(now)
        .bind(due_date)
        .bind(TransactionStatus::Borrowed)
        .execute(&mut *tx)
        .await?;

        let decremented = sqlx::query(
            "UPDATE books SET available_copies = available_copies - 1 \
             WHERE id = $1 AND available_copies > 0",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            return Err(AppError::BusinessRule("Book is not available".to_string()));
        }

        let details = fetch_details(&mut *tx, transaction_id).await?;
        tx.commit().await?;

        Ok(details)
    }

    /// Return a borrowed book, recording the fine owed
    pub async fn return_book(
        &self,
        transaction_id: Uuid,
        fine_per_day: Decimal,
    ) -> AppResult<(TransactionDetails, ReturnSettlement)> {
        let mut tx = self.pool.begin().await?;

        let transaction =
            sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1 FOR UPDATE")
                .bind(transaction_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        let settlement = circulation::settle_return(&transaction, Utc::now(), fine_per_day)?;

        sqlx::query(
            "UPDATE transactions SET return_date = $1, status = $2, fine_amount = $3 WHERE id = $4",
        )
        .bind(settlement.return_date)
        .bind(TransactionStatus::Returned)
        .bind(settlement.fine_amount)
        .bind(transaction_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE books SET available_copies = LEAST(available_copies + 1, total_copies) \
             WHERE id = $1",
        )
        .bind(transaction.book_id)
        .execute(&mut *tx)
        .await?;

        let details = fetch_details(&mut *tx, transaction_id).await?;
        tx.commit().await?;

        Ok((details, settlement))
    }
}

async fn fetch_details<'e, E>(executor: E, id: Uuid) -> AppResult<TransactionDetails>
where
    E: Executor<'e, Database = Postgres>,
{
    let query = format!("{} WHERE t.id = $1", DETAILS_SELECT);

    let row = sqlx::query_as::<_, TransactionDetailsRow>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

    Ok(row.into_details(Utc::now()))
}
