//! Borrow/return workflow service

use uuid::Uuid;
use validator::Validate;

use crate::{
    config::CirculationConfig,
    error::{AppError, AppResult},
    models::{CreateTransaction, ListQuery, TransactionDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
    config: CirculationConfig,
}

impl CirculationService {
    pub fn new(repository: Repository, config: CirculationConfig) -> Self {
        Self { repository, config }
    }

    pub async fn list_transactions(&self, query: &ListQuery) -> AppResult<Vec<TransactionDetails>> {
        self.repository
            .transactions
            .list(query.like_pattern().as_deref())
            .await
    }

    pub async fn get_transaction(&self, id: Uuid) -> AppResult<TransactionDetails> {
        self.repository.transactions.get_details(id).await
    }

    /// Lend a copy of a book to a member
    pub async fn borrow(&self, request: CreateTransaction) -> AppResult<TransactionDetails> {
        request.validate()?;
        let (Some(book_id), Some(member_id), Some(due_date)) =
            (request.book_id, request.member_id, request.due_date)
        else {
            return Err(AppError::Validation(
                "Book, member, and due date are required".to_string(),
            ));
        };

        let details = self
            .repository
            .transactions
            .borrow(book_id, member_id, due_date)
            .await
            .inspect_err(|e| log_rejection("borrow", e))?;

        tracing::info!(
            transaction_id = %details.id,
            book_id = %book_id,
            member_id = %member_id,
            due_date = %due_date,
            available_copies = details.book.available_copies,
            "Book borrowed"
        );
        Ok(details)
    }

    /// Take back a borrowed book and record any overdue fine
    pub async fn return_book(&self, transaction_id: Uuid) -> AppResult<TransactionDetails> {
        let (details, settlement) = self
            .repository
            .transactions
            .return_book(transaction_id, self.config.fine_per_day)
            .await
            .inspect_err(|e| log_rejection("return", e))?;

        tracing::info!(
            transaction_id = %transaction_id,
            book_id = %details.book_id,
            overdue_days = settlement.overdue_days,
            fine = %settlement.fine_amount,
            "Book returned"
        );
        Ok(details)
    }
}

fn log_rejection(operation: &str, error: &AppError) {
    match error {
        AppError::NotFound(msg) | AppError::BusinessRule(msg) => {
            tracing::debug!(operation, reason = %msg, "Circulation request rejected");
        }
        _ => {}
    }
}
