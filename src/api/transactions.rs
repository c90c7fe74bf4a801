//! Borrow/return transaction endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CreateTransaction, ListQuery, TransactionDetails},
    AppState,
};

/// List transactions with their book and member, most recent first
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    params(ListQuery),
    responses(
        (status = 200, description = "List of transactions", body = Vec<TransactionDetails>)
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, AppError>,
) -> AppResult<Json<Vec<TransactionDetails>>> {
    let transactions = state.services.circulation.list_transactions(&query).await?;
    Ok(Json(transactions))
}

/// Get a transaction by ID
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = Uuid, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction details", body = TransactionDetails),
        (status = 404, description = "Transaction not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<Json<TransactionDetails>> {
    let transaction = state.services.circulation.get_transaction(id).await?;
    Ok(Json(transaction))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = CreateTransaction,
    responses(
        (status = 201, description = "Book borrowed", body = TransactionDetails),
        (status = 400, description = "Missing field, book unavailable or member inactive", body = crate::error::ErrorResponse),
        (status = 404, description = "Book or member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateTransaction>, AppError>,
) -> AppResult<(StatusCode, Json<TransactionDetails>)> {
    let transaction = state.services.circulation.borrow(request).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/transactions/{id}/return",
    tag = "transactions",
    params(
        ("id" = Uuid, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = TransactionDetails),
        (status = 400, description = "Already returned or not borrowed", body = crate::error::ErrorResponse),
        (status = 404, description = "Transaction not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> AppResult<Json<TransactionDetails>> {
    let transaction = state.services.circulation.return_book(id).await?;
    Ok(Json(transaction))
}
