//! Data models for the library server

pub mod book;
pub mod member;
pub mod stats;
pub mod transaction;

// Re-export commonly used types
pub use book::{Book, CreateBook};
pub use member::{CreateMember, Member};
pub use stats::LibraryStats;
pub use transaction::{CreateTransaction, Transaction, TransactionDetails, TransactionStatus};

use serde::Deserialize;
use utoipa::IntoParams;

/// Search filter shared by list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive search term
    pub search: Option<String>,
}

impl ListQuery {
    /// ILIKE pattern for the search term, `None` when no filtering applies
    pub fn like_pattern(&self) -> Option<String> {
        let term = self.search.as_deref()?.trim();
        if term.is_empty() {
            return None;
        }

        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }
}

/// Treat blank optional strings as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
