//! Borrow/return rules
//!
//! Pure decision logic for the circulation workflow. The repository loads the
//! locked rows inside a database transaction and asks these functions whether
//! the operation may proceed and what it must write.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Member, Transaction, TransactionStatus},
};

/// Check borrow preconditions in order: book exists, has a copy on the
/// shelf, member exists, member is active.
pub fn check_borrow(book: Option<&Book>, member: Option<&Member>) -> AppResult<()> {
    let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
    if book.available_copies <= 0 {
        return Err(AppError::BusinessRule("Book is not available".to_string()));
    }

    let member = member.ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;
    if !member.is_active {
        return Err(AppError::BusinessRule("Member is not active".to_string()));
    }

    Ok(())
}

/// Outcome of returning a borrowed book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnSettlement {
    pub return_date: DateTime<Utc>,
    pub overdue_days: i64,
    pub fine_amount: Decimal,
}

/// Check that the transaction is still open and compute the fine owed at `now`
pub fn settle_return(
    transaction: &Transaction,
    now: DateTime<Utc>,
    fine_per_day: Decimal,
) -> AppResult<ReturnSettlement> {
    if transaction.status != TransactionStatus::Borrowed {
        return Err(AppError::BusinessRule(
            "Book is already returned or not borrowed".to_string(),
        ));
    }

    let overdue_days = overdue_days(transaction.due_date, now);
    Ok(ReturnSettlement {
        return_date: now,
        overdue_days,
        fine_amount: fine_for(overdue_days, fine_per_day),
    })
}

/// Started days elapsed past `due_date`, 0 when returned on time
pub fn overdue_days(due_date: DateTime<Utc>, returned_at: DateTime<Utc>) -> i64 {
    if returned_at <= due_date {
        return 0;
    }

    let late = returned_at - due_date;
    let whole = late.num_days();
    if late > Duration::days(whole) {
        whole + 1
    } else {
        whole
    }
}

pub fn fine_for(overdue_days: i64, fine_per_day: Decimal) -> Decimal {
    (Decimal::from(overdue_days) * fine_per_day).round_dp(2)
}

/// A borrowed book whose due date has passed
pub fn is_overdue(status: TransactionStatus, due_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    status == TransactionStatus::Borrowed && now > due_date
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn book(available_copies: i32) -> Book {
        Book {
            id: Uuid::new_v4(),
            title: "The Left Hand of Darkness".into(),
            author: "Ursula K. Le Guin".into(),
            isbn: None,
            genre: None,
            description: None,
            total_copies: 1,
            available_copies,
            added_at: Utc::now(),
        }
    }

    fn member(is_active: bool) -> Member {
        Member {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".into(),
            email: "ada@example.org".into(),
            phone: None,
            address: None,
            is_active,
            join_date: Utc::now(),
        }
    }

    fn borrowed(due_date: DateTime<Utc>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            member_id: Uuid::new_v4(),
            borrow_date: due_date - Duration::days(14),
            due_date,
            return_date: None,
            status: TransactionStatus::Borrowed,
            fine_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn test_borrow_allowed() {
        assert!(check_borrow(Some(&book(1)), Some(&member(true))).is_ok());
    }

    #[test]
    fn test_borrow_precondition_order() {
        // Missing book wins over everything else
        let err = check_borrow(None, None).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Book not found"));

        // Unavailable book is reported before the missing member
        let err = check_borrow(Some(&book(0)), None).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(ref m) if m == "Book is not available"));

        let err = check_borrow(Some(&book(1)), None).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Member not found"));

        let err = check_borrow(Some(&book(1)), Some(&member(false))).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(ref m) if m == "Member is not active"));
    }

    #[test]
    fn test_return_on_due_date_is_free() {
        let due = Utc::now();
        let settlement = settle_return(&borrowed(due), due, Decimal::ONE).unwrap();
        assert_eq!(settlement.overdue_days, 0);
        assert_eq!(settlement.fine_amount, Decimal::ZERO);
        assert_eq!(settlement.return_date, due);
    }

    #[test]
    fn test_early_return_is_free() {
        let due = Utc::now();
        let settlement =
            settle_return(&borrowed(due), due - Duration::hours(1), Decimal::ONE).unwrap();
        assert_eq!(settlement.fine_amount, Decimal::ZERO);
    }

    #[test]
    fn test_partial_days_round_up() {
        let due = Utc::now();
        let settlement =
            settle_return(&borrowed(due), due + Duration::hours(36), Decimal::ONE).unwrap();
        assert_eq!(settlement.overdue_days, 2);
        assert_eq!(settlement.fine_amount, Decimal::new(200, 2));
    }

    #[test]
    fn test_overdue_days() {
        let due = Utc::now();
        assert_eq!(overdue_days(due, due + Duration::milliseconds(1)), 1);
        assert_eq!(overdue_days(due, due + Duration::days(1)), 1);
        assert_eq!(overdue_days(due, due + Duration::days(1) + Duration::seconds(1)), 2);
        assert_eq!(overdue_days(due, due + Duration::days(10)), 10);
        assert_eq!(overdue_days(due, due - Duration::days(3)), 0);
    }

    #[test]
    fn test_fine_uses_configured_rate() {
        assert_eq!(fine_for(3, Decimal::new(25, 2)), Decimal::new(75, 2));
        assert_eq!(fine_for(0, Decimal::new(25, 2)), Decimal::ZERO);
    }

    #[test]
    fn test_return_requires_borrowed_status() {
        let mut transaction = borrowed(Utc::now());
        transaction.status = TransactionStatus::Returned;

        let err = settle_return(&transaction, Utc::now(), Decimal::ONE).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));

        transaction.status = TransactionStatus::Lost;
        assert!(settle_return(&transaction, Utc::now(), Decimal::ONE).is_err());
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let past = now - Duration::minutes(5);
        assert!(is_overdue(TransactionStatus::Borrowed, past, now));
        assert!(!is_overdue(TransactionStatus::Borrowed, now, now));
        assert!(!is_overdue(TransactionStatus::Returned, past, now));
    }
}
