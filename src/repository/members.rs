//! Members repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Member, TransactionStatus},
};

const DUPLICATE_EMAIL: &str = "Member with this email already exists";

/// Validated fields for a new member
#[derive(Debug)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Postgres>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List members, most recently joined first, optionally filtered by name/email
    pub async fn list(&self, pattern: Option<&str>) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
            WHERE $1::text IS NULL OR name ILIKE $1 OR email ILIKE $1
            ORDER BY join_date DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }

    /// Create a new member, rejecting an email already in use
    pub async fn create(&self, member: &NewMember) -> AppResult<Member> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE email = $1)")
                .bind(&member.email)
                .fetch_one(&self.pool)
                .await?;

        if exists {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let created = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (id, name, email, phone, address, is_active, join_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.address)
        .bind(member.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // Lost the race against a concurrent insert of the same email
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(DUPLICATE_EMAIL.to_string())
            }
            other => AppError::Database(other),
        })?;

        Ok(created)
    }

    /// Delete a member with no borrowed books
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, Uuid>("SELECT id FROM members WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

        let has_active: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM transactions WHERE member_id = $1 AND status = $2)",
        )
        .bind(id)
        .bind(TransactionStatus::Borrowed)
        .fetch_one(&mut *tx)
        .await?;

        if has_active {
            return Err(AppError::BusinessRule(
                "Cannot delete member with active transactions".to_string(),
            ));
        }

        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
