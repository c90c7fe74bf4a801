//! Member management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{non_blank, CreateMember, ListQuery, Member},
    repository::{members::NewMember, Repository},
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_members(&self, query: &ListQuery) -> AppResult<Vec<Member>> {
        self.repository.members.list(query.like_pattern().as_deref()).await
    }

    pub async fn get_member(&self, id: Uuid) -> AppResult<Member> {
        self.repository.members.get_by_id(id).await
    }

    pub async fn create_member(&self, data: CreateMember) -> AppResult<Member> {
        let member = new_member(data)?;
        let created = self.repository.members.create(&member).await?;
        tracing::info!(member_id = %created.id, "Member registered");
        Ok(created)
    }

    pub async fn delete_member(&self, id: Uuid) -> AppResult<()> {
        self.repository.members.delete(id).await?;
        tracing::info!(member_id = %id, "Member deleted");
        Ok(())
    }
}

fn new_member(data: CreateMember) -> AppResult<NewMember> {
    data.validate()?;

    let (Some(name), Some(email)) = (data.name, data.email) else {
        return Err(AppError::Validation("Name and email are required".to_string()));
    };

    Ok(NewMember {
        name,
        email,
        phone: non_blank(data.phone),
        address: non_blank(data.address),
        is_active: data.is_active.unwrap_or(true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_is_active_by_default() {
        let member = new_member(CreateMember {
            name: Some("Ada".into()),
            email: Some("ada@example.org".into()),
            phone: Some("".into()),
            ..Default::default()
        })
        .unwrap();

        assert!(member.is_active);
        assert_eq!(member.phone, None);
    }

    #[test]
    fn test_new_member_keeps_explicit_inactive() {
        let member = new_member(CreateMember {
            name: Some("Ada".into()),
            email: Some("ada@example.org".into()),
            is_active: Some(false),
            ..Default::default()
        })
        .unwrap();

        assert!(!member.is_active);
    }

    #[test]
    fn test_new_member_requires_email() {
        let err = new_member(CreateMember {
            name: Some("Ada".into()),
            email: Some("".into()),
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == "Name and email are required"));
    }
}
