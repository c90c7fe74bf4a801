//! Book catalog service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{non_blank, Book, CreateBook, ListQuery},
    repository::{books::NewBook, Repository},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self, query: &ListQuery) -> AppResult<Vec<Book>> {
        self.repository.books.list(query.like_pattern().as_deref()).await
    }

    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book; all of its copies start on the shelf unless told otherwise
    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        let book = new_book(data)?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!(book_id = %created.id, title = %created.title, "Book added to catalog");
        Ok(created)
    }

    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}

/// Validate a create request into insertable fields
fn new_book(data: CreateBook) -> AppResult<NewBook> {
    data.validate()?;

    let (total_copies, available_copies) = data.copies();
    if available_copies > total_copies {
        return Err(AppError::Validation(
            "availableCopies cannot exceed totalCopies".to_string(),
        ));
    }

    // Presence is guaranteed by validate()
    let (Some(title), Some(author)) = (data.title, data.author) else {
        return Err(AppError::Validation("Title and author are required".to_string()));
    };

    Ok(NewBook {
        title,
        author,
        isbn: non_blank(data.isbn),
        genre: non_blank(data.genre),
        description: non_blank(data.description),
        total_copies,
        available_copies,
    })
}
