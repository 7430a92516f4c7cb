use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::RepoError;
use crate::entities::testimonials;

pub struct TestimonialInput {
    pub name: String,
    pub position: String,
    pub company: Option<String>,
    pub content: String,
    pub avatar_url: Option<String>,
    pub rating: i32,
    pub is_active: bool,
    pub is_featured: bool,
}

pub struct TestimonialRepository {
    conn: DatabaseConnection,
}

impl TestimonialRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<testimonials::Model>> {
        testimonials::Entity::find()
            .order_by_desc(testimonials::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list testimonials")
    }

    /// Public listing: featured quotes first, newest first within each group.
    pub async fn list_active(&self) -> Result<Vec<testimonials::Model>> {
        testimonials::Entity::find()
            .filter(testimonials::Column::IsActive.eq(true))
            .order_by_desc(testimonials::Column::IsFeatured)
            .order_by_desc(testimonials::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list active testimonials")
    }

    pub async fn list_featured(&self) -> Result<Vec<testimonials::Model>> {
        testimonials::Entity::find()
            .filter(testimonials::Column::IsActive.eq(true))
            .filter(testimonials::Column::IsFeatured.eq(true))
            .order_by_desc(testimonials::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list featured testimonials")
    }

    pub async fn get(&self, id: i32) -> Result<Option<testimonials::Model>> {
        testimonials::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query testimonial by ID")
    }

    pub async fn create(&self, input: TestimonialInput) -> Result<testimonials::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = testimonials::ActiveModel {
            name: Set(input.name),
            position: Set(input.position),
            company: Set(input.company),
            content: Set(input.content),
            avatar_url: Set(input.avatar_url),
            rating: Set(input.rating),
            is_active: Set(input.is_active),
            is_featured: Set(input.is_featured),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert testimonial")?;

        info!("Created testimonial {} from {}", model.id, model.name);
        Ok(model)
    }

    pub async fn update(&self, id: i32, input: TestimonialInput) -> Result<testimonials::Model> {
        let current = self
            .get(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Testimonial {id}")))?;

        let mut active: testimonials::ActiveModel = current.into();
        active.name = Set(input.name);
        active.position = Set(input.position);
        active.company = Set(input.company);
        active.content = Set(input.content);
        active.avatar_url = Set(input.avatar_url);
        active.rating = Set(input.rating);
        active.is_active = Set(input.is_active);
        active.is_featured = Set(input.is_featured);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        active
            .update(&self.conn)
            .await
            .context("Failed to update testimonial")
    }

    pub async fn toggle_active(&self, id: i32, active: bool) -> Result<bool> {
        self.toggle_flag(id, testimonials::Column::IsActive, active)
            .await
    }

    pub async fn toggle_featured(&self, id: i32, featured: bool) -> Result<bool> {
        self.toggle_flag(id, testimonials::Column::IsFeatured, featured)
            .await
    }

    async fn toggle_flag(&self, id: i32, column: testimonials::Column, value: bool) -> Result<bool> {
        let result = testimonials::Entity::update_many()
            .col_expr(column, Expr::value(value))
            .col_expr(
                testimonials::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(testimonials::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to toggle testimonial flag")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = testimonials::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete testimonial")?;

        Ok(result.rows_affected > 0)
    }
}
