use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::RepoError;
use crate::entities::hero_slides;

pub struct HeroSlideInput {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub background_image: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub visual_type: String,
    pub is_active: bool,
    pub sort_order: i32,
}

pub struct HeroSlideRepository {
    conn: DatabaseConnection,
}

impl HeroSlideRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<hero_slides::Model>> {
        hero_slides::Entity::find()
            .order_by_asc(hero_slides::Column::SortOrder)
            .order_by_asc(hero_slides::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list hero slides")
    }

    pub async fn list_active(&self) -> Result<Vec<hero_slides::Model>> {
        hero_slides::Entity::find()
            .filter(hero_slides::Column::IsActive.eq(true))
            .order_by_asc(hero_slides::Column::SortOrder)
            .order_by_asc(hero_slides::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list active hero slides")
    }

    pub async fn get(&self, id: i32) -> Result<Option<hero_slides::Model>> {
        hero_slides::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query hero slide by ID")
    }

    /// Insert the slide inactive; activation goes through `activate_only`
    /// so the exclusivity invariant holds even for create-as-active.
    pub async fn create(&self, input: HeroSlideInput) -> Result<hero_slides::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = hero_slides::ActiveModel {
            title: Set(input.title),
            subtitle: Set(input.subtitle),
            description: Set(input.description),
            background_image: Set(input.background_image),
            button_text: Set(input.button_text),
            button_link: Set(input.button_link),
            visual_type: Set(input.visual_type),
            is_active: Set(false),
            sort_order: Set(input.sort_order),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert hero slide")?;

        info!("Created hero slide {} ('{}')", model.id, model.title);
        Ok(model)
    }

    /// Full-row update except the active flag, which only moves through
    /// `activate_only` / `toggle_active`.
    pub async fn update(&self, id: i32, input: HeroSlideInput) -> Result<hero_slides::Model> {
        let current = self
            .get(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Hero slide {id}")))?;

        let mut active: hero_slides::ActiveModel = current.into();
        active.title = Set(input.title);
        active.subtitle = Set(input.subtitle);
        active.description = Set(input.description);
        active.background_image = Set(input.background_image);
        active.button_text = Set(input.button_text);
        active.button_link = Set(input.button_link);
        active.visual_type = Set(input.visual_type);
        active.sort_order = Set(input.sort_order);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        active
            .update(&self.conn)
            .await
            .context("Failed to update hero slide")
    }

    /// Single-row deactivation. Activation must use `activate_only`.
    pub async fn deactivate(&self, id: i32) -> Result<bool> {
        let result = hero_slides::Entity::update_many()
            .col_expr(hero_slides::Column::IsActive, Expr::value(false))
            .col_expr(
                hero_slides::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(hero_slides::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to deactivate hero slide")?;

        Ok(result.rows_affected > 0)
    }

    /// Make this slide the only active one. Returns false if the slide does
    /// not exist; nothing is mutated in that case.
    pub async fn activate_only(&self, id: i32) -> Result<bool> {
        super::activate_only(&self.conn, "hero_slides", id).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = hero_slides::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete hero slide")?;

        Ok(result.rows_affected > 0)
    }
}
