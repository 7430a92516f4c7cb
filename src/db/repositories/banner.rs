use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::RepoError;
use crate::entities::notification_banners as banners;

pub struct BannerInput {
    pub title: String,
    pub description: Option<String>,
    pub banner_type: String,
    pub image_url: Option<String>,
    pub action_url: Option<String>,
    pub action_text: Option<String>,
    pub is_active: bool,
    pub dismissible: bool,
    pub show_on_pages: String,
}

pub struct BannerRepository {
    conn: DatabaseConnection,
}

impl BannerRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<banners::Model>> {
        banners::Entity::find()
            .order_by_desc(banners::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list banners")
    }

    pub async fn list_active(&self) -> Result<Vec<banners::Model>> {
        banners::Entity::find()
            .filter(banners::Column::IsActive.eq(true))
            .order_by_desc(banners::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list active banners")
    }

    pub async fn get(&self, id: i32) -> Result<Option<banners::Model>> {
        banners::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query banner by ID")
    }

    /// Insert the banner inactive; activation goes through `activate_only`
    /// so the exclusivity invariant holds even for create-as-active.
    pub async fn create(&self, input: BannerInput) -> Result<banners::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = banners::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            banner_type: Set(input.banner_type),
            image_url: Set(input.image_url),
            action_url: Set(input.action_url),
            action_text: Set(input.action_text),
            is_active: Set(false),
            dismissible: Set(input.dismissible),
            show_on_pages: Set(input.show_on_pages),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert banner")?;

        info!("Created {} banner {}", model.banner_type, model.id);
        Ok(model)
    }

    /// Full-row update except the active flag, which only moves through
    /// `activate_only` / `deactivate`.
    pub async fn update(&self, id: i32, input: BannerInput) -> Result<banners::Model> {
        let current = self
            .get(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Banner {id}")))?;

        let mut active: banners::ActiveModel = current.into();
        active.title = Set(input.title);
        active.description = Set(input.description);
        active.banner_type = Set(input.banner_type);
        active.image_url = Set(input.image_url);
        active.action_url = Set(input.action_url);
        active.action_text = Set(input.action_text);
        active.dismissible = Set(input.dismissible);
        active.show_on_pages = Set(input.show_on_pages);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        active
            .update(&self.conn)
            .await
            .context("Failed to update banner")
    }

    pub async fn deactivate(&self, id: i32) -> Result<bool> {
        use sea_orm::sea_query::Expr;

        let result = banners::Entity::update_many()
            .col_expr(banners::Column::IsActive, Expr::value(false))
            .col_expr(
                banners::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(banners::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to deactivate banner")?;

        Ok(result.rows_affected > 0)
    }

    /// Make this banner the only active one. Returns false if the banner
    /// does not exist; nothing is mutated in that case.
    pub async fn activate_only(&self, id: i32) -> Result<bool> {
        super::activate_only(&self.conn, "notification_banners", id).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = banners::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete banner")?;

        Ok(result.rows_affected > 0)
    }
}
