use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::QueryFilter;
use tracing::info;

use crate::entities::contacts;

pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

pub struct ContactRepository {
    conn: DatabaseConnection,
}

impl ContactRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<contacts::Model>> {
        contacts::Entity::find()
            .order_by_desc(contacts::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list contacts")
    }

    pub async fn get(&self, id: i32) -> Result<Option<contacts::Model>> {
        contacts::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query contact by ID")
    }

    pub async fn create(&self, input: ContactInput) -> Result<contacts::Model> {
        let model = contacts::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            company: Set(input.company),
            subject: Set(input.subject),
            message: Set(input.message),
            status: Set("new".to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert contact")?;

        info!("Received contact message {} from {}", model.id, model.email);
        Ok(model)
    }

    /// The submission itself is immutable; only the triage status moves.
    pub async fn update_status(&self, id: i32, status: &str) -> Result<bool> {
        let result = contacts::Entity::update_many()
            .col_expr(contacts::Column::Status, Expr::value(status))
            .filter(contacts::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update contact status")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = contacts::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete contact")?;

        Ok(result.rows_affected > 0)
    }
}
