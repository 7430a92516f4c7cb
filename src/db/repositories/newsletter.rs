use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, Set, Statement,
};
use tracing::info;

use super::RepoError;
use crate::entities::newsletter_subscriptions as subs;

/// Per-audience subscription counts for the admin dashboard.
#[derive(Debug, Clone, FromQueryResult, serde::Serialize)]
pub struct SubscriptionStats {
    pub kind: String,
    pub total: i64,
    pub active: i64,
    pub unsubscribed: i64,
}

pub struct NewsletterRepository {
    conn: DatabaseConnection,
}

impl NewsletterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<subs::Model>> {
        subs::Entity::find()
            .order_by_desc(subs::Column::SubscribedAt)
            .all(&self.conn)
            .await
            .context("Failed to list newsletter subscriptions")
    }

    pub async fn get(&self, id: i32) -> Result<Option<subs::Model>> {
        subs::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query subscription by ID")
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<subs::Model>> {
        subs::Entity::find()
            .filter(subs::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query subscription by email")
    }

    pub async fn list_active_by_kind(&self, kind: &str) -> Result<Vec<subs::Model>> {
        subs::Entity::find()
            .filter(subs::Column::Kind.eq(kind))
            .filter(subs::Column::Status.eq("active"))
            .all(&self.conn)
            .await
            .context("Failed to list active subscriptions by type")
    }

    /// Insert a brand-new subscription. Re-subscription of an existing row
    /// goes through `resubscribe`; the unique email constraint backs both.
    pub async fn subscribe(
        &self,
        email: &str,
        kind: &str,
        source: Option<&str>,
        metadata: Option<String>,
    ) -> Result<subs::Model> {
        let model = subs::ActiveModel {
            email: Set(email.to_string()),
            kind: Set(kind.to_string()),
            status: Set("active".to_string()),
            source: Set(source.map(str::to_string)),
            metadata: Set(metadata),
            subscribed_at: Set(chrono::Utc::now().to_rfc3339()),
            unsubscribed_at: Set(None),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert subscription")?;

        info!("New {} subscription: {}", model.kind, model.email);
        Ok(model)
    }

    /// Flip an unsubscribed row back to active, refreshing `subscribed_at`
    /// rather than creating a second row for the same email.
    pub async fn resubscribe(&self, email: &str) -> Result<bool> {
        let subscription = self
            .get_by_email(email)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Subscription for '{email}'")))?;

        let mut active: subs::ActiveModel = subscription.into();
        active.status = Set("active".to_string());
        active.subscribed_at = Set(chrono::Utc::now().to_rfc3339());
        active.unsubscribed_at = Set(None);
        active.update(&self.conn).await?;

        info!("Reactivated subscription for {}", email);
        Ok(true)
    }

    pub async fn unsubscribe(&self, email: &str) -> Result<bool> {
        let result = subs::Entity::update_many()
            .col_expr(subs::Column::Status, Expr::value("unsubscribed"))
            .col_expr(
                subs::Column::UnsubscribedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(subs::Column::Email.eq(email))
            .exec(&self.conn)
            .await
            .context("Failed to unsubscribe")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = subs::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete subscription")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn stats(&self) -> Result<Vec<SubscriptionStats>> {
        let backend = self.conn.get_database_backend();

        SubscriptionStats::find_by_statement(Statement::from_string(
            backend,
            "SELECT \
                 type AS kind, \
                 COUNT(*) AS total, \
                 SUM(CASE WHEN status = 'active' THEN 1 ELSE 0 END) AS active, \
                 SUM(CASE WHEN status = 'unsubscribed' THEN 1 ELSE 0 END) AS unsubscribed \
             FROM newsletter_subscriptions \
             GROUP BY type"
                .to_string(),
        ))
        .all(&self.conn)
        .await
        .context("Failed to compute subscription stats")
    }
}
