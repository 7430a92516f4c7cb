use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Seed the primary admin account. Username and password come from the
/// environment so deployments never have to ship the fallback credentials;
/// the defaults exist for local development only.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let username =
            std::env::var("TALENTHUB_ADMIN_USER").unwrap_or_else(|_| "admin".to_string());
        let password =
            std::env::var("TALENTHUB_ADMIN_PASS").unwrap_or_else(|_| "admin123".to_string());

        let password_hash = crate::auth::hash_password(&password)
            .map_err(|e| DbErr::Migration(format!("Failed to hash admin password: {e}")))?;

        let now = chrono::Utc::now().to_rfc3339();

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Users)
            .columns([
                crate::entities::users::Column::Username,
                crate::entities::users::Column::PasswordHash,
                crate::entities::users::Column::Role,
                crate::entities::users::Column::CreatedAt,
            ])
            .values_panic([
                username.into(),
                password_hash.into(),
                "admin".into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let username =
            std::env::var("TALENTHUB_ADMIN_USER").unwrap_or_else(|_| "admin".to_string());

        let delete = sea_orm_migration::sea_query::Query::delete()
            .from_table(Users)
            .and_where(
                Expr::col(crate::entities::users::Column::Username).eq(username),
            )
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
