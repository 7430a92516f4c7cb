use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, TransactionTrait};

pub mod banner;
pub mod blog;
pub mod contact;
pub mod hero_slide;
pub mod job_position;
pub mod newsletter;
pub mod recruitment;
pub mod testimonial;
pub mod user;

/// Error cases the HTTP layer maps to specific status codes. Everything else
/// surfaces as a generic internal error.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),
}

/// Deactivate every row of an exclusive-activation set, then activate one,
/// as a single transaction. Shared by hero slides and notification banners
/// so the two copies cannot drift.
///
/// Returns `Ok(false)` without touching the table when `id` does not exist;
/// committing the deactivation for a missing target would leave zero active
/// rows.
pub(crate) async fn activate_only(
    conn: &DatabaseConnection,
    table: &str,
    id: i32,
) -> Result<bool> {
    let backend = conn.get_database_backend();
    let txn = conn.begin().await?;

    let existing = txn
        .query_one(Statement::from_sql_and_values(
            backend,
            format!("SELECT id FROM {table} WHERE id = ?"),
            [id.into()],
        ))
        .await
        .with_context(|| format!("Failed to look up {table} row {id}"))?;

    if existing.is_none() {
        txn.rollback().await?;
        return Ok(false);
    }

    let now = chrono::Utc::now().to_rfc3339();

    txn.execute(Statement::from_sql_and_values(
        backend,
        format!("UPDATE {table} SET is_active = 0, updated_at = ?"),
        [now.clone().into()],
    ))
    .await
    .with_context(|| format!("Failed to deactivate {table} rows"))?;

    txn.execute(Statement::from_sql_and_values(
        backend,
        format!("UPDATE {table} SET is_active = 1, updated_at = ? WHERE id = ?"),
        [now.into(), id.into()],
    ))
    .await
    .with_context(|| format!("Failed to activate {table} row {id}"))?;

    txn.commit().await?;
    Ok(true)
}
