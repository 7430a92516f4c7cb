use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{job_positions, recruitments};

pub struct RecruitmentInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub experience: Option<String>,
    pub salary_expectation: Option<String>,
    pub cv_path: Option<String>,
    pub cover_letter: Option<String>,
    pub position_id: Option<i32>,
}

/// Application row joined with its job position's title. The title is `None`
/// for legacy rows and for applications whose position was deleted; nothing
/// cascades.
pub type RecruitmentWithPosition = (recruitments::Model, Option<String>);

pub struct RecruitmentRepository {
    conn: DatabaseConnection,
}

impl RecruitmentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<RecruitmentWithPosition>> {
        let rows = recruitments::Entity::find()
            .find_also_related(job_positions::Entity)
            .order_by_desc(recruitments::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list recruitments")?;

        Ok(rows
            .into_iter()
            .map(|(r, p)| (r, p.map(|p| p.title)))
            .collect())
    }

    pub async fn list_for_position(&self, position_id: i32) -> Result<Vec<RecruitmentWithPosition>> {
        let rows = recruitments::Entity::find()
            .filter(recruitments::Column::PositionId.eq(position_id))
            .find_also_related(job_positions::Entity)
            .order_by_desc(recruitments::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list recruitments for position")?;

        Ok(rows
            .into_iter()
            .map(|(r, p)| (r, p.map(|p| p.title)))
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<recruitments::Model>> {
        recruitments::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query recruitment by ID")
    }

    pub async fn create(&self, input: RecruitmentInput) -> Result<recruitments::Model> {
        let model = recruitments::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            position: Set(input.position),
            experience: Set(input.experience),
            salary_expectation: Set(input.salary_expectation),
            cv_path: Set(input.cv_path),
            cover_letter: Set(input.cover_letter),
            status: Set("new".to_string()),
            position_id: Set(input.position_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert recruitment")?;

        info!(
            "Received application {} from {} for '{}'",
            model.id, model.email, model.position
        );
        Ok(model)
    }

    pub async fn update_status(&self, id: i32, status: &str) -> Result<bool> {
        let result = recruitments::Entity::update_many()
            .col_expr(recruitments::Column::Status, Expr::value(status))
            .filter(recruitments::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update recruitment status")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = recruitments::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete recruitment")?;

        Ok(result.rows_affected > 0)
    }
}
