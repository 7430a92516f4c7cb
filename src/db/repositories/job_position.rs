use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::RepoError;
use crate::entities::job_positions;

/// Requirements and responsibilities arrive as real arrays and are stored
/// as JSON text; readers get the arrays back deep-equal.
pub struct JobPositionInput {
    pub title: String,
    pub description: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub experience_min: i32,
    pub is_active: bool,
    pub is_featured: bool,
}

pub struct JobPositionRepository {
    conn: DatabaseConnection,
}

impl JobPositionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<job_positions::Model>> {
        job_positions::Entity::find()
            .order_by_desc(job_positions::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list job positions")
    }

    /// Public listing: featured positions first, newest first within each group.
    pub async fn list_active(&self) -> Result<Vec<job_positions::Model>> {
        job_positions::Entity::find()
            .filter(job_positions::Column::IsActive.eq(true))
            .order_by_desc(job_positions::Column::IsFeatured)
            .order_by_desc(job_positions::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list active job positions")
    }

    pub async fn list_featured(&self) -> Result<Vec<job_positions::Model>> {
        job_positions::Entity::find()
            .filter(job_positions::Column::IsActive.eq(true))
            .filter(job_positions::Column::IsFeatured.eq(true))
            .order_by_desc(job_positions::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list featured job positions")
    }

    pub async fn get(&self, id: i32) -> Result<Option<job_positions::Model>> {
        job_positions::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query job position by ID")
    }

    pub async fn create(&self, input: JobPositionInput) -> Result<job_positions::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = job_positions::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            department: Set(input.department),
            location: Set(input.location),
            employment_type: Set(input.employment_type),
            salary_min: Set(input.salary_min),
            salary_max: Set(input.salary_max),
            requirements: Set(serde_json::to_string(&input.requirements)?),
            responsibilities: Set(serde_json::to_string(&input.responsibilities)?),
            experience_min: Set(input.experience_min),
            is_active: Set(input.is_active),
            is_featured: Set(input.is_featured),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert job position")?;

        info!("Created job position {} ('{}')", model.id, model.title);
        Ok(model)
    }

    pub async fn update(&self, id: i32, input: JobPositionInput) -> Result<job_positions::Model> {
        let current = self
            .get(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Job position {id}")))?;

        let mut active: job_positions::ActiveModel = current.into();
        active.title = Set(input.title);
        active.description = Set(input.description);
        active.department = Set(input.department);
        active.location = Set(input.location);
        active.employment_type = Set(input.employment_type);
        active.salary_min = Set(input.salary_min);
        active.salary_max = Set(input.salary_max);
        active.requirements = Set(serde_json::to_string(&input.requirements)?);
        active.responsibilities = Set(serde_json::to_string(&input.responsibilities)?);
        active.experience_min = Set(input.experience_min);
        active.is_active = Set(input.is_active);
        active.is_featured = Set(input.is_featured);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        active
            .update(&self.conn)
            .await
            .context("Failed to update job position")
    }

    pub async fn toggle_active(&self, id: i32, active: bool) -> Result<bool> {
        self.toggle_flag(id, job_positions::Column::IsActive, active)
            .await
    }

    pub async fn toggle_featured(&self, id: i32, featured: bool) -> Result<bool> {
        self.toggle_flag(id, job_positions::Column::IsFeatured, featured)
            .await
    }

    async fn toggle_flag(
        &self,
        id: i32,
        column: job_positions::Column,
        value: bool,
    ) -> Result<bool> {
        let result = job_positions::Entity::update_many()
            .col_expr(column, Expr::value(value))
            .col_expr(
                job_positions::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(job_positions::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to toggle job position flag")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = job_positions::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete job position")?;

        Ok(result.rows_affected > 0)
    }
}
