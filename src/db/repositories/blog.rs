use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::RepoError;
use crate::entities::blogs;
use crate::slug::slugify;

/// Full set of mutable blog columns. `slug: None` derives the slug from the
/// title; `Some` uses the hand-edited value after a uniqueness check.
pub struct BlogInput {
    pub title: String,
    pub description: String,
    pub content: String,
    pub author: String,
    pub slug: Option<String>,
    pub hero_image: Option<String>,
    pub status: String,
}

pub struct BlogRepository {
    conn: DatabaseConnection,
}

impl BlogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<blogs::Model>> {
        blogs::Entity::find()
            .order_by_desc(blogs::Column::PubDate)
            .all(&self.conn)
            .await
            .context("Failed to list blogs")
    }

    pub async fn list_published(&self) -> Result<Vec<blogs::Model>> {
        blogs::Entity::find()
            .filter(blogs::Column::Status.eq("published"))
            .order_by_desc(blogs::Column::PubDate)
            .all(&self.conn)
            .await
            .context("Failed to list published blogs")
    }

    pub async fn get(&self, id: i32) -> Result<Option<blogs::Model>> {
        blogs::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query blog by ID")
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<blogs::Model>> {
        blogs::Entity::find()
            .filter(blogs::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query blog by slug")
    }

    async fn slug_in_use(
        txn: &DatabaseTransaction,
        slug: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool> {
        let mut query = blogs::Entity::find().filter(blogs::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(blogs::Column::Id.ne(id));
        }

        let existing = query
            .one(txn)
            .await
            .context("Failed to check slug uniqueness")?;

        Ok(existing.is_some())
    }

    /// Find the first free slug for `base`: the base itself, then `base-1`,
    /// `base-2`, ... A blog never collides with its own slug on update.
    async fn allocate_slug(
        txn: &DatabaseTransaction,
        base: &str,
        exclude_id: Option<i32>,
    ) -> Result<String> {
        if !Self::slug_in_use(txn, base, exclude_id).await? {
            return Ok(base.to_string());
        }

        let mut counter = 1u32;
        loop {
            let candidate = format!("{base}-{counter}");
            if !Self::slug_in_use(txn, &candidate, exclude_id).await? {
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    /// Create a blog, allocating its slug and inserting in one transaction
    /// so two concurrent requests cannot both decide a slug is free.
    pub async fn create(&self, input: BlogInput) -> Result<blogs::Model> {
        let txn = self.conn.begin().await?;

        let slug = match &input.slug {
            Some(manual) => {
                if Self::slug_in_use(&txn, manual, None).await? {
                    return Err(RepoError::Conflict(format!("Slug '{manual}'")).into());
                }
                manual.clone()
            }
            None => Self::allocate_slug(&txn, &slugify(&input.title), None).await?,
        };

        let now = chrono::Utc::now().to_rfc3339();

        let model = blogs::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            content: Set(input.content),
            author: Set(input.author),
            slug: Set(slug),
            hero_image: Set(input.hero_image),
            status: Set(input.status),
            pub_date: Set(now.clone()),
            updated_date: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert blog")?;

        txn.commit().await?;

        info!("Created blog {} ('{}')", model.id, model.slug);
        Ok(model)
    }

    /// Full-row update. The slug is only regenerated when the title changed;
    /// a hand-edited slug wins over regeneration after a uniqueness check
    /// that excludes the row itself.
    pub async fn update(&self, id: i32, input: BlogInput) -> Result<blogs::Model> {
        let txn = self.conn.begin().await?;

        let current = blogs::Entity::find_by_id(id)
            .one(&txn)
            .await
            .context("Failed to query blog for update")?
            .ok_or_else(|| RepoError::NotFound(format!("Blog {id}")))?;

        let slug = match &input.slug {
            Some(manual) => {
                if Self::slug_in_use(&txn, manual, Some(id)).await? {
                    return Err(RepoError::Conflict(format!("Slug '{manual}'")).into());
                }
                manual.clone()
            }
            None if current.title != input.title => {
                Self::allocate_slug(&txn, &slugify(&input.title), Some(id)).await?
            }
            None => current.slug.clone(),
        };

        let mut active: blogs::ActiveModel = current.into();
        active.title = Set(input.title);
        active.description = Set(input.description);
        active.content = Set(input.content);
        active.author = Set(input.author);
        active.slug = Set(slug);
        active.hero_image = Set(input.hero_image);
        active.status = Set(input.status);
        active.updated_date = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&txn)
            .await
            .context("Failed to update blog")?;

        txn.commit().await?;
        Ok(model)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = blogs::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete blog")?;

        Ok(result.rows_affected > 0)
    }
}
