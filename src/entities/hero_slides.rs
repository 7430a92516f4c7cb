use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "hero_slides")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub subtitle: Option<String>,

    pub description: String,

    pub background_image: Option<String>,

    pub button_text: Option<String>,

    pub button_link: Option<String>,

    /// `dashboard`, `analytics`, `team`, `growth` or `innovation`
    pub visual_type: String,

    /// At most one slide is active at a time; writes funnel through
    /// the exclusive-activation helper.
    pub is_active: bool,

    pub sort_order: i32,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
