use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "notification_banners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub description: Option<String>,

    /// `system`, `news`, `event`, `promotion` or `warning`
    pub banner_type: String,

    pub image_url: Option<String>,

    pub action_url: Option<String>,

    pub action_text: Option<String>,

    /// At most one banner is active at a time; writes funnel through
    /// the exclusive-activation helper.
    pub is_active: bool,

    pub dismissible: bool,

    /// `all`, `home` or `specific`
    pub show_on_pages: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
