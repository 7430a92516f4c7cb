use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "newsletter_subscriptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,

    /// Audience: `general`, `career`, `blog`, ...
    #[sea_orm(column_name = "type")]
    pub kind: String,

    /// `active` or `unsubscribed`
    pub status: String,

    pub source: Option<String>,

    /// Opaque JSON blob recorded at subscription time.
    pub metadata: Option<String>,

    pub subscribed_at: String,

    pub unsubscribed_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
