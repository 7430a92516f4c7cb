use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub description: String,

    /// Markdown source; rendered to HTML on read.
    pub content: String,

    pub author: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub hero_image: Option<String>,

    /// `draft` or `published`
    pub status: String,

    pub pub_date: String,

    pub updated_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
