use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "job_positions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub description: String,

    pub department: String,

    pub location: String,

    pub employment_type: String,

    pub salary_min: Option<i32>,

    pub salary_max: Option<i32>,

    /// JSON array of strings
    pub requirements: String,

    /// JSON array of strings
    pub responsibilities: String,

    pub experience_min: i32,

    pub is_active: bool,

    pub is_featured: bool,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recruitments::Entity")]
    Recruitments,
}

impl Related<super::recruitments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recruitments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
