use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recruitments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub email: String,

    pub phone: Option<String>,

    /// Free-text position label; kept alongside `position_id` for legacy rows.
    pub position: String,

    pub experience: Option<String>,

    pub salary_expectation: Option<String>,

    /// Public path of the uploaded CV under `uploads/cv/`, if any.
    pub cv_path: Option<String>,

    pub cover_letter: Option<String>,

    /// `new`, `reviewing`, `interview`, `hired` or `rejected`
    pub status: String,

    pub position_id: Option<i32>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job_positions::Entity",
        from = "Column::PositionId",
        to = "super::job_positions::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    JobPositions,
}

impl Related<super::job_positions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobPositions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
