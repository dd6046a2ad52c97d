use sea_orm::entity::prelude::*;

/// Student application on a requirement. One row per (requirement,
/// applicant) pair, enforced by a unique index. `status` holds the `u8`
/// wire value of `campus_domain::status::ApplicationStatus`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub requirement_id: Uuid,
    pub applicant_id: Uuid,
    pub status: i16,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requirements::Entity",
        from = "Column::RequirementId",
        to = "super::requirements::Column::Id"
    )]
    Requirement,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ApplicantId",
        to = "super::accounts::Column::Id"
    )]
    Applicant,
}

impl Related<super::requirements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requirement.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
