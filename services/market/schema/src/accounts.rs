use sea_orm::entity::prelude::*;

/// Marketplace account. `role` holds the `u8` wire value of
/// `campus_domain::role::AccountRole`; `password_hash` is an argon2 PHC
/// string except for rows imported from the legacy system, which hold the
/// raw password until their first successful login rehashes them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: i16,
    pub career_id: Option<Uuid>,
    pub active: bool,
    pub average_rating: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::service_listings::Entity")]
    ServiceListings,
    #[sea_orm(has_many = "super::requirements::Entity")]
    Requirements,
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
}

impl Related<super::service_listings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceListings.def()
    }
}

impl Related<super::requirements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requirements.def()
    }
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
