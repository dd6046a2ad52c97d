use sea_orm::entity::prelude::*;

/// Engagement between a client and a service listing. `status` holds the
/// `u8` wire value of `campus_domain::status::OrderStatus`; `amount` is the
/// listing price at creation time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: Uuid,
    pub client_id: Uuid,
    pub amount: f64,
    pub status: i16,
    pub archived: bool,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service_listings::Entity",
        from = "Column::ServiceId",
        to = "super::service_listings::Column::Id"
    )]
    Service,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ClientId",
        to = "super::accounts::Column::Id"
    )]
    Client,
}

impl Related<super::service_listings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
