use sea_orm::entity::prelude::*;

/// Client review of a completed order. At most one per order (`order_id`
/// is unique); `service_id` is denormalized so the provider-average
/// recompute can collect scores without touching `orders`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_id: Uuid,
    pub service_id: Uuid,
    pub rater_id: Uuid,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::service_listings::Entity",
        from = "Column::ServiceId",
        to = "super::service_listings::Column::Id"
    )]
    Service,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::RaterId",
        to = "super::accounts::Column::Id"
    )]
    Rater,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::service_listings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rater.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
