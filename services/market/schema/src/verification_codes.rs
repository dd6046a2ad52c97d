use sea_orm::entity::prelude::*;

/// One-time verification code record, keyed by normalized email so codes
/// can be issued before an account exists. Append-only: every issue is a
/// new row and only the newest row per email is ever consulted. There is
/// no expiry column; freshness is computed from `issued_at` at verify time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub code_hash: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
