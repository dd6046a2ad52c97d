use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(Orders::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Orders::Amount).double().not_null())
                    .col(ColumnDef::new(Orders::Status).small_integer().not_null())
                    .col(ColumnDef::new(Orders::Archived).boolean().not_null())
                    .col(ColumnDef::new(Orders::Notes).string())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Orders::Table, Orders::ServiceId)
                            .to(ServiceListings::Table, ServiceListings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Orders::Table, Orders::ClientId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // active-order lookup for the idempotent create path
        manager
            .create_index(
                Index::create()
                    .table(Orders::Table)
                    .col(Orders::ServiceId)
                    .col(Orders::ClientId)
                    .col(Orders::Status)
                    .name("idx_orders_service_id_client_id_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    ServiceId,
    ClientId,
    Amount,
    Status,
    Archived,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ServiceListings {
    Table,
    Id,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
