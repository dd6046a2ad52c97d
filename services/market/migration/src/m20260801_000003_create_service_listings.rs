use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceListings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceListings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceListings::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(ServiceListings::Title).string().not_null())
                    .col(
                        ColumnDef::new(ServiceListings::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceListings::Price).double().not_null())
                    .col(
                        ColumnDef::new(ServiceListings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ServiceListings::Table, ServiceListings::OwnerId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ServiceListings::Table)
                    .col(ServiceListings::OwnerId)
                    .name("idx_service_listings_owner_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceListings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ServiceListings {
    Table,
    Id,
    OwnerId,
    Title,
    Description,
    Price,
    CreatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
