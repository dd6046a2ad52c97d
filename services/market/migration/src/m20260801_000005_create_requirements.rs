use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Requirements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Requirements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Requirements::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Requirements::CareerId).uuid().not_null())
                    .col(ColumnDef::new(Requirements::Title).string().not_null())
                    .col(
                        ColumnDef::new(Requirements::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Requirements::Budget).double())
                    .col(
                        ColumnDef::new(Requirements::Status)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Requirements::Archived).boolean().not_null())
                    .col(
                        ColumnDef::new(Requirements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Requirements::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Requirements::Table, Requirements::OwnerId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // broadcast + feed queries filter on career and status
        manager
            .create_index(
                Index::create()
                    .table(Requirements::Table)
                    .col(Requirements::CareerId)
                    .col(Requirements::Status)
                    .name("idx_requirements_career_id_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Requirements::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Requirements {
    Table,
    Id,
    OwnerId,
    CareerId,
    Title,
    Description,
    Budget,
    Status,
    Archived,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
