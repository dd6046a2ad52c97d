use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Accounts::Role).small_integer().not_null())
                    .col(ColumnDef::new(Accounts::CareerId).uuid())
                    .col(ColumnDef::new(Accounts::Active).boolean().not_null())
                    .col(ColumnDef::new(Accounts::AverageRating).double())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // broadcast recipient lookup: active students of a career
        manager
            .create_index(
                Index::create()
                    .table(Accounts::Table)
                    .col(Accounts::CareerId)
                    .col(Accounts::Role)
                    .col(Accounts::Active)
                    .name("idx_accounts_career_id_role_active")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
    Role,
    CareerId,
    Active,
    AverageRating,
    CreatedAt,
    UpdatedAt,
}
