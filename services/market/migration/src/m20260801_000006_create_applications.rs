use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Applications::RequirementId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Applications::ApplicantId).uuid().not_null())
                    .col(
                        ColumnDef::new(Applications::Status)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Applications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Applications::Table, Applications::RequirementId)
                            .to(Requirements::Table, Requirements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Applications::Table, Applications::ApplicantId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one application per student per requirement
        manager
            .create_index(
                Index::create()
                    .table(Applications::Table)
                    .col(Applications::RequirementId)
                    .col(Applications::ApplicantId)
                    .unique()
                    .name("uq_applications_requirement_id_applicant_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Applications {
    Table,
    Id,
    RequirementId,
    ApplicantId,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Requirements {
    Table,
    Id,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
