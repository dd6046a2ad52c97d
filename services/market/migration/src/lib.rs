use sea_orm_migration::prelude::*;

mod m20260801_000001_create_accounts;
mod m20260801_000002_create_verification_codes;
mod m20260801_000003_create_service_listings;
mod m20260801_000004_create_orders;
mod m20260801_000005_create_requirements;
mod m20260801_000006_create_applications;
mod m20260801_000007_create_reviews;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_accounts::Migration),
            Box::new(m20260801_000002_create_verification_codes::Migration),
            Box::new(m20260801_000003_create_service_listings::Migration),
            Box::new(m20260801_000004_create_orders::Migration),
            Box::new(m20260801_000005_create_requirements::Migration),
            Box::new(m20260801_000006_create_applications::Migration),
            Box::new(m20260801_000007_create_reviews::Migration),
        ]
    }
}
