pub use sea_orm_migration::prelude::*;

mod m20250815_000000_bootstrap;
mod m20250815_000001_create_users;
mod m20250815_000002_create_tasks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250815_000000_bootstrap::Migration),
            Box::new(m20250815_000001_create_users::Migration),
            Box::new(m20250815_000002_create_tasks::Migration),
        ]
    }
}
