use sea_orm_migration::prelude::*;

mod create_machine_inventory_001;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(create_machine_inventory_001::Migration)]
    }
}
