use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let conn = manager.get_connection();

        let sql = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                r#"
CREATE TABLE IF NOT EXISTS machine_inventory (
    "ComputerName" VARCHAR(255) NOT NULL,
    "Domain" VARCHAR(255) NOT NULL,
    "Manufacturer" VARCHAR(255) NOT NULL,
    "Model" VARCHAR(255) NOT NULL,
    "RAM" BIGINT NOT NULL,
    "Drive" VARCHAR(64) NOT NULL,
    "DiskSize" BIGINT NOT NULL,
    "FreeSpace" BIGINT NOT NULL,
    "FreePercent" INTEGER NOT NULL,
    "BIOSVersion" VARCHAR(255) NOT NULL,
    "BIOSSerial" VARCHAR(255) NOT NULL,
    "OSName" VARCHAR(255) NOT NULL,
    "OSVersion" VARCHAR(255) NOT NULL,
    "OSArchitecture" VARCHAR(64) NOT NULL,
    "Processor" VARCHAR(255) NOT NULL,
    "ProcessorAddressWidth" INTEGER NOT NULL,
    PRIMARY KEY ("ComputerName", "Drive")
);
                "#
            }
            sea_orm::DatabaseBackend::MySql => {
                r#"
CREATE TABLE IF NOT EXISTS machine_inventory (
    `ComputerName` VARCHAR(255) NOT NULL,
    `Domain` VARCHAR(255) NOT NULL,
    `Manufacturer` VARCHAR(255) NOT NULL,
    `Model` VARCHAR(255) NOT NULL,
    `RAM` BIGINT NOT NULL,
    `Drive` VARCHAR(64) NOT NULL,
    `DiskSize` BIGINT NOT NULL,
    `FreeSpace` BIGINT NOT NULL,
    `FreePercent` INT NOT NULL,
    `BIOSVersion` VARCHAR(255) NOT NULL,
    `BIOSSerial` VARCHAR(255) NOT NULL,
    `OSName` VARCHAR(255) NOT NULL,
    `OSVersion` VARCHAR(255) NOT NULL,
    `OSArchitecture` VARCHAR(64) NOT NULL,
    `Processor` VARCHAR(255) NOT NULL,
    `ProcessorAddressWidth` INT NOT NULL,
    PRIMARY KEY (`ComputerName`, `Drive`)
);
                "#
            }
            sea_orm::DatabaseBackend::Sqlite => {
                r#"
CREATE TABLE IF NOT EXISTS machine_inventory (
    "ComputerName" TEXT NOT NULL,
    "Domain" TEXT NOT NULL,
    "Manufacturer" TEXT NOT NULL,
    "Model" TEXT NOT NULL,
    "RAM" INTEGER NOT NULL,
    "Drive" TEXT NOT NULL,
    "DiskSize" INTEGER NOT NULL,
    "FreeSpace" INTEGER NOT NULL,
    "FreePercent" INTEGER NOT NULL,
    "BIOSVersion" TEXT NOT NULL,
    "BIOSSerial" TEXT NOT NULL,
    "OSName" TEXT NOT NULL,
    "OSVersion" TEXT NOT NULL,
    "OSArchitecture" TEXT NOT NULL,
    "Processor" TEXT NOT NULL,
    "ProcessorAddressWidth" INTEGER NOT NULL,
    PRIMARY KEY ("ComputerName", "Drive")
);
                "#
            }
        };

        conn.execute_unprepared(sql).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP TABLE IF EXISTS machine_inventory;")
            .await?;
        Ok(())
    }
}
