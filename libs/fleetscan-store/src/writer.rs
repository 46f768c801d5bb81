//! Upsert writer: delete any row with the record's key, then insert the row.

use fleetscan_inventory::MachineInfo;
use sea_orm::sea_query::{Alias, Expr, Query, SimpleExpr};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
    TransactionTrait,
};
use sea_orm_migration::MigratorTrait;

use crate::config::{StoreConfig, TableRef, redact_dsn};
use crate::entity::{self, Column};
use crate::error::{PersistenceError, StatementKind, StoreError};
use crate::migrations::Migrator;

/// Result of persisting one record: per-statement failures are captured
/// independently and never abort the surrounding batch.
#[derive(Debug)]
pub struct UpsertOutcome {
    pub host: String,
    pub drive: String,
    /// Rows removed by the delete step (0 on first sight of the key).
    pub rows_deleted: u64,
    pub errors: Vec<PersistenceError>,
}

impl UpsertOutcome {
    fn new(record: &MachineInfo) -> Self {
        Self {
            host: record.computer_name.clone(),
            drive: record.drive.clone(),
            rows_deleted: 0,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn record_failure(&mut self, statement: StatementKind, cause: DbErr) {
        tracing::error!(host = %self.host, %statement, error = %cause, "statement failed");
        self.errors.push(PersistenceError {
            host: self.host.clone(),
            statement,
            cause,
        });
    }
}

/// One shared connection for a whole persistence batch.
pub struct Store {
    conn: DatabaseConnection,
    table: TableRef,
    transactional: bool,
}

impl Store {
    /// Open the batch connection.
    ///
    /// # Errors
    /// [`StoreError::Connect`] — this is the one failure that aborts a whole
    /// persistence run.
    pub async fn connect(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ConnectOptions::new(cfg.dsn.clone());
        options
            .max_connections(cfg.max_connections)
            .connect_timeout(cfg.acquire_timeout)
            .acquire_timeout(cfg.acquire_timeout)
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|source| StoreError::Connect {
                dsn: redact_dsn(&cfg.dsn),
                source,
            })?;
        tracing::info!(dsn = %redact_dsn(&cfg.dsn), table = %cfg.table, "store connected");

        Ok(Self {
            conn,
            table: cfg.table.clone(),
            transactional: cfg.transactional,
        })
    }

    /// Wrap an existing connection (tests, embedders).
    #[must_use]
    pub fn from_connection(conn: DatabaseConnection, table: TableRef, transactional: bool) -> Self {
        Self {
            conn,
            table,
            transactional,
        }
    }

    /// Bring the default schema up to date. The writer itself never creates
    /// schema.
    ///
    /// # Errors
    /// [`StoreError::Migration`] when a migration statement fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(StoreError::Migration)
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Consume the store and hand back the underlying connection (tests,
    /// embedders that need owned access — e.g. a mock connection's
    /// `into_transaction_log`).
    #[must_use]
    pub fn into_connection(self) -> DatabaseConnection {
        self.conn
    }

    /// Persist one record: delete any existing row with the record's
    /// (`ComputerName`, `Drive`), then insert the new row.
    ///
    /// Without `transactional`, the two statements run independently — a
    /// failed delete does not stop the insert, and a failed insert after a
    /// successful delete leaves the row missing (faithful to the source
    /// behavior this writer replaces; opt into `transactional` to close that
    /// gap).
    pub async fn upsert(&self, record: &MachineInfo) -> UpsertOutcome {
        if self.transactional {
            self.upsert_transactional(record).await
        } else {
            self.upsert_plain(record).await
        }
    }

    /// Persist a batch over the shared connection, sequentially and in input
    /// order. A record's failure never aborts the rest.
    pub async fn upsert_all(&self, records: &[MachineInfo]) -> Vec<UpsertOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            outcomes.push(self.upsert(record).await);
        }
        outcomes
    }

    async fn upsert_plain(&self, record: &MachineInfo) -> UpsertOutcome {
        let mut outcome = UpsertOutcome::new(record);

        match exec(&self.conn, self.delete_statement(record)).await {
            Ok(rows) => outcome.rows_deleted = rows,
            Err(cause) => outcome.record_failure(StatementKind::Delete, cause),
        }

        // The insert runs even when the delete failed: there is no
        // transaction to roll back, and each statement is reported on its own.
        match self.insert_statement(record) {
            Ok(stmt) => {
                if let Err(cause) = exec(&self.conn, stmt).await {
                    outcome.record_failure(StatementKind::Insert, cause);
                }
            }
            Err(cause) => outcome.record_failure(StatementKind::Insert, cause),
        }

        outcome
    }

    async fn upsert_transactional(&self, record: &MachineInfo) -> UpsertOutcome {
        let mut outcome = UpsertOutcome::new(record);

        let txn = match self.conn.begin().await {
            Ok(txn) => txn,
            Err(cause) => {
                outcome.record_failure(StatementKind::Transaction, cause);
                return outcome;
            }
        };

        match exec(&txn, self.delete_statement(record)).await {
            Ok(rows) => outcome.rows_deleted = rows,
            Err(cause) => {
                outcome.record_failure(StatementKind::Delete, cause);
                rollback(txn, &mut outcome).await;
                return outcome;
            }
        }

        let insert = match self.insert_statement(record) {
            Ok(stmt) => stmt,
            Err(cause) => {
                outcome.record_failure(StatementKind::Insert, cause);
                rollback(txn, &mut outcome).await;
                return outcome;
            }
        };
        if let Err(cause) = exec(&txn, insert).await {
            outcome.record_failure(StatementKind::Insert, cause);
            rollback(txn, &mut outcome).await;
            return outcome;
        }

        if let Err(cause) = txn.commit().await {
            outcome.record_failure(StatementKind::Transaction, cause);
        }
        outcome
    }

    fn delete_statement(&self, record: &MachineInfo) -> Statement {
        let stmt = Query::delete()
            .from_table(Alias::new(self.table.as_str()))
            .and_where(Expr::col(Column::ComputerName).eq(record.computer_name.as_str()))
            .and_where(Expr::col(Column::Drive).eq(record.drive.as_str()))
            .to_owned();
        self.conn.get_database_backend().build(&stmt)
    }

    fn insert_statement(&self, record: &MachineInfo) -> Result<Statement, DbErr> {
        let values: [SimpleExpr; 16] = [
            record.computer_name.as_str().into(),
            record.domain.as_str().into(),
            record.manufacturer.as_str().into(),
            record.model.as_str().into(),
            entity::gb_to_db(record.ram_gb).into(),
            record.drive.as_str().into(),
            entity::gb_to_db(record.disk_size_gb).into(),
            entity::gb_to_db(record.free_space_gb).into(),
            entity::percent_to_db(record.free_percent).into(),
            record.bios_version.as_str().into(),
            record.bios_serial.as_str().into(),
            record.os_name.as_str().into(),
            record.os_version.as_str().into(),
            record.os_architecture.as_str().into(),
            record.processor.as_str().into(),
            entity::percent_to_db(record.processor_address_width).into(),
        ];

        let mut stmt = Query::insert()
            .into_table(Alias::new(self.table.as_str()))
            .columns([
                Column::ComputerName,
                Column::Domain,
                Column::Manufacturer,
                Column::Model,
                Column::RamGb,
                Column::Drive,
                Column::DiskSizeGb,
                Column::FreeSpaceGb,
                Column::FreePercent,
                Column::BiosVersion,
                Column::BiosSerial,
                Column::OsName,
                Column::OsVersion,
                Column::OsArchitecture,
                Column::Processor,
                Column::ProcessorAddressWidth,
            ])
            .to_owned();
        stmt.values(values)
            .map_err(|e| DbErr::Custom(e.to_string()))?;
        Ok(self.conn.get_database_backend().build(&stmt))
    }
}

async fn exec<C: ConnectionTrait>(conn: &C, stmt: Statement) -> Result<u64, DbErr> {
    conn.execute(stmt).await.map(|res| res.rows_affected())
}

async fn rollback(txn: sea_orm::DatabaseTransaction, outcome: &mut UpsertOutcome) {
    if let Err(cause) = txn.rollback().await {
        outcome.record_failure(StatementKind::Transaction, cause);
    }
}
