//! `fleetscan persist` — collect and upsert into the relational store.

use std::pin::pin;

use anyhow::Result;
use colored::Colorize;
use futures::StreamExt;

use fleetscan_inventory::InventoryPipeline;
use fleetscan_store::{Store, TableRef};

use crate::config::AppConfig;

pub async fn run(
    config: &AppConfig,
    hosts: Vec<String>,
    dsn: Option<String>,
    table: Option<String>,
) -> Result<()> {
    let hosts = crate::hosts::resolve(hosts)?;

    let mut store_cfg = config.store.clone();
    if let Some(dsn) = dsn {
        store_cfg.dsn = dsn;
    }
    if let Some(table) = table {
        store_cfg.table = TableRef::new(table)?;
    }

    // Connect failure is the one error that aborts the whole run.
    let store = Store::connect(&store_cfg).await?;
    store.migrate().await?;

    tracing::info!(hosts = hosts.len(), table = %store_cfg.table, "starting persistence run");

    let provider = crate::provider::build(config.provider);
    let pipeline = InventoryPipeline::with_options(provider, config.pipeline.clone());

    let mut persisted = 0usize;
    let mut collect_failures = 0usize;
    let mut statement_failures = 0usize;

    let mut stream = pin!(pipeline.collect_stream(&hosts));
    while let Some(report) = stream.next().await {
        match report.outcome {
            Ok(record) => {
                let outcome = store.upsert(&record).await;
                if outcome.is_clean() {
                    persisted += 1;
                    println!(
                        "{}",
                        format!("persisted {} ({})", outcome.host, outcome.drive).green()
                    );
                } else {
                    statement_failures += outcome.errors.len();
                    for error in &outcome.errors {
                        eprintln!("{}", error.to_string().red());
                    }
                }
            }
            Err(error) => {
                collect_failures += 1;
                eprintln!("{}", format!("{}: {error}", report.host).red());
            }
        }
    }

    println!();
    println!(
        "{persisted}/{} hosts persisted ({collect_failures} collection failures, {statement_failures} statement failures)",
        hosts.len()
    );
    Ok(())
}
