//! `fleetscan collect` — query hosts and print the records.

use anyhow::Result;
use colored::Colorize;

use fleetscan_inventory::{HostReport, InventoryPipeline, MachineInfo};

use crate::config::AppConfig;

pub async fn run(config: &AppConfig, hosts: Vec<String>, json: bool) -> Result<()> {
    let hosts = crate::hosts::resolve(hosts)?;
    let provider = crate::provider::build(config.provider);
    let pipeline = InventoryPipeline::with_options(provider, config.pipeline.clone());

    tracing::info!(hosts = hosts.len(), "starting collection");
    let reports = pipeline.collect_all(&hosts).await;

    if json {
        print_json(&reports, hosts.len())?;
    } else {
        print_human(&reports);
    }

    if reports.iter().all(|r| r.outcome.is_err()) {
        anyhow::bail!("no host produced a record");
    }
    Ok(())
}

fn print_json(reports: &[HostReport], hosts_queried: usize) -> Result<()> {
    let records: Vec<&MachineInfo> = reports.iter().filter_map(|r| r.outcome.as_ref().ok()).collect();
    let errors: Vec<serde_json::Value> = reports
        .iter()
        .filter_map(|r| {
            r.outcome.as_ref().err().map(|e| {
                serde_json::json!({ "host": r.host, "error": e.to_string() })
            })
        })
        .collect();
    let output = serde_json::json!({
        "hosts_queried": hosts_queried,
        "records": records,
        "errors": errors,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_human(reports: &[HostReport]) {
    let mut collected = 0usize;
    for report in reports {
        match &report.outcome {
            Ok(record) => {
                collected += 1;
                println!("{}", format_record(record));
            }
            Err(error) => {
                eprintln!("{}", format!("{}: {error}", report.host).red());
            }
        }
    }
    println!();
    let summary = format!("{collected}/{} hosts collected", reports.len());
    if collected == reports.len() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }
}

fn format_record(record: &MachineInfo) -> String {
    format!(
        "{}  {}  {} GB RAM  {} GB disk ({}% free)  {} {}  {}",
        record.computer_name.bold(),
        record.drive,
        record.ram_gb,
        record.disk_size_gb,
        record.free_percent,
        record.os_name,
        record.os_version,
        record.processor,
    )
}
