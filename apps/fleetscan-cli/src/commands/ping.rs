//! `fleetscan ping` — reachability pre-filter for a host list.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use futures::StreamExt;

use fleetscan_inventory::{ReachabilityFilter, TcpProbe};

use crate::config::AppConfig;

pub async fn run(config: &AppConfig, hosts: Vec<String>, json: bool) -> Result<()> {
    let hosts = crate::hosts::resolve(hosts)?;

    let probe = Arc::new(TcpProbe::new(config.probe.port, config.probe.timeout));
    let mut filter = ReachabilityFilter::new(probe);
    if config.probe.attribute_probe {
        filter = filter.with_attribute_probe(crate::provider::build(config.provider));
    }

    let reachable: Vec<String> = filter.filter(&hosts).collect().await;

    if json {
        let output = serde_json::json!({
            "probed": hosts.len(),
            "reachable": reachable,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for host in &reachable {
            println!("{host}");
        }
        eprintln!(
            "{}",
            format!("{}/{} hosts reachable", reachable.len(), hosts.len()).dimmed()
        );
    }
    Ok(())
}
