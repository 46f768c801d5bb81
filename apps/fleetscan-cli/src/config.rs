//! Layered application configuration: defaults → YAML file → env.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use fleetscan_inventory::PipelineOptions;
use fleetscan_store::StoreConfig;

/// Which session transport to plug into the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// The machine the process runs on.
    #[default]
    Local,
}

/// Reachability probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Management port probed for liveness.
    pub port: u16,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Also issue one best-effort attribute query per admitted host.
    pub attribute_probe: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            port: 5985,
            timeout: Duration::from_secs(2),
            attribute_probe: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderKind,
    pub pipeline: PipelineOptions,
    pub probe: ProbeConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// # Errors
    /// Fails when the YAML file or an `FLEETSCAN__*` variable does not parse
    /// into the config shape.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed("FLEETSCAN__").split("__"));
        Ok(figment.extract()?)
    }
}
