//! Session-provider selection.

use std::sync::Arc;

use fleetscan_inventory::{LocalSessionProvider, SessionProvider};

use crate::config::ProviderKind;

pub fn build(kind: ProviderKind) -> Arc<dyn SessionProvider> {
    match kind {
        ProviderKind::Local => Arc::new(LocalSessionProvider::new()),
    }
}
