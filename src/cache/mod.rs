use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use tokio::sync::RwLock;

use crate::navigation::NavigationContext;
use crate::utils::normalize_switch_id;

const PORT_KEY_PREFIX: &str = "port_";

/// Cache key for a switch port: `port_<normalizedSwitchId>_<portNumber>`
pub fn port_cache_key(switch_id: &str, port_number: &str) -> String {
    format!(
        "{}{}_{}",
        PORT_KEY_PREFIX,
        normalize_switch_id(switch_id),
        port_number
    )
}

/// Cache key for the port a page was opened for
pub fn build_cache_key(ctx: &NavigationContext) -> String {
    port_cache_key(&ctx.switch_name, &ctx.port_number)
}

/// Read access to cached port detail blobs.
///
/// Values are returned exactly as stored; decoding is the reader's job.
#[async_trait]
pub trait PortCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

/// MemoryPortCache keeps entries in a process-local map
#[cfg(test)]
#[derive(Default)]
pub struct MemoryPortCache {
    entries: RwLock<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryPortCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().await.insert(key.into(), value.into());
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
#[async_trait]
impl PortCache for MemoryPortCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }
}
