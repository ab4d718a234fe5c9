//! Name pool persistence: a JSON file holding `[{"name": .., "present": ..}]`.

use std::path::Path;

use anyhow::{Context, Result};
use shift_engine::NamePool;

/// Load the pool at `path`. A missing file is an empty pool.
pub fn load(path: &Path) -> Result<NamePool> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "name pool file not found, starting empty");
        return Ok(NamePool::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read name pool: {}", path.display()))?;
    let pool = NamePool::from_json(&json)
        .with_context(|| format!("Failed to parse name pool: {}", path.display()))?;
    tracing::debug!(path = %path.display(), names = pool.len(), "loaded name pool");
    Ok(pool)
}

pub fn save(path: &Path, pool: &NamePool) -> Result<()> {
    let json = pool.to_json().context("Failed to serialize name pool")?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write name pool: {}", path.display()))?;
    tracing::debug!(path = %path.display(), names = pool.len(), "saved name pool");
    Ok(())
}
