// File: ./src/reader.rs
// Loads TickTick export files into raw task records.
use crate::model::TickTickTask;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct WrappedExport {
    tasks: Vec<TickTickTask>,
}

pub struct TickTickExport;

impl TickTickExport {
    /// Parses either a bare JSON array of records or an object with a `tasks` array.
    pub fn from_json_str(json: &str) -> Result<Vec<TickTickTask>> {
        let trimmed = json.trim_start_matches('\u{feff}').trim();

        let parsed = if trimmed.starts_with('[') {
            serde_json::from_str::<Vec<TickTickTask>>(trimmed)
        } else if trimmed.starts_with('{') {
            serde_json::from_str::<WrappedExport>(trimmed).map(|w| w.tasks)
        } else if trimmed.is_empty() {
            anyhow::bail!("Export is empty");
        } else {
            anyhow::bail!("Export is not a JSON array or object");
        };

        parsed.map_err(|e| anyhow::anyhow!("Failed to parse export: {}", e))
    }

    pub fn from_path(path: &Path) -> Result<Vec<TickTickTask>> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read export file '{}'", path.display()))?;
        let tasks = Self::from_json_str(&contents)
            .with_context(|| format!("Invalid export file '{}'", path.display()))?;
        log::info!("Read {} records from {}", tasks.len(), path.display());
        Ok(tasks)
    }
}
