//! JSON file repository.
//!
//! The whole dataset lives in one pretty-printed `data.json` file. Writes go
//! to a sibling temp file which is then renamed over the original, so a
//! crash mid-write leaves the previous dataset intact.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use shared::Dataset;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::Repository;

#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Open the repository at `path`, creating the parent directory and a
    /// default dataset file when missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let repository = Self { path: path.into() };
        if !repository.path.exists() {
            repository.save(&Dataset::default())?;
            info!("Created default dataset at {:?}", repository.path);
        }
        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn to_pretty_json(dataset: &Dataset) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        dataset
            .serialize(&mut serializer)
            .context("Failed to serialize dataset")?;
        Ok(buffer)
    }
}

impl Repository for JsonFileRepository {
    fn load(&self) -> Result<Dataset> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read data file {:?}", self.path))?;
        let dataset: Dataset = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse data file {:?}", self.path))?;
        debug!("Loaded {} kids from {:?}", dataset.kids.len(), self.path);
        Ok(dataset)
    }

    fn save(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create data directory {:?}", parent))?;
                info!("Created data directory: {:?}", parent);
            }
        }

        let content = Self::to_pretty_json(dataset)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file {:?}", temp_path))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace data file {:?}", self.path))?;

        debug!("Saved {} kids to {:?}", dataset.kids.len(), self.path);
        Ok(())
    }
}
