//! # Storage Traits
//!
//! Any storage backend able to load and save the whole dataset can stand
//! behind the services.

use anyhow::Result;
use shared::Dataset;

/// Whole-dataset persistence
pub trait Repository: Send + Sync {
    /// Load the current dataset
    fn load(&self) -> Result<Dataset>;

    /// Replace the persisted dataset
    fn save(&self, dataset: &Dataset) -> Result<()>;
}
