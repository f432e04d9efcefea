//! # Storage
//!
//! The dataset is loaded and saved as a whole. `Repository` is the seam the
//! services depend on; `KidStore` layers kid lookup and record mapping on top.

pub mod json_repository;
pub mod kid_store;
pub mod memory_repository;
pub mod traits;

pub use json_repository::JsonFileRepository;
pub use kid_store::KidStore;
pub use memory_repository::MemoryRepository;
pub use traits::Repository;
