//! Common test utilities shared across all ciforge crates.
//!
//! This crate provides standardized fixtures (hosts, projects, mappings)
//! to eliminate duplication while keeping tests readable.

pub mod data_dir;
pub mod fixtures;

// Re-export the most commonly used items for convenience
pub use data_dir::write_data_dir;
pub use fixtures::{
    debian_11_facts, fedora_35_facts, freebsd_13_facts, test_inventory, test_mappings,
    test_projects,
};
