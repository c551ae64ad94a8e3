//! Host inventory: per-host facts, keyed by host name.

pub mod yaml;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    facts::Facts,
    pattern::{self, PatternError},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Unknown host {0}")]
    UnknownHost(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    hosts: BTreeMap<String, Facts>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, host: impl Into<String>, facts: Facts) {
        self.hosts.insert(host.into(), facts);
    }

    pub fn facts(&self, host: &str) -> Result<&Facts, InventoryError> {
        self.hosts
            .get(host)
            .ok_or_else(|| InventoryError::UnknownHost(host.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hosts.keys().map(String::as_str)
    }

    /// Expand a comma-separated glob selection over the known hosts.
    pub fn expand_pattern(&self, selection: &str) -> Result<Vec<String>, InventoryError> {
        Ok(pattern::expand(selection, self.names(), "host")?)
    }
}
