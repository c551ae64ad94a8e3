//! Projects: named collections of package identifiers.
//!
//! The `base` project carries the packages every build environment gets; it
//! is implicitly added to every selection by the resolver and hidden from
//! pattern expansion, since it is an implementation detail rather than
//! something a caller selects.

pub mod yaml;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::pattern::{self, PatternError};

/// Name of the implicitly-selected project.
pub const BASE_PROJECT: &str = "base";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    #[error("Unknown project {0}")]
    UnknownProject(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

#[derive(Debug, Clone, Default)]
pub struct Projects {
    packages: BTreeMap<String, Vec<String>>,
}

impl Projects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, S>(&mut self, name: impl Into<String>, packages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages
            .insert(name.into(), packages.into_iter().map(Into::into).collect());
    }

    /// The package identifiers of one project.
    pub fn packages(&self, name: &str) -> Result<&[String], ProjectError> {
        self.packages
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ProjectError::UnknownProject(name.to_string()))
    }

    /// Selectable project names, i.e. everything except `base`.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages
            .keys()
            .map(String::as_str)
            .filter(|name| *name != BASE_PROJECT)
    }

    /// Expand a comma-separated glob selection over the selectable projects.
    pub fn expand_pattern(&self, selection: &str) -> Result<Vec<String>, ProjectError> {
        Ok(pattern::expand(selection, self.names(), "project")?)
    }
}
