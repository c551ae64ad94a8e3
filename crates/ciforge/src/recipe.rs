//! Build-recipe generation.
//!
//! The generator resolves one host + project selection into a variable map
//! and renders it either as a Dockerfile or as `KEY='VALUE'` environment
//! assignments. The renderers only do string templating over the variable
//! map (and a few host facts); all resolution logic lives in
//! [`crate::resolver`].

mod dockerfile;
mod variables;

use thiserror::Error;

use crate::{
    facts::{Facts, PackagingFormat},
    inventory::{Inventory, InventoryError},
    mapping::Mappings,
    project::{ProjectError, Projects},
    resolver::{PackageResolver, ResolveError},
    varmap::VarMap,
};

/// One recipe request: which host, which projects, which cross target.
#[derive(Debug, Clone)]
pub struct RecipeRequest<'a> {
    pub hosts: &'a str,
    pub projects: &'a str,
    pub cross_arch: Option<&'a str>,
}

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Can't generate a recipe for multiple hosts: {}", matched.join(", "))]
    MultipleHosts { matched: Vec<String> },

    #[error("Host {host} doesn't support {format}-based build recipes")]
    UnsupportedFormat {
        host: String,
        format: PackagingFormat,
    },

    #[error("Host {0} has no container base image defined")]
    MissingBaseImage(String),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

struct Prepared<'a> {
    host: String,
    facts: &'a Facts,
    cross_arch: Option<&'a str>,
    varmap: VarMap,
}

/// Generates build recipes for hosts in an inventory.
pub struct RecipeGenerator<'a> {
    inventory: &'a Inventory,
    projects: &'a Projects,
    mappings: &'a Mappings,
}

impl<'a> RecipeGenerator<'a> {
    #[must_use]
    pub fn new(inventory: &'a Inventory, projects: &'a Projects, mappings: &'a Mappings) -> Self {
        Self {
            inventory,
            projects,
            mappings,
        }
    }

    /// Render a Dockerfile describing a build environment for the host.
    pub fn dockerfile(&self, request: &RecipeRequest<'_>) -> Result<String, RecipeError> {
        let prepared = self.prepare(request)?;

        // Container recipes only make sense for the two Linux packaging
        // formats.
        if prepared.facts.packaging_format() == PackagingFormat::Other {
            return Err(RecipeError::UnsupportedFormat {
                host: prepared.host,
                format: prepared.facts.packaging_format(),
            });
        }

        let base = prepared
            .facts
            .docker_base()
            .ok_or_else(|| RecipeError::MissingBaseImage(prepared.host.clone()))?;

        Ok(dockerfile::render(
            base,
            prepared.facts,
            prepared.cross_arch,
            &prepared.varmap,
        ))
    }

    /// Render the variable map as `KEY='VALUE'` environment assignments.
    pub fn variables(&self, request: &RecipeRequest<'_>) -> Result<String, RecipeError> {
        let prepared = self.prepare(request)?;

        Ok(variables::render(&prepared.varmap))
    }

    /// Resolve a request down to a variable map, without rendering.
    pub fn varmap(&self, request: &RecipeRequest<'_>) -> Result<VarMap, RecipeError> {
        Ok(self.prepare(request)?.varmap)
    }

    fn prepare(&self, request: &RecipeRequest<'a>) -> Result<Prepared<'a>, RecipeError> {
        let mut hosts = self.inventory.expand_pattern(request.hosts)?;
        if hosts.len() > 1 {
            return Err(RecipeError::MultipleHosts { matched: hosts });
        }
        let host = hosts.remove(0);

        let facts = self.inventory.facts(&host)?;
        let selection = self.projects.expand_pattern(request.projects)?;

        let resolver = PackageResolver::new(facts, self.mappings, self.projects);
        let varmap = resolver.resolve(&selection, request.cross_arch)?;

        Ok(Prepared {
            host,
            facts,
            cross_arch: request.cross_arch,
            varmap,
        })
    }
}
