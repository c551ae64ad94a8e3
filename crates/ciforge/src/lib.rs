//! ciforge - CI build-environment recipe generation
//!
//! The `ciforge` library resolves abstract package requirements (a C
//! compiler, a Python interpreter) into the concrete package names a
//! specific operating system, packaging format, and optionally a foreign
//! target architecture need, then renders the resolved set as a Dockerfile
//! or as environment-variable assignments.
//!
//! # Main Components
//!
//! - [`resolver`] - The package-set resolver, the core of the crate
//! - [`keychain`] - Ordered lookup-key chains with last-match-wins semantics
//! - [`mapping`] - The package-name mapping registries
//! - [`cross`] - Cross-compilation policy and feasibility rules
//! - [`inventory`] / [`project`] - Host facts and project catalogs
//! - [`recipe`] - Dockerfile and shell-variable renderers
//! - [`fs`] - File system abstraction used by the on-disk loaders
//!
//! # Example
//!
//! ```no_run
//! use ciforge::{
//!     inventory::Inventory,
//!     mapping::Mappings,
//!     project::Projects,
//!     recipe::{RecipeGenerator, RecipeRequest},
//! };
//!
//! let inventory = Inventory::new();
//! let projects = Projects::new();
//! let mappings = Mappings::default();
//!
//! let generator = RecipeGenerator::new(&inventory, &projects, &mappings);
//! let output = generator.variables(&RecipeRequest {
//!     hosts: "debian-11",
//!     projects: "all",
//!     cross_arch: None,
//! });
//! ```

pub mod arch;
pub mod cross;
pub mod facts;
pub mod fs;
pub mod inventory;
pub mod keychain;
pub mod mapping;
pub mod pattern;
pub mod project;
pub mod recipe;
pub mod resolver;
pub mod varmap;
