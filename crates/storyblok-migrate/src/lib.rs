//! # storyblok-migrate
//!
//! Component schema migration between Storyblok spaces.
//!
//! Given a component name and two spaces, this crate resolves every
//! component the named one transitively references through restricted
//! `bloks` fields, plans an ordered set of writes (children before
//! parents, each component exactly once), and replicates the
//! definitions into the target space: created where the name is new,
//! overwritten where it already exists.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use storyblok_mapi::{Component, MemorySpace, SpaceStore};
//! use storyblok_migrate::{migrate_component, MigrationOptions};
//!
//! let hero: Component = serde_json::from_value(json!({
//!     "name": "hero",
//!     "schema": { "headline": { "type": "text" } },
//! })).unwrap();
//! let page: Component = serde_json::from_value(json!({
//!     "name": "page",
//!     "schema": {
//!         "body": {
//!             "type": "bloks",
//!             "restrict_components": true,
//!             "component_whitelist": ["hero"],
//!         },
//!     },
//! })).unwrap();
//!
//! let source = MemorySpace::with_components(vec![hero, page]);
//! let mut target = MemorySpace::new();
//!
//! let report =
//!     migrate_component(&source, &mut target, "page", &MigrationOptions::default()).unwrap();
//! assert_eq!(report.steps().len(), 2);
//!
//! // The child lands before the root.
//! let listing = target.fetch_components().unwrap();
//! assert_eq!(listing.components[0].name, "hero");
//! assert_eq!(listing.components[1].name, "page");
//! ```

mod config;
mod migrate;
mod plan;
mod resolver;

pub use config::{ConfigError, MigrationConfig, SpaceConfig};
pub use migrate::{execute_plan, migrate_component, MigrationOptions, MigrationReport};
pub use plan::{plan_migration, MigrationPlan, PlannedAction, PlannedStep};
pub use resolver::{resolve_dependencies, DependencyNode, ResolveError};

use std::fmt;

use storyblok_mapi::ApiError;

/// Error from planning or executing a migration.
#[derive(Debug, Clone, PartialEq)]
pub enum MigrateError {
    /// The requested root component does not exist in the source space.
    RootNotFound {
        /// The name that was asked for.
        name: String,
    },
    /// The source schema could not be resolved into a dependency tree.
    Resolve(ResolveError),
    /// A Management API call failed. Whatever was already written stays
    /// written; there is no rollback.
    Api(ApiError),
}

impl fmt::Display for MigrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { name } => {
                write!(f, "component '{name}' not found in the source space")
            }
            Self::Resolve(e) => write!(f, "{e}"),
            Self::Api(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MigrateError {}

impl From<ResolveError> for MigrateError {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

impl From<ApiError> for MigrateError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}
