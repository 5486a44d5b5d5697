use std::fmt;

use storyblok_mapi::{Component, ComponentListing};

/// One component in a resolved dependency tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    /// Component name.
    pub name: String,
    /// This component's own dependencies, one node per distinct name.
    pub nested: Vec<DependencyNode>,
}

/// Error during dependency resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A restricted field references a component the space does not
    /// define. The schema is inconsistent; migrating it would plant
    /// dangling references in the target.
    UnknownComponent {
        /// The missing component.
        name: String,
        /// The component whose whitelist names it.
        referenced_by: String,
    },
    /// Components reference each other in a loop.
    Cycle {
        /// The reference chain, ending with the repeated name.
        path: Vec<String>,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownComponent { name, referenced_by } => write!(
                f,
                "component '{referenced_by}' references '{name}', which does not exist in the space"
            ),
            Self::Cycle { path } => {
                write!(f, "component references form a cycle: {}", path.join(" -> "))
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolve the full dependency tree of `component` against `listing`.
///
/// Children come from restricted `bloks` fields
/// ([`Component::referenced_components`]); each distinct name appears
/// once per level, in name order. A component reachable through several
/// sibling branches is expanded in each branch. A component referencing
/// one of its own ancestors is a cycle and fails resolution, so the
/// traversal always terminates.
///
/// Resolution only reads `listing`; nothing is written anywhere.
pub fn resolve_dependencies(
    listing: &ComponentListing,
    component: &Component,
) -> Result<Vec<DependencyNode>, ResolveError> {
    let mut path = vec![component.name.clone()];
    resolve_level(listing, component, &mut path)
}

fn resolve_level(
    listing: &ComponentListing,
    component: &Component,
    path: &mut Vec<String>,
) -> Result<Vec<DependencyNode>, ResolveError> {
    let mut nodes = Vec::new();

    for name in component.referenced_components() {
        if path.contains(&name) {
            let mut cycle = path.clone();
            cycle.push(name);
            return Err(ResolveError::Cycle { path: cycle });
        }

        let child = match listing.find_by_name(&name) {
            Some(child) => child,
            None => {
                return Err(ResolveError::UnknownComponent {
                    name,
                    referenced_by: component.name.clone(),
                })
            }
        };

        path.push(name.clone());
        let nested = resolve_level(listing, child, path)?;
        path.pop();

        nodes.push(DependencyNode { name, nested });
    }

    Ok(nodes)
}
