use std::collections::BTreeSet;

use storyblok_mapi::{ComponentId, ComponentListing};

use crate::resolver::{resolve_dependencies, DependencyNode};
use crate::MigrateError;

/// What a migration will do for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// No component of this name exists in the target; a new definition
    /// is created and the target assigns its id.
    Create,
    /// The target already defines this name; its copy is overwritten in
    /// place, whether or not the content differs.
    Update {
        /// Target-space-local id the write is addressed to.
        id: ComponentId,
    },
}

/// One step of a migration plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    /// Component name, looked up in the source listing at execution.
    pub name: String,
    /// Create or update, decided from the target listing.
    pub action: PlannedAction,
}

/// An ordered migration plan computed from two listing snapshots.
///
/// Steps run children before parents and each component of the
/// dependency closure appears exactly once; the root is always last.
/// The plan is pure data, which is what makes dry runs possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPlan {
    steps: Vec<PlannedStep>,
}

impl MigrationPlan {
    /// The steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Compute the migration plan for `root_name`.
///
/// The root is looked up first; a missing root fails before any other
/// work. With `include_children` the root's dependency tree is resolved
/// next, so unknown children and cycles also surface here, before a
/// single write is planned. Without it the plan holds only the root and
/// references are not checked at all.
pub fn plan_migration(
    source: &ComponentListing,
    target: &ComponentListing,
    root_name: &str,
    include_children: bool,
) -> Result<MigrationPlan, MigrateError> {
    let root = match source.find_by_name(root_name) {
        Some(root) => root,
        None => {
            return Err(MigrateError::RootNotFound {
                name: root_name.to_string(),
            })
        }
    };

    let mut steps = Vec::new();
    let mut planned = BTreeSet::new();

    if include_children {
        let tree = resolve_dependencies(source, root)?;
        plan_children(&tree, target, &mut steps, &mut planned);
    }
    plan_step(&root.name, target, &mut steps, &mut planned);

    Ok(MigrationPlan { steps })
}

fn plan_children(
    nodes: &[DependencyNode],
    target: &ComponentListing,
    steps: &mut Vec<PlannedStep>,
    planned: &mut BTreeSet<String>,
) {
    for node in nodes {
        plan_children(&node.nested, target, steps, planned);
        plan_step(&node.name, target, steps, planned);
    }
}

fn plan_step(
    name: &str,
    target: &ComponentListing,
    steps: &mut Vec<PlannedStep>,
    planned: &mut BTreeSet<String>,
) {
    // The visited set turns the tree walk into an exactly-once
    // traversal; shared children are planned on first encounter.
    if !planned.insert(name.to_string()) {
        return;
    }

    let action = match target.find_by_name(name).and_then(|c| c.id) {
        Some(id) => PlannedAction::Update { id },
        None => PlannedAction::Create,
    };
    steps.push(PlannedStep {
        name: name.to_string(),
        action,
    });
}
