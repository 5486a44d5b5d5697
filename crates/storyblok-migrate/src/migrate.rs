use storyblok_mapi::{ComponentListing, SpaceStore};

use crate::plan::{plan_migration, MigrationPlan, PlannedAction, PlannedStep};
use crate::MigrateError;

/// Options for a migration run.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Migrate the root's dependency closure along with the root.
    /// When false, only the named component is written and its
    /// references are not even checked.
    pub include_children: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            include_children: true,
        }
    }
}

/// Record of a completed migration run: every write that was performed,
/// in execution order.
///
/// A run that fails partway returns an error instead; there is no
/// partial report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    steps: Vec<PlannedStep>,
}

impl MigrationReport {
    /// The writes, in the order they happened.
    #[must_use]
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Number of components created.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.action, PlannedAction::Create))
            .count()
    }

    /// Number of components updated.
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.steps.len() - self.created_count()
    }
}

/// Migrate `root_name` and (by default) its dependency closure from
/// `source` into `target`.
///
/// Both listings are fetched exactly once, up front, and the whole run
/// plans and writes against those snapshots. Schema changes made in
/// either space while the run executes are not observed until a rerun,
/// and concurrent runs against one target are not coordinated here.
///
/// Writes happen children before parents with the root last, so the
/// target never holds a parent whose children are missing. Every
/// failure path that is detectable up front (missing root, unknown
/// child, reference cycle) fires before the first write. A failed write
/// aborts the run immediately; whatever was already written stays
/// written.
pub fn migrate_component<S, T>(
    source: &S,
    target: &mut T,
    root_name: &str,
    options: &MigrationOptions,
) -> Result<MigrationReport, MigrateError>
where
    S: SpaceStore,
    T: SpaceStore,
{
    let source_listing = source.fetch_components()?;
    let target_listing = target.fetch_components()?;

    let plan = plan_migration(
        &source_listing,
        &target_listing,
        root_name,
        options.include_children,
    )?;
    execute_plan(&source_listing, target, &plan)
}

/// Execute an already-computed plan against `target`.
///
/// `source_listing` must be the snapshot the plan was computed from;
/// every planned name was found in it during planning.
pub fn execute_plan<T: SpaceStore>(
    source_listing: &ComponentListing,
    target: &mut T,
    plan: &MigrationPlan,
) -> Result<MigrationReport, MigrateError> {
    let mut performed = Vec::with_capacity(plan.len());

    for step in plan.steps() {
        let definition = match source_listing.find_by_name(&step.name) {
            Some(definition) => definition,
            None => {
                return Err(MigrateError::RootNotFound {
                    name: step.name.clone(),
                })
            }
        };

        match step.action {
            PlannedAction::Create => {
                target.create_component(definition)?;
            }
            PlannedAction::Update { id } => {
                target.update_component(id, definition)?;
            }
        }
        performed.push(step.clone());
    }

    Ok(MigrationReport { steps: performed })
}
