use std::path::Path;

use serde_json::Value;
use storyblok_mapi::{parse_storyblok_date, HttpSpace, SpaceStore};
use storyblok_migrate::{
    migrate_component, plan_migration, resolve_dependencies, DependencyNode, MigrationConfig,
    MigrationOptions, PlannedAction,
};

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

/// `storyblok components`: list the components of a space.
pub fn components(config_path: &str, use_target: bool) -> Result {
    let config = MigrationConfig::from_path(Path::new(config_path))?;
    let entry = if use_target { &config.target } else { &config.source };
    let label = if use_target { "target" } else { "source" };

    let space = HttpSpace::new(entry.resolve()?);
    let listing = space.fetch_components()?;

    println!("Space {} ({label}, {})", entry.space, entry.region);
    println!();

    if listing.is_empty() {
        println!("  (no components)");
        return Ok(());
    }

    println!("  {:<28} {:>8} {:>8}  {}", "Name", "Id", "Fields", "Created");
    println!("  {}", "-".repeat(58));
    for component in &listing.components {
        let id = component
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let created = component
            .created_at
            .as_deref()
            .and_then(|raw| parse_storyblok_date(raw).ok())
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<28} {:>8} {:>8}  {created}",
            truncate(&component.name, 28),
            id,
            component.field_count(),
        );
    }
    println!();
    println!("  {} component(s)", listing.len());

    Ok(())
}

/// `storyblok inspect <name>`: show one component's fields and its
/// resolved dependency tree.
pub fn inspect(config_path: &str, name: &str, use_target: bool) -> Result {
    let config = MigrationConfig::from_path(Path::new(config_path))?;
    let entry = if use_target { &config.target } else { &config.source };
    let label = if use_target { "target" } else { "source" };

    let space = HttpSpace::new(entry.resolve()?);
    let listing = space.fetch_components()?;

    let component = listing
        .find_by_name(name)
        .ok_or_else(|| format!("component '{name}' not found in the {label} space"))?;

    println!("Component: {}", component.name);
    if let Some(id) = component.id {
        println!("Id: {id}");
    }
    if let Some(raw) = component.created_at.as_deref() {
        if let Ok(ts) = parse_storyblok_date(raw) {
            println!("Created: {} UTC", ts.format("%Y-%m-%d %H:%M:%S"));
        }
    }
    println!();

    if component.schema.is_empty() {
        println!("  (no fields)");
    } else {
        println!("  {:<24} {:<10}  {}", "Field", "Type", "Whitelist");
        println!("  {}", "-".repeat(56));
        for (field_name, definition) in &component.schema {
            let field_type = definition
                .get("type")
                .and_then(|v| v.as_str())
                .unwrap_or("-");
            println!(
                "  {:<24} {:<10}  {}",
                truncate(field_name, 24),
                field_type,
                whitelist_of(definition),
            );
        }
    }
    println!();

    let tree = resolve_dependencies(&listing, component)?;
    if tree.is_empty() {
        println!("No component dependencies.");
    } else {
        println!("Dependencies:");
        print_tree(&tree, 1);
    }

    Ok(())
}

/// `storyblok migrate <name>`: replicate a component and its dependency
/// closure into the target space.
pub fn migrate(config_path: &str, name: &str, skip_children: bool, dry_run: bool) -> Result {
    let config = MigrationConfig::from_path(Path::new(config_path))?;
    let source = HttpSpace::new(config.source.resolve()?);
    let mut target = HttpSpace::new(config.target.resolve()?);

    let options = MigrationOptions {
        include_children: !skip_children,
    };

    if dry_run {
        let source_listing = source.fetch_components()?;
        let target_listing = target.fetch_components()?;
        let plan = plan_migration(
            &source_listing,
            &target_listing,
            name,
            options.include_children,
        )?;

        println!(
            "Dry run: {} write(s) planned for space {}\n",
            plan.len(),
            config.target.space
        );
        for step in plan.steps() {
            match step.action {
                PlannedAction::Create => println!("  create  {}", step.name),
                PlannedAction::Update { id } => println!("  update  {} (id {id})", step.name),
            }
        }
        return Ok(());
    }

    let report = migrate_component(&source, &mut target, name, &options)?;

    for step in report.steps() {
        match step.action {
            PlannedAction::Create => println!("  created  {}", step.name),
            PlannedAction::Update { id } => println!("  updated  {} (id {id})", step.name),
        }
    }
    println!();
    println!(
        "Migrated {} component(s) into space {} ({} created, {} updated)",
        report.steps().len(),
        config.target.space,
        report.created_count(),
        report.updated_count()
    );

    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────────────

fn whitelist_of(definition: &Value) -> String {
    let entries: Vec<&str> = definition
        .get("component_whitelist")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if entries.is_empty() {
        "-".to_string()
    } else {
        entries.join(", ")
    }
}

fn print_tree(nodes: &[DependencyNode], depth: usize) {
    for node in nodes {
        println!("{}{}", "  ".repeat(depth), node.name);
        print_tree(&node.nested, depth + 1);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    // Component and field names are not always ASCII; the cut must land
    // on a char boundary.
    let mut end = max.saturating_sub(3);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate("hero", 28), "hero");
    }

    #[test]
    fn truncate_shortens_to_the_column_width() {
        let name = "a".repeat(40);
        let shortened = truncate(&name, 28);
        assert_eq!(shortened.len(), 28);
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn truncate_never_splits_a_multi_byte_character() {
        // Two bytes per char, so a naive byte cut would panic here.
        let name = "é".repeat(17);
        assert_eq!(truncate(&name, 16), format!("{}...", "é".repeat(6)));
    }
}
