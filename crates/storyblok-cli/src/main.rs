use std::process;

use clap::{Parser, Subcommand};

mod commands;

/// storyblok: Schema migration tool for Storyblok spaces.
///
/// List, inspect, and migrate component definitions between spaces
/// through the Management API.
#[derive(Parser)]
#[command(name = "storyblok", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the components of a space.
    Components {
        /// Path to the migration job file.
        #[arg(short, long, default_value = "storyblok.toml")]
        config: String,

        /// Read the target space instead of the source.
        #[arg(long)]
        target: bool,
    },

    /// Show one component's fields and resolved dependencies.
    Inspect {
        /// Component name.
        name: String,

        /// Path to the migration job file.
        #[arg(short, long, default_value = "storyblok.toml")]
        config: String,

        /// Inspect the target space instead of the source.
        #[arg(long)]
        target: bool,
    },

    /// Migrate a component and its dependencies into the target space.
    Migrate {
        /// Component name to migrate.
        name: String,

        /// Path to the migration job file.
        #[arg(short, long, default_value = "storyblok.toml")]
        config: String,

        /// Migrate only the named component, not its dependencies.
        #[arg(long)]
        skip_children: bool,

        /// Show what would be written without writing anything.
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Components { config, target } => commands::components(&config, target),
        Commands::Inspect {
            name,
            config,
            target,
        } => commands::inspect(&config, &name, target),
        Commands::Migrate {
            name,
            config,
            skip_children,
            dry_run,
        } => commands::migrate(&config, &name, skip_children, dry_run),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
