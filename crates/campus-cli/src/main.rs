mod commands;
mod input;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Inspect school roles, permissions, and permission hierarchies")]
#[command(version)]
struct Cli {
    /// Path to the campus config directory (default: ~/.campus)
    #[arg(long, global = true, env = "CAMPUS_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default campus.toml with the built-in permission templates
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the permission group templates in effect
    Templates,

    /// Group a permission list the way the role editor shows it
    Groups {
        /// JSON export of the permission list (array or `{ "data": [...] }`)
        permissions: PathBuf,
        /// Only keep permissions whose name or description contains this
        #[arg(long, default_value = "")]
        filter: String,
        /// Print the groups as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether the current user satisfies a permission requirement
    Check {
        /// JSON body of the current-user endpoint
        #[arg(long)]
        user: PathBuf,
        /// JSON export of the permission hierarchy
        #[arg(long)]
        hierarchy: Option<PathBuf>,
        /// Required permissions; any one suffices. None means unrestricted.
        permissions: Vec<String>,
    },

    /// List roles with a summary of their permissions
    Roles {
        /// JSON export of the role list (array or `{ "data": [...] }`)
        roles: PathBuf,
        /// Only show roles matching this term
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show the navigation sections visible to the current user
    Menu {
        /// JSON menu definition: a list of sections with links
        menu: PathBuf,
        /// JSON body of the current-user endpoint
        #[arg(long)]
        user: PathBuf,
        /// JSON export of the permission hierarchy
        #[arg(long)]
        hierarchy: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("campus=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => campus_rbac::CampusConfig::default_base_dir()?,
    };

    match cli.command {
        Commands::Init { force } => commands::init::run(&base_dir, force),
        Commands::Templates => commands::templates::run(&base_dir),
        Commands::Groups {
            ref permissions,
            ref filter,
            json,
        } => commands::groups::run(&base_dir, permissions, filter, json),
        Commands::Check {
            ref user,
            ref hierarchy,
            ref permissions,
        } => commands::check::run(user, hierarchy.as_deref(), permissions),
        Commands::Roles {
            ref roles,
            ref search,
        } => commands::roles::run(roles, search),
        Commands::Menu {
            ref menu,
            ref user,
            ref hierarchy,
        } => commands::menu::run(&base_dir, menu, user, hierarchy.as_deref()),
    }
}
