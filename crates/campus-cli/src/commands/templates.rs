use anyhow::Result;
use std::path::Path;

use campus_rbac::{CampusConfig, Matcher};

pub fn run(base_dir: &Path) -> Result<()> {
    let config_path = CampusConfig::default_path(base_dir);
    let config = CampusConfig::load_or_default(&config_path)?;
    let templates = config.templates()?;

    if config.templates.is_some() {
        println!("Templates from {}:", config_path.display());
    } else {
        println!("Built-in templates:");
    }
    println!();

    for t in &templates {
        println!("  {} ({})", t.title, t.key);
        for section in &t.sections {
            println!("    [{}] {}", section.label, join(&section.patterns));
        }
        if !t.patterns.is_empty() {
            let label = if t.sections.is_empty() { "*" } else { "Other" };
            println!("    [{label}] {}", join(&t.patterns));
        }
    }

    println!();
    println!("  Admin roles: {}", config.rbac.admin_roles.join(", "));
    Ok(())
}

fn join(patterns: &[Matcher]) -> String {
    patterns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
