use anyhow::Result;
use std::path::Path;

use campus_rbac::{filter_roles, summarize_permissions};

use crate::input::load_roles;

pub fn run(roles_path: &Path, search: &str) -> Result<()> {
    let roles = filter_roles(&load_roles(roles_path)?, search);

    if roles.is_empty() {
        if search.is_empty() {
            println!("No roles found.");
        } else {
            println!("No roles match your search.");
        }
        return Ok(());
    }

    println!(
        "{:<8} {:<20} {:<32} {:<20} {}",
        "ID", "NAME", "DESCRIPTION", "UPDATED", "PERMISSIONS"
    );
    println!("{}", "-".repeat(110));

    for role in &roles {
        let summary = summarize_permissions(role)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "None".to_string());
        println!(
            "{:<8} {:<20} {:<32} {:<20} {}",
            role.id,
            role.name,
            role.description.as_deref().unwrap_or("-"),
            role.updated_at.as_deref().unwrap_or("-"),
            summary,
        );
    }

    Ok(())
}
