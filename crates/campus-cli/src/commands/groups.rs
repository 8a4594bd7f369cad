use anyhow::Result;
use std::path::Path;

use campus_rbac::{CampusConfig, PermissionGroup, classify};

use crate::input::load_permissions;

pub fn run(base_dir: &Path, permissions_path: &Path, filter: &str, json: bool) -> Result<()> {
    let config = CampusConfig::load_or_default(&CampusConfig::default_path(base_dir))?;
    let permissions = load_permissions(permissions_path)?;
    let groups = classify(&permissions, &config.templates()?, filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("No permissions found.");
        return Ok(());
    }
    print!("{}", render(&groups));
    Ok(())
}

fn render(groups: &[PermissionGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("{} [{}]\n", group.title, group.key));
        for item in &group.items {
            let subtitle = item.subtitle.as_deref().unwrap_or("");
            out.push_str(&format!(
                "  {:<8} {:<24} {:<28} {}\n",
                item.id, item.display_name, subtitle, item.name
            ));
        }
    }
    out
}
