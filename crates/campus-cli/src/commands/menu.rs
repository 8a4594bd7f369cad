use anyhow::Result;
use std::path::Path;

use campus_rbac::{AccessContext, CampusConfig, MenuGate, RoleSet};

use crate::input::{load_hierarchy, load_menu, load_user};

pub fn run(
    base_dir: &Path,
    menu_path: &Path,
    user_path: &Path,
    hierarchy_path: Option<&Path>,
) -> Result<()> {
    let config = CampusConfig::load_or_default(&CampusConfig::default_path(base_dir))?;
    let body = load_user(user_path)?;
    let access = AccessContext::from_user(&body, load_hierarchy(hierarchy_path)?);
    let roles = body.user.as_ref().map(RoleSet::from_user).unwrap_or_default();

    let gate = MenuGate::new(&access, roles).with_admin_roles(config.rbac.admin_roles.clone());
    let sections = gate.visible_sections(&load_menu(menu_path)?);

    if sections.is_empty() {
        println!("No menu entries visible.");
        return Ok(());
    }
    for section in &sections {
        println!("{}", section.label);
        for link in &section.links {
            println!("  {:<28} {}", link.label, link.href);
        }
    }
    Ok(())
}
