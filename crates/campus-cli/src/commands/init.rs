use anyhow::{Result, bail};
use std::path::Path;

use campus_rbac::CampusConfig;

pub fn run(base_dir: &Path, force: bool) -> Result<()> {
    let config_path = CampusConfig::default_path(base_dir);
    if config_path.exists() && !force {
        bail!(
            "config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    let config = CampusConfig::default_config()?;
    config.save(&config_path)?;

    println!("Wrote {}", config_path.display());
    println!(
        "  {} permission templates, admin roles: {}",
        config.templates()?.len(),
        config.rbac.admin_roles.join(", ")
    );
    Ok(())
}
