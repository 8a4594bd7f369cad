use anyhow::Result;
use std::path::Path;

use campus_rbac::{AccessContext, Requirement};

use crate::input::{load_hierarchy, load_user};

pub fn run(user_path: &Path, hierarchy_path: Option<&Path>, permissions: &[String]) -> Result<()> {
    let user = load_user(user_path)?;
    let hierarchy = load_hierarchy(hierarchy_path)?;
    let access = AccessContext::from_user(&user, hierarchy);

    let required = requirement(permissions);
    tracing::debug!(
        granted = access.granted.len(),
        hierarchy = access.hierarchy.len(),
        "checking permissions"
    );

    match access.require(required.as_ref()) {
        Ok(()) => {
            match &required {
                Some(r) => println!("allowed: {r}"),
                None => println!("allowed: no permission required"),
            }
            Ok(())
        }
        Err(e) => {
            println!("denied: {}", required.map(|r| r.to_string()).unwrap_or_default());
            Err(e.into())
        }
    }
}

fn requirement(permissions: &[String]) -> Option<Requirement> {
    match permissions {
        [] => None,
        [one] => Some(Requirement::One(one.clone())),
        many => Some(Requirement::AnyOf(many.to_vec())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture(tmp: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
        let user = tmp.path().join("user.json");
        std::fs::write(&user, r#"{"user": {"id": 1, "permissions": ["sessions.manage"]}}"#).unwrap();
        let hierarchy = tmp.path().join("hierarchy.json");
        std::fs::write(
            &hierarchy,
            r#"[{"name": "sessions.manage", "children": ["sessions.view"]}]"#,
        )
        .unwrap();
        (user, hierarchy)
    }

    #[test]
    fn implied_permission_is_allowed() {
        let tmp = TempDir::new().unwrap();
        let (user, hierarchy) = fixture(&tmp);
        assert!(run(&user, Some(hierarchy.as_path()), &["sessions.view".into()]).is_ok());
        assert!(run(&user, Some(hierarchy.as_path()), &[]).is_ok());
    }

    #[test]
    fn missing_permission_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let (user, _) = fixture(&tmp);
        let err = run(&user, None, &["sessions.view".into()]).unwrap_err();
        assert!(err.to_string().contains("sessions.view"));
    }

    #[test]
    fn arguments_become_alternatives() {
        assert_eq!(requirement(&[]), None);
        assert_eq!(requirement(&["a".into()]), Some(Requirement::One("a".into())));
        assert_eq!(
            requirement(&["a".into(), "b".into()]),
            Some(Requirement::AnyOf(vec!["a".into(), "b".into()]))
        );
    }
}
