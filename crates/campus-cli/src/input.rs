//! Readers for JSON exports of the school backend's endpoints.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use campus_rbac::{
    AuthenticatedUserResponse, MenuSection, Permission, PermissionHierarchy,
    PermissionHierarchyNode, Role,
};

/// List endpoints answer either with a bare array or with a page envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Page { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Page { data } => data,
            Listing::Bare(items) => items,
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {what} from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing {what} from {}", path.display()))
}

fn read_listing<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let items = read_json::<Listing<T>>(path, what)?.into_vec();
    tracing::debug!(count = items.len(), path = %path.display(), "read {what}");
    Ok(items)
}

pub fn load_permissions(path: &Path) -> Result<Vec<Permission>> {
    read_listing(path, "permissions")
}

pub fn load_roles(path: &Path) -> Result<Vec<Role>> {
    read_listing(path, "roles")
}

pub fn load_user(path: &Path) -> Result<AuthenticatedUserResponse> {
    read_json(path, "current user")
}

/// A missing file argument, or a `null` body, is the empty hierarchy.
pub fn load_hierarchy(path: Option<&Path>) -> Result<PermissionHierarchy> {
    let Some(path) = path else {
        return Ok(PermissionHierarchy::default());
    };
    let nodes: Option<Listing<PermissionHierarchyNode>> = read_json(path, "permission hierarchy")?;
    Ok(nodes.map(Listing::into_vec).into())
}

pub fn load_menu(path: &Path) -> Result<Vec<MenuSection>> {
    read_json(path, "menu")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn permissions_bare_or_paged() {
        let tmp = TempDir::new().unwrap();
        let bare = write(&tmp, "bare.json", r#"[{"id": 1, "name": "students.view"}]"#);
        let paged = write(
            &tmp,
            "paged.json",
            r#"{"data": [{"id": 1, "name": "students.view"}], "meta": {"total": 1}}"#,
        );
        assert_eq!(load_permissions(&bare).unwrap(), load_permissions(&paged).unwrap());
    }

    #[test]
    fn hierarchy_absent_or_null_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_hierarchy(None).unwrap().is_empty());
        let null = write(&tmp, "null.json", "null");
        assert!(load_hierarchy(Some(null.as_path())).unwrap().is_empty());
        let nodes = write(&tmp, "h.json", r#"[{"name": "a", "children": ["b"]}]"#);
        assert_eq!(load_hierarchy(Some(nodes.as_path())).unwrap().children_of("a"), &["b".to_string()]);
    }

    #[test]
    fn malformed_file_reports_path() {
        let tmp = TempDir::new().unwrap();
        let bad = write(&tmp, "bad.json", "{");
        let err = load_user(&bad).unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }
}
