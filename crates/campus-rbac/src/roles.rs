//! Role-editor helpers: searching, summarising, and validating role drafts.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{RbacError, Result};
use crate::types::{PermissionGroup, RecordId, Role};

const SUMMARY_PREVIEW: usize = 3;

// Reserved for the built-in roles; ASCII word boundaries.
static SYSTEM_ROLE_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?-u:\b)(super[ _-]?admin|admin)(?-u:\b)")
        .map_err(|e| tracing::error!("failed to compile system role pattern: {e}"))
        .ok()
});

pub fn is_system_role_name(name: &str) -> bool {
    let name = name.trim();
    SYSTEM_ROLE_NAME
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}

/// Roles whose name, description, or any permission name contains `term`,
/// case-insensitively.
pub fn filter_roles(roles: &[Role], term: &str) -> Vec<Role> {
    if term.is_empty() {
        return roles.to_vec();
    }
    let needle = term.to_lowercase();
    roles
        .iter()
        .filter(|role| {
            role.name.to_lowercase().contains(&needle)
                || role
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
                || role
                    .permissions
                    .iter()
                    .any(|p| p.name.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSummary {
    pub preview: Vec<String>,
    pub more: usize,
}

impl fmt::Display for PermissionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview.join(", "))?;
        if self.more > 0 {
            write!(f, " (+{} more)", self.more)?;
        }
        Ok(())
    }
}

/// `None` when the role carries no named permissions.
pub fn summarize_permissions(role: &Role) -> Option<PermissionSummary> {
    let names: Vec<&str> = role
        .permissions
        .iter()
        .map(|p| p.name.as_str())
        .filter(|n| !n.trim().is_empty())
        .collect();
    if names.is_empty() {
        return None;
    }
    Some(PermissionSummary {
        preview: names
            .iter()
            .take(SUMMARY_PREVIEW)
            .map(|n| n.to_string())
            .collect(),
        more: names.len().saturating_sub(SUMMARY_PREVIEW),
    })
}

/// Form state while creating or editing a role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDraft {
    pub name: String,
    pub description: String,
    pub selected: BTreeSet<RecordId>,
}

/// Body of the create/update role request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolePayload {
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<PayloadId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PayloadId {
    Number(i64),
    Text(String),
}

impl From<&RecordId> for PayloadId {
    fn from(id: &RecordId) -> Self {
        match id.as_str().parse::<i64>() {
            Ok(n) => PayloadId::Number(n),
            Err(_) => PayloadId::Text(id.to_string()),
        }
    }
}

impl RoleDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_role(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            selected: role.permissions.iter().map(|p| p.id.clone()).collect(),
        }
    }

    pub fn toggle(&mut self, id: RecordId, checked: bool) {
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    /// Check or uncheck every permission shown in `group`.
    pub fn select_group(&mut self, group: &PermissionGroup, checked: bool) {
        for item in &group.items {
            self.toggle(item.id.clone(), checked);
        }
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn validate(&self) -> Result<RolePayload> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RbacError::InvalidInput("Role name is required.".into()));
        }
        if is_system_role_name(name) {
            return Err(RbacError::InvalidInput(
                "Role name cannot contain 'admin' or 'super_admin'.".into(),
            ));
        }
        let description = self.description.trim();

        let mut permissions: Vec<PayloadId> = self.selected.iter().map(PayloadId::from).collect();
        permissions.sort_by(|a, b| match (a, b) {
            (PayloadId::Number(x), PayloadId::Number(y)) => x.cmp(y),
            (PayloadId::Number(_), PayloadId::Text(_)) => std::cmp::Ordering::Less,
            (PayloadId::Text(_), PayloadId::Number(_)) => std::cmp::Ordering::Greater,
            (PayloadId::Text(x), PayloadId::Text(y)) => x.cmp(y),
        });

        Ok(RolePayload {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            permissions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Permission, PermissionGroupItem};

    fn role(name: &str, perms: &[&str]) -> Role {
        Role {
            id: RecordId::from(1),
            name: name.to_string(),
            description: None,
            permissions: perms
                .iter()
                .enumerate()
                .map(|(i, n)| Permission::new(i as i64 + 10, n))
                .collect(),
            updated_at: None,
        }
    }

    #[test]
    fn system_names_are_rejected() {
        for name in ["admin", "Admin", "Super Admin", "super_admin", "super-admin", "SUPERADMIN", "school admin"] {
            assert!(is_system_role_name(name), "{name}");
        }
        for name in ["teacher", "administrator", "school_admin", "badminton"] {
            assert!(!is_system_role_name(name), "{name}");
        }
    }

    #[test]
    fn search_matches_name_description_and_permission() {
        let mut bursar = role("Bursar", &["fees.manage"]);
        bursar.description = Some("Handles payments".into());
        let teacher = role("Teacher", &["students.view"]);
        let roles = vec![bursar, teacher];

        assert_eq!(filter_roles(&roles, "").len(), 2);
        assert_eq!(filter_roles(&roles, "BURS")[0].name, "Bursar");
        assert_eq!(filter_roles(&roles, "payments")[0].name, "Bursar");
        assert_eq!(filter_roles(&roles, "students.")[0].name, "Teacher");
        assert!(filter_roles(&roles, "nothing").is_empty());
    }

    #[test]
    fn summary_previews_three() {
        let r = role("x", &["a.view", "b.view", " ", "c.view", "d.view", "e.view"]);
        let summary = summarize_permissions(&r).unwrap();
        assert_eq!(summary.to_string(), "a.view, b.view, c.view (+2 more)");

        let short = summarize_permissions(&role("y", &["a.view"])).unwrap();
        assert_eq!(short.to_string(), "a.view");

        assert!(summarize_permissions(&role("z", &[])).is_none());
        assert!(summarize_permissions(&role("z", &["", "  "])).is_none());
    }

    #[test]
    fn draft_from_role_and_toggle() {
        let r = role("Teacher", &["students.view", "profile.view"]);
        let mut draft = RoleDraft::from_role(&r);
        assert_eq!(draft.selected_count(), 2);
        draft.toggle(RecordId::from(10), false);
        draft.toggle(RecordId::from("abc"), true);
        assert!(!draft.is_selected(&RecordId::from(10)));
        assert!(draft.is_selected(&RecordId::from("abc")));
    }

    #[test]
    fn select_whole_group() {
        let group = PermissionGroup {
            key: "student".into(),
            title: "Student".into(),
            items: vec![
                PermissionGroupItem {
                    id: RecordId::from(3),
                    name: "students.view".into(),
                    display_name: "View".into(),
                    subtitle: Some("Students".into()),
                },
                PermissionGroupItem {
                    id: RecordId::from(4),
                    name: "students.create".into(),
                    display_name: "Create".into(),
                    subtitle: Some("Students".into()),
                },
            ],
        };
        let mut draft = RoleDraft::new();
        draft.select_group(&group, true);
        assert_eq!(draft.selected_count(), 2);
        draft.select_group(&group, false);
        assert_eq!(draft.selected_count(), 0);
    }

    #[test]
    fn validate_trims_and_orders_ids() {
        let mut draft = RoleDraft::new();
        draft.name = "  Bursar ".into();
        draft.description = "   ".into();
        for id in ["12", "3", "x-1"] {
            draft.toggle(RecordId::from(id), true);
        }
        let payload = draft.validate().unwrap();
        assert_eq!(payload.name, "Bursar");
        assert_eq!(payload.description, None);
        assert_eq!(
            serde_json::to_value(&payload.permissions).unwrap(),
            serde_json::json!([3, 12, "x-1"])
        );
    }

    #[test]
    fn validate_rejects_blank_and_reserved_names() {
        let mut draft = RoleDraft::new();
        draft.name = "   ".into();
        assert!(matches!(draft.validate(), Err(RbacError::InvalidInput(ref m)) if m == "Role name is required."));
        draft.name = "Super Admin".into();
        assert!(matches!(draft.validate(), Err(RbacError::InvalidInput(_))));
    }
}
