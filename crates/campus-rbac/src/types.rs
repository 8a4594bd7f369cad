use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier (permissions, roles, users), unique within a school.
///
/// The backend hands these out as integers; some payloads quote them. Both
/// forms normalise to the same string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Unsigned(u64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Self(n.to_string()),
            Raw::Unsigned(n) => Self(n.to_string()),
            Raw::Float(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: RecordId,
    /// Dotted name, e.g. `students.view`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Permission {
    pub fn new(id: impl Into<RecordId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionHierarchyNode {
    pub name: String,
    /// Permission names implied by holding `name`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Legacy single-role field some accounts still carry.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<UserRole>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
}

/// Body of the "current user" endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUserResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl AuthenticatedUserResponse {
    /// Top-level `permissions` win over the ones nested in `user`.
    pub fn granted_permissions(&self) -> Vec<String> {
        if let Some(perms) = &self.permissions {
            return perms.clone();
        }
        self.user
            .as_ref()
            .map(|u| u.permissions.clone())
            .unwrap_or_default()
    }
}

/// A display bucket produced by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGroup {
    pub key: String,
    pub title: String,
    pub items: Vec<PermissionGroupItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGroupItem {
    pub id: RecordId,
    pub name: String,
    pub display_name: String,
    pub subtitle: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_id_accepts_numbers_and_strings() {
        let perms: Vec<Permission> = serde_json::from_str(
            r#"[{"id": 7, "name": "students.view"}, {"id": "a-9", "name": "fees.view"}]"#,
        )
        .unwrap();
        assert_eq!(perms[0].id.as_str(), "7");
        assert_eq!(perms[1].id.as_str(), "a-9");
        assert!(perms[0].description.is_none());
    }

    #[test]
    fn large_unsigned_id_is_exact() {
        let p: Permission =
            serde_json::from_str(r#"{"id": 18446744073709551615, "name": "fees.view"}"#).unwrap();
        assert_eq!(p.id.as_str(), "18446744073709551615");
    }

    #[test]
    fn null_name_becomes_empty() {
        let p: Permission = serde_json::from_str(r#"{"id": 1, "name": null}"#).unwrap();
        assert_eq!(p.name, "");
    }

    #[test]
    fn hierarchy_node_without_children() {
        let nodes: Vec<PermissionHierarchyNode> =
            serde_json::from_str(r#"[{"name": "a"}, {"name": "b", "children": null}]"#).unwrap();
        assert!(nodes.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn granted_permissions_prefers_top_level() {
        let body: AuthenticatedUserResponse = serde_json::from_str(
            r#"{"user": {"id": 1, "permissions": ["students.view"]}, "permissions": ["fees.view"]}"#,
        )
        .unwrap();
        assert_eq!(body.granted_permissions(), vec!["fees.view".to_string()]);

        let body: AuthenticatedUserResponse =
            serde_json::from_str(r#"{"user": {"id": 1, "permissions": ["students.view"]}}"#)
                .unwrap();
        assert_eq!(body.granted_permissions(), vec!["students.view".to_string()]);

        assert!(AuthenticatedUserResponse::default()
            .granted_permissions()
            .is_empty());
    }
}
