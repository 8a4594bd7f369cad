use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::permissions::{AccessContext, Requirement};
use crate::types::User;

pub const DEFAULT_ADMIN_ROLES: &[&str] = &["admin", "superadmin", "administrator"];

/// A role name or a list of role names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuLink {
    #[serde(default)]
    pub id: Option<String>,
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub required_permissions: Option<Requirement>,
    #[serde(default)]
    pub required_roles: Option<OneOrMany>,
    #[serde(default)]
    pub exclude_roles: Option<OneOrMany>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    pub links: Vec<MenuLink>,
}

/// Lower-cased role names held by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(HashSet<String>);

impl RoleSet {
    pub fn from_user(user: &User) -> Self {
        let mut roles = HashSet::new();
        if let Some(role) = user.role.as_deref().map(str::trim) {
            if !role.is_empty() {
                roles.insert(role.to_lowercase());
            }
        }
        for role in &user.roles {
            if !role.name.is_empty() {
                roles.insert(role.name.to_lowercase());
            }
        }
        Self(roles)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(&role.to_lowercase())
    }

    pub fn contains_any(&self, roles: &[String]) -> bool {
        roles.iter().any(|r| self.contains(r))
    }
}

impl<S: AsRef<str>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|r| r.as_ref().to_lowercase()).collect())
    }
}

/// Decides which navigation links a user gets to see.
pub struct MenuGate<'a> {
    access: &'a AccessContext,
    roles: RoleSet,
    admin_roles: Vec<String>,
}

impl<'a> MenuGate<'a> {
    pub fn new(access: &'a AccessContext, roles: RoleSet) -> Self {
        Self {
            access,
            roles,
            admin_roles: DEFAULT_ADMIN_ROLES.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn with_admin_roles(mut self, admin_roles: Vec<String>) -> Self {
        self.admin_roles = admin_roles;
        self
    }

    /// Permission check first (admin roles see gated links regardless), then
    /// excluded roles, then required roles.
    pub fn link_visible(&self, link: &MenuLink) -> bool {
        if link.required_permissions.is_some()
            && !self.access.allows(link.required_permissions.as_ref())
            && !self.roles.contains_any(&self.admin_roles)
        {
            return false;
        }
        if let Some(excluded) = &link.exclude_roles {
            if self.roles.contains_any(excluded.as_slice()) {
                return false;
            }
        }
        match &link.required_roles {
            Some(required) => self.roles.contains_any(required.as_slice()),
            None => true,
        }
    }

    pub fn visible_links(&self, links: &[MenuLink]) -> Vec<MenuLink> {
        links.iter().filter(|l| self.link_visible(l)).cloned().collect()
    }

    /// Sections keep only their visible links; sections left empty are dropped.
    pub fn visible_sections(&self, sections: &[MenuSection]) -> Vec<MenuSection> {
        sections
            .iter()
            .filter_map(|section| {
                let links = self.visible_links(&section.links);
                (!links.is_empty()).then(|| MenuSection {
                    label: section.label.clone(),
                    icon: section.icon.clone(),
                    links,
                })
            })
            .collect()
    }
}
