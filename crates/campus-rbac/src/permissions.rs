use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RbacError, Result};
use crate::types::{AuthenticatedUserResponse, PermissionHierarchyNode};

/// A permission requirement as UI code declares it: one name, or a list of
/// alternatives where any one suffices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    One(String),
    AnyOf(Vec<String>),
}

impl Requirement {
    pub fn candidates(&self) -> &[String] {
        match self {
            Requirement::One(name) => std::slice::from_ref(name),
            Requirement::AnyOf(names) => names,
        }
    }

    /// Empty strings and empty lists impose nothing.
    pub fn is_unrestricted(&self) -> bool {
        match self {
            Requirement::One(name) => name.is_empty(),
            Requirement::AnyOf(names) => names.is_empty(),
        }
    }
}

impl From<&str> for Requirement {
    fn from(value: &str) -> Self {
        Requirement::One(value.to_string())
    }
}

impl From<Vec<&str>> for Requirement {
    fn from(value: Vec<&str>) -> Self {
        Requirement::AnyOf(value.into_iter().map(str::to_string).collect())
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::One(name) => f.write_str(name),
            Requirement::AnyOf(names) => write!(f, "any of [{}]", names.join(", ")),
        }
    }
}

/// Implication graph: permission name -> names its grant implies.
///
/// The reverse edges are indexed too, so a requested name can be traced up to
/// whichever granted permissions imply it.
#[derive(Debug, Clone, Default)]
pub struct PermissionHierarchy {
    children: HashMap<String, Vec<String>>,
    parents: HashMap<String, Vec<String>>,
}

impl PermissionHierarchy {
    pub fn new(nodes: Vec<PermissionHierarchyNode>) -> Self {
        let mut children: HashMap<String, Vec<String>> = HashMap::with_capacity(nodes.len());
        for node in nodes {
            // First node for a name wins.
            children.entry(node.name).or_insert(node.children);
        }

        let mut parents: HashMap<String, Vec<String>> = HashMap::new();
        for (parent, kids) in &children {
            for kid in kids {
                parents.entry(kid.clone()).or_default().push(parent.clone());
            }
        }
        for list in parents.values_mut() {
            list.sort();
            list.dedup();
        }

        Self { children, parents }
    }

    pub fn children_of(&self, name: &str) -> &[String] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parents_of(&self, name: &str) -> &[String] {
        self.parents.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl From<Vec<PermissionHierarchyNode>> for PermissionHierarchy {
    fn from(nodes: Vec<PermissionHierarchyNode>) -> Self {
        Self::new(nodes)
    }
}

impl From<Option<Vec<PermissionHierarchyNode>>> for PermissionHierarchy {
    fn from(nodes: Option<Vec<PermissionHierarchyNode>>) -> Self {
        nodes.map(Self::new).unwrap_or_default()
    }
}

/// Decide whether `granted` satisfies `required`.
///
/// A candidate name is satisfied when it is granted, when one of its
/// descendants in `hierarchy` is granted, or when a granted permission implies
/// it (one of its ancestors is granted). The requirement passes if any
/// candidate is satisfied. `None`, an empty name, and an empty list are
/// unrestricted and always satisfied.
///
/// Each walk visits a name at most once per call, so cyclic hierarchies
/// terminate and the cyclic branch contributes `false`.
pub fn has_permission(
    required: Option<&Requirement>,
    granted: &HashSet<String>,
    hierarchy: &PermissionHierarchy,
) -> bool {
    let Some(required) = required else {
        return true;
    };
    if required.is_unrestricted() {
        return true;
    }

    let mut down: HashSet<&str> = HashSet::new();
    let mut up: HashSet<&str> = HashSet::new();
    required.candidates().iter().any(|candidate| {
        granted.contains(candidate)
            || reaches_grant(candidate, granted, &mut down, |n| hierarchy.children_of(n))
            || reaches_grant(candidate, granted, &mut up, |n| hierarchy.parents_of(n))
    })
}

fn reaches_grant<'h, F>(
    start: &'h str,
    granted: &HashSet<String>,
    visited: &mut HashSet<&'h str>,
    edges: F,
) -> bool
where
    F: Fn(&str) -> &'h [String],
{
    let mut stack = vec![start];
    while let Some(name) = stack.pop() {
        if granted.contains(name) {
            return true;
        }
        if !visited.insert(name) {
            tracing::debug!(permission = name, "already visited in permission hierarchy");
            continue;
        }
        // Reverse so edges are tried in declaration order.
        stack.extend(edges(name).iter().rev().map(String::as_str));
    }
    false
}

/// The current user's grants paired with the school's hierarchy.
#[derive(Debug, Clone, Default)]
pub struct AccessContext {
    pub granted: HashSet<String>,
    pub hierarchy: PermissionHierarchy,
}

impl AccessContext {
    pub fn new<I, S>(granted: I, hierarchy: PermissionHierarchy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
            hierarchy,
        }
    }

    pub fn from_user(body: &AuthenticatedUserResponse, hierarchy: PermissionHierarchy) -> Self {
        Self::new(body.granted_permissions(), hierarchy)
    }

    pub fn allows(&self, required: Option<&Requirement>) -> bool {
        has_permission(required, &self.granted, &self.hierarchy)
    }

    pub fn require(&self, required: Option<&Requirement>) -> Result<()> {
        if self.allows(required) {
            Ok(())
        } else {
            let missing = required.map(ToString::to_string).unwrap_or_default();
            Err(RbacError::Forbidden(format!("missing permission: {missing}")))
        }
    }
}
