use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matcher::Matcher;

/// A curated display group for the role editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionGroupTemplate {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub patterns: Vec<Matcher>,
    /// Evaluated before `patterns`, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<TemplateSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub label: String,
    pub patterns: Vec<Matcher>,
}

impl PermissionGroupTemplate {
    pub fn new(key: &str, title: &str, patterns: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            patterns: patterns.iter().map(|p| Matcher::path(p)).collect(),
            sections: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, matcher: Matcher) -> Self {
        self.patterns.push(matcher);
        self
    }

    pub fn with_section(mut self, label: &str, patterns: &[&str]) -> Self {
        self.sections.push(TemplateSection {
            label: label.to_string(),
            patterns: patterns.iter().map(|p| Matcher::path(p)).collect(),
        });
        self
    }
}

/// The sidebar taxonomy every school deployment ships with.
pub fn default_templates() -> Result<Vec<PermissionGroupTemplate>> {
    Ok(vec![
        PermissionGroupTemplate::new("management", "Management", &[])
            .with_section("Sessions", &["sessions."])
            .with_section("Terms", &["terms."])
            .with_section("Subjects", &["subjects."])
            .with_section("Result Pin", &["result.pin."]),
        PermissionGroupTemplate::new("parent", "Parent", &["parents."]),
        PermissionGroupTemplate::new("staff", "Staff", &["staff."]),
        PermissionGroupTemplate::new("classes", "Classes", &["classes.", "class-arms."]),
        PermissionGroupTemplate::new("assign", "Assign", &["subject.assignments", "class-teachers."]),
        PermissionGroupTemplate::new("student", "Student", &["students."]),
        PermissionGroupTemplate::new("attendance", "Attendance", &["attendance."]),
        PermissionGroupTemplate::new("settings", "Settings", &["assessment.", "skills.", "settings."]),
        PermissionGroupTemplate::new("fees", "Fee Management", &["fees."]),
        PermissionGroupTemplate::new("rbac", "RBAC", &["permissions.", "roles."])
            .with_pattern(Matcher::regex(r"^users\.assignRoles$")?),
        PermissionGroupTemplate::new("analytics", "Analytics", &["analytics."]),
    ])
}
