pub mod classify;
pub mod config;
pub mod error;
pub mod labels;
pub mod matcher;
pub mod menu;
pub mod permissions;
pub mod roles;
pub mod templates;
pub mod types;

pub use classify::{classify, filter_permissions};
pub use config::CampusConfig;
pub use error::{RbacError, Result};
pub use labels::{PermissionLabels, derive_labels};
pub use matcher::{Matcher, matches_pattern};
pub use menu::{MenuGate, MenuLink, MenuSection, RoleSet};
pub use permissions::{AccessContext, PermissionHierarchy, Requirement, has_permission};
pub use roles::{RoleDraft, RolePayload, filter_roles, summarize_permissions};
pub use templates::{PermissionGroupTemplate, TemplateSection, default_templates};
pub use types::*;
