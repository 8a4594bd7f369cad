use std::collections::HashMap;

use crate::labels::{self, GENERAL_GROUP, derive_labels, locale_cmp};
use crate::matcher::Matcher;
use crate::templates::PermissionGroupTemplate;
use crate::types::{Permission, PermissionGroup, PermissionGroupItem};

/// Case-insensitive substring filter on name or description. A blank term
/// keeps everything.
pub fn filter_permissions(permissions: &[Permission], term: &str) -> Vec<Permission> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return permissions.to_vec();
    }
    permissions
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Partition `permissions` into display groups.
///
/// Templates claim permissions first, in declaration order; within a template
/// sections run before its top-level patterns. Each claim removes the matched
/// permissions, so every (filtered) permission lands in exactly one group.
/// Whatever is left is grouped by first name segment into `other-*` groups,
/// sorted by title and appended last.
pub fn classify(
    permissions: &[Permission],
    templates: &[PermissionGroupTemplate],
    term: &str,
) -> Vec<PermissionGroup> {
    let mut remaining = filter_permissions(permissions, term);
    let mut groups = Vec::new();

    for template in templates {
        for section in &template.sections {
            let key = format!("{}-{}", template.key, labels::slugify(&section.label));
            if let Some(group) = claim(&mut remaining, &section.patterns, key, &section.label) {
                groups.push(group);
            }
        }

        if template.patterns.is_empty() {
            continue;
        }
        let group = if template.sections.is_empty() {
            claim(
                &mut remaining,
                &template.patterns,
                template.key.clone(),
                &template.title,
            )
        } else {
            claim(
                &mut remaining,
                &template.patterns,
                format!("{}-other", template.key),
                "Other",
            )
        };
        groups.extend(group);
    }

    let fallback = fallback_groups(remaining);
    tracing::debug!(
        templated = groups.len(),
        fallback = fallback.len(),
        "classified permissions"
    );
    groups.extend(fallback);
    groups
}

fn claim(
    remaining: &mut Vec<Permission>,
    patterns: &[Matcher],
    key: String,
    title: &str,
) -> Option<PermissionGroup> {
    let (matched, rest): (Vec<_>, Vec<_>) = std::mem::take(remaining)
        .into_iter()
        .partition(|p| patterns.iter().any(|m| m.matches(&p.name)));
    *remaining = rest;

    if matched.is_empty() {
        return None;
    }
    Some(PermissionGroup {
        key,
        title: title.to_string(),
        items: sorted_items(matched.iter().map(item_for).collect()),
    })
}

fn fallback_groups(remaining: Vec<Permission>) -> Vec<PermissionGroup> {
    let mut order: Vec<PermissionGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for permission in &remaining {
        let labels = derive_labels(&permission.name);
        let slot = *index.entry(labels.group_key.clone()).or_insert_with(|| {
            let title = if labels.group_key == GENERAL_GROUP {
                "Other".to_string()
            } else {
                labels.group_title.clone()
            };
            order.push(PermissionGroup {
                key: format!("other-{}", labels.group_key),
                title,
                items: Vec::new(),
            });
            order.len() - 1
        });
        order[slot].items.push(PermissionGroupItem {
            id: permission.id.clone(),
            name: permission.name.clone(),
            display_name: labels.display_name,
            subtitle: labels.subtitle,
        });
    }

    for group in &mut order {
        let items = std::mem::take(&mut group.items);
        group.items = sorted_items(items);
    }
    order.sort_by(|a, b| locale_cmp(&a.title, &b.title));
    order
}

fn item_for(permission: &Permission) -> PermissionGroupItem {
    let labels = derive_labels(&permission.name);
    PermissionGroupItem {
        id: permission.id.clone(),
        name: permission.name.clone(),
        display_name: labels.display_name,
        subtitle: labels.subtitle,
    }
}

fn sorted_items(mut items: Vec<PermissionGroupItem>) -> Vec<PermissionGroupItem> {
    items.sort_by(|a, b| locale_cmp(&a.display_name, &b.display_name));
    items
}
