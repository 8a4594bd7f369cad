//! Human-readable labels derived from dotted permission names.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const GENERAL_GROUP: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionLabels {
    /// First segment, or `general`.
    pub group_key: String,
    /// Group key with `-` and `_` spelled as spaces.
    pub group_title: String,
    pub display_name: String,
    pub subtitle: Option<String>,
}

/// Split `name` into group, context, and action and render them for display.
///
/// `subject.assignments.update` gives display name `Edit` and subtitle
/// `Subject Assignments`; `dashboard.view` gives `View` / `Dashboard`.
pub fn derive_labels(name: &str) -> PermissionLabels {
    let parts: Vec<&str> = name
        .split('.')
        .filter(|part| !part.trim().is_empty())
        .collect();

    let group = parts.first().copied().unwrap_or(GENERAL_GROUP);
    let (context, action) = match parts.split_last() {
        Some((last, rest)) if !rest.is_empty() => (rest, *last),
        Some((only, _)) => (&[][..], *only),
        None => (&[][..], GENERAL_GROUP),
    };

    let subtitle = if !context.is_empty() {
        Some(to_title(&context.join(" ")))
    } else if group != GENERAL_GROUP {
        Some(to_title(group))
    } else {
        None
    };

    PermissionLabels {
        group_key: group.to_string(),
        group_title: group.replace(['-', '_'], " "),
        display_name: to_title(alias_action(action)),
        subtitle,
    }
}

fn alias_action(action: &str) -> &str {
    match action {
        "update" => "edit",
        "enter" => "entry",
        other => other,
    }
}

/// `-`, `_` and `.` become spaces, whitespace runs collapse, ends are trimmed.
pub fn normalize_label(value: &str) -> String {
    let replaced = value.replace(['-', '_', '.'], " ");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalise, then upper-case the first ASCII word character of every word.
/// The rest of each word is kept as written (`assignRoles` -> `AssignRoles`).
pub fn to_title(value: &str) -> String {
    let normalized = normalize_label(value);
    let mut out = String::with_capacity(normalized.len());
    let mut prev_is_word = false;
    for ch in normalized.chars() {
        let is_word = ch.is_ascii_alphanumeric() || ch == '_';
        if is_word && !prev_is_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        prev_is_word = is_word;
    }
    out
}

/// Lower-case, whitespace runs to `-`.
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Collation for display lists: base letters first with case and accents
/// ignored, punctuation before digits before letters. Ties go to the
/// unaccented form, then to lower case ahead of upper case.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fn class(ch: char) -> u8 {
        if ch.is_numeric() {
            1
        } else if ch.is_alphabetic() {
            2
        } else {
            0
        }
    }

    fn folded(s: &str) -> Vec<char> {
        s.nfd().flat_map(char::to_lowercase).collect()
    }

    let (fa, fb) = (folded(a), folded(b));
    let base = |chars: &[char]| -> Vec<(u8, char)> {
        chars
            .iter()
            .copied()
            .filter(|&c| !is_combining_mark(c))
            .map(|c| (class(c), c))
            .collect()
    };
    let primary = base(&fa).cmp(&base(&fb));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = fa.cmp(&fb);
    if secondary != Ordering::Equal {
        return secondary;
    }

    // Same letters: the first case difference decides, lower case first.
    let tertiary = a
        .chars()
        .map(char::is_uppercase)
        .cmp(b.chars().map(char::is_uppercase));
    tertiary.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_is_shown_as_edit() {
        let labels = derive_labels("subject.assignments.update");
        assert_eq!(labels.display_name, "Edit");
        assert_eq!(labels.subtitle.as_deref(), Some("Subject Assignments"));
        assert_eq!(labels.group_key, "subject");
    }

    #[test]
    fn two_segment_name() {
        let labels = derive_labels("dashboard.view");
        assert_eq!(labels.display_name, "View");
        assert_eq!(labels.subtitle.as_deref(), Some("Dashboard"));
    }

    #[test]
    fn enter_is_shown_as_entry() {
        let labels = derive_labels("results.enter");
        assert_eq!(labels.display_name, "Entry");
        assert_eq!(labels.subtitle.as_deref(), Some("Results"));
    }

    #[test]
    fn single_segment_uses_group_as_subtitle() {
        let labels = derive_labels("reports");
        assert_eq!(labels.display_name, "Reports");
        assert_eq!(labels.subtitle.as_deref(), Some("Reports"));
    }

    #[test]
    fn general_single_segment_has_no_subtitle() {
        let labels = derive_labels("general");
        assert_eq!(labels.display_name, "General");
        assert_eq!(labels.subtitle, None);
    }

    #[test]
    fn empty_name_falls_back_to_general() {
        for name in ["", ".", " . "] {
            let labels = derive_labels(name);
            assert_eq!(labels.group_key, "general");
            assert_eq!(labels.display_name, "General");
            assert_eq!(labels.subtitle, None);
        }
    }

    #[test]
    fn empty_segments_are_skipped() {
        let labels = derive_labels("students..view.");
        assert_eq!(labels.display_name, "View");
        assert_eq!(labels.subtitle.as_deref(), Some("Students"));
    }

    #[test]
    fn separators_and_camel_case() {
        assert_eq!(derive_labels("users.assignRoles").display_name, "AssignRoles");
        assert_eq!(derive_labels("class-arms.bulk_create").display_name, "Bulk Create");
        assert_eq!(
            derive_labels("class-arms.bulk_create").subtitle.as_deref(),
            Some("Class Arms")
        );
        assert_eq!(derive_labels("class-arms.view").group_title, "class arms");
    }

    #[test]
    fn title_case_rules() {
        assert_eq!(to_title("  result  pin "), "Result Pin");
        assert_eq!(to_title("2fa-reset"), "2fa Reset");
        assert_eq!(to_title("o'neil"), "O'Neil");
        assert_eq!(normalize_label("a.b_c-d"), "a b c d");
    }

    #[test]
    fn slug_of_section_label() {
        assert_eq!(slugify("Result Pin"), "result-pin");
        assert_eq!(slugify("Sessions"), "sessions");
    }

    #[test]
    fn locale_ordering() {
        let mut names = vec!["view", "Create", "Assign", "delete", "Bulk Create"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, vec!["Assign", "Bulk Create", "Create", "delete", "view"]);

        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Edit", "Edit"), Ordering::Equal);
        assert_eq!(locale_cmp("Item 2", "Item10"), Ordering::Less);
    }

    #[test]
    fn accents_sort_with_base_letter() {
        assert_eq!(locale_cmp("Édit", "Fee"), Ordering::Less);
        assert_eq!(locale_cmp("Edit", "Édit"), Ordering::Less);
        assert_eq!(locale_cmp("élève", "Zone"), Ordering::Less);

        let mut names = vec!["Zone", "Édit", "edit", "Apply"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, vec!["Apply", "edit", "Édit", "Zone"]);
    }
}
