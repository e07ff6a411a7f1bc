//! Design-system rule table.
//!
//! Three base rules apply to every audit, one per severity. Each role adds
//! its own short list on top. The content is fixed; nothing here looks at
//! the uploaded image.

use crate::models::{Issue, Role, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Static rule definition; turned into an [`Issue`] when it fires.
pub struct Rule {
    pub id: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub suggestion: &'static str,
}

impl Rule {
    pub fn to_issue(&self) -> Issue {
        Issue {
            rule: self.id.to_string(),
            severity: self.severity,
            message: self.message.to_string(),
            suggestion: self.suggestion.to_string(),
        }
    }
}

/// Rules reported for every audit, in display order.
pub static BASE_RULES: [Rule; 3] = [
    Rule {
        id: "color-contrast",
        severity: Severity::Error,
        message: "Text contrast ratio is below 4.5:1 on the primary button",
        suggestion: "Use a darker shade from the primary palette (primary-700 or darker)",
    },
    Rule {
        id: "spacing-scale",
        severity: Severity::Warning,
        message: "Inconsistent spacing between card elements",
        suggestion: "Align padding and gaps to the 8px spacing scale",
    },
    Rule {
        id: "typography-scale",
        severity: Severity::Info,
        message: "Heading sizes could follow the type scale more closely",
        suggestion: "Use the h2/h3 tokens instead of custom font sizes",
    },
];

static DEVELOPER_RULES: [Rule; 1] = [Rule {
    id: "hardcoded-values",
    severity: Severity::Warning,
    message: "Hardcoded color values detected instead of design tokens",
    suggestion: "Replace hex literals with the matching color tokens",
}];

static DESIGNER_RULES: [Rule; 1] = [Rule {
    id: "icon-sizing",
    severity: Severity::Warning,
    message: "Icon sizes differ across the toolbar",
    suggestion: "Use the 16px or 24px icon sizes from the icon set",
}];

static PRODUCT_MANAGER_RULES: [Rule; 1] = [Rule {
    id: "cta-hierarchy",
    severity: Severity::Info,
    message: "Two primary calls to action compete on the same screen",
    suggestion: "Keep one primary action and demote the others to secondary",
}];

static PROJECT_OWNER_RULES: [Rule; 1] = [Rule {
    id: "brand-consistency",
    severity: Severity::Info,
    message: "Logo placement differs from the brand guidelines",
    suggestion: "Place the logo top-left with the documented clear space",
}];

/// Role-specific rules; `None` has none.
pub fn role_rules(role: Option<Role>) -> &'static [Rule] {
    match role {
        Some(Role::Developer) => &DEVELOPER_RULES,
        Some(Role::Designer) => &DESIGNER_RULES,
        Some(Role::ProductManager) => &PRODUCT_MANAGER_RULES,
        Some(Role::ProjectOwner) => &PROJECT_OWNER_RULES,
        None => &[],
    }
}

/// Every rule with the scope it applies to (`None` = base rule).
pub fn rule_catalog() -> impl Iterator<Item = (Option<Role>, &'static Rule)> {
    BASE_RULES.iter().map(|r| (None, r)).chain(
        Role::ALL
            .into_iter()
            .flat_map(|role| role_rules(Some(role)).iter().map(move |r| (Some(role), r))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base_rules_one_per_severity_in_order() {
        let sevs: Vec<_> = BASE_RULES.iter().map(|r| r.severity).collect();
        assert_eq!(sevs, Severity::ALL.to_vec());
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let mut seen = HashSet::new();
        for (_, r) in rule_catalog() {
            assert!(seen.insert(r.id), "duplicate rule id {}", r.id);
        }
    }

    #[test]
    fn test_catalog_lists_base_then_roles() {
        let scopes: Vec<_> = rule_catalog().map(|(s, _)| s).collect();
        assert_eq!(scopes.len(), 7);
        assert!(scopes[..3].iter().all(Option::is_none));
        assert_eq!(scopes[3], Some(Role::Developer));
        assert_eq!(scopes[6], Some(Role::ProjectOwner));
    }
}
