//! Compliance scoring engine.
//!
//! Produces an `AuditResult` from the base rules plus the caller's
//! role-specific rules. Evaluation is pure: the same role always yields the
//! same result, and no image content is ever read.

use crate::models::{AuditResult, Issue, Role, Severity, Summary};
use crate::rules::{role_rules, BASE_RULES};

const ERROR_PENALTY: usize = 15;
const WARNING_PENALTY: usize = 5;
const MAX_SCORE: usize = 100;

/// Evaluate the rule set for `role`.
///
/// Issues are ordered base rules first, then role-specific rules. A missing
/// role contributes no extra issues.
pub fn evaluate(role: Option<Role>) -> AuditResult {
    let issues: Vec<Issue> = BASE_RULES
        .iter()
        .chain(role_rules(role))
        .map(|r| r.to_issue())
        .collect();
    let result = AuditResult::from_issues(issues);
    tracing::debug!(
        role = role.map(Role::as_str).unwrap_or("none"),
        score = result.score(),
        issues = result.issues().len(),
        "evaluated audit"
    );
    result
}

/// Evaluate using a raw role token; unrecognized tokens act like no role.
pub fn evaluate_token(token: Option<&str>) -> AuditResult {
    let role = token.and_then(|t| {
        let r = Role::from_token(t);
        if r.is_none() {
            tracing::debug!(token = t, "unrecognized role token; using base rules only");
        }
        r
    });
    evaluate(role)
}

/// `100 - 15*errors - 5*warnings`, floored at 0. Info issues are free.
pub fn score_for(issues: &[Issue]) -> u8 {
    let s = summarize(issues);
    let penalty = s
        .errors
        .saturating_mul(ERROR_PENALTY)
        .saturating_add(s.warnings.saturating_mul(WARNING_PENALTY));
    u8::try_from(MAX_SCORE.saturating_sub(penalty)).unwrap_or(0)
}

/// Count issues per severity.
pub fn summarize(issues: &[Issue]) -> Summary {
    let mut s = Summary {
        total: issues.len(),
        ..Summary::default()
    };
    for is in issues {
        match is.severity {
            Severity::Error => s.errors += 1,
            Severity::Warning => s.warnings += 1,
            Severity::Info => s.infos += 1,
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn issue(severity: Severity) -> Issue {
        Issue {
            rule: "synthetic".into(),
            severity,
            message: "m".into(),
            suggestion: "s".into(),
        }
    }

    fn tokens() -> Vec<Option<&'static str>> {
        vec![
            Some("developer"),
            Some("designer"),
            Some("product-manager"),
            Some("project-owner"),
            None,
            Some("unknown-string"),
        ]
    }

    fn recount(issues: &[Issue]) -> u8 {
        let errors = issues.iter().filter(|i| i.severity == Severity::Error).count() as i64;
        let warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count() as i64;
        (100 - 15 * errors - 5 * warnings).clamp(0, 100) as u8
    }

    #[test]
    fn test_every_role_starts_with_base_issues() {
        for t in tokens() {
            let res = evaluate_token(t);
            assert!(res.issues().len() >= 3);
            let head: Vec<_> = res.issues()[..3].iter().map(|i| i.severity).collect();
            assert_eq!(head, vec![Severity::Error, Severity::Warning, Severity::Info]);
        }
    }

    #[test]
    fn test_score_matches_recount_for_every_role() {
        for t in tokens() {
            let res = evaluate_token(t);
            assert_eq!(res.score(), recount(res.issues()));
        }
    }

    #[test]
    fn test_absent_and_unknown_role_give_base_only() {
        let absent = evaluate(None);
        assert_eq!(absent.issues().len(), 3);
        assert_eq!(absent.score(), 80);
        assert_eq!(evaluate_token(Some("unknown-string")), absent);
    }

    #[test]
    fn test_developer_adds_one_warning() {
        let res = evaluate(Some(Role::Developer));
        assert_eq!(res.issues().len(), 4);
        assert_eq!(res.issues()[3].severity, Severity::Warning);
        assert_eq!(res.score(), 75);
    }

    #[test]
    fn test_product_manager_info_does_not_move_score() {
        let res = evaluate_token(Some("product-manager"));
        assert_eq!(res.issues().len(), 4);
        assert_eq!(res.issues()[3].severity, Severity::Info);
        assert_eq!(res.score(), 80);
    }

    #[test]
    fn test_designer_is_deterministic() {
        assert_eq!(evaluate(Some(Role::Designer)), evaluate(Some(Role::Designer)));
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let mut issues: Vec<Issue> = BASE_RULES.iter().map(|r| r.to_issue()).collect();
        issues.extend((0..5).map(|_| issue(Severity::Error)));
        // 6 errors and 1 warning: 100 - 90 - 5 = 5
        assert_eq!(score_for(&issues), 5);
        issues.push(issue(Severity::Error));
        assert_eq!(score_for(&issues), 0);
        assert_eq!(score_for(&vec![issue(Severity::Error); 50]), 0);
    }

    #[test]
    fn test_score_is_100_without_errors_or_warnings() {
        assert_eq!(score_for(&[]), 100);
        assert_eq!(score_for(&[issue(Severity::Info), issue(Severity::Info)]), 100);
    }

    #[test]
    fn test_summary_counts_add_up() {
        let s = evaluate(Some(Role::Developer)).summary();
        assert_eq!(
            s,
            Summary {
                errors: 1,
                warnings: 2,
                infos: 1,
                total: 4
            }
        );
    }

    proptest! {
        #[test]
        fn prop_any_token_yields_valid_result(token in ".{0,24}") {
            let res = evaluate_token(Some(&token));
            prop_assert!(res.issues().len() >= 3);
            prop_assert!(res.score() <= 100);
            prop_assert_eq!(res.score(), recount(res.issues()));
            let s = res.summary();
            prop_assert_eq!(s.errors + s.warnings + s.infos, res.issues().len());
        }

        #[test]
        fn prop_score_formula_holds(errors in 0usize..12, warnings in 0usize..25, infos in 0usize..5) {
            let mut issues = vec![issue(Severity::Error); errors];
            issues.extend(vec![issue(Severity::Warning); warnings]);
            issues.extend(vec![issue(Severity::Info); infos]);
            prop_assert_eq!(score_for(&issues), recount(&issues));
        }
    }
}
