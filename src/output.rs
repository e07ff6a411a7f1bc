//! Output rendering for audit results and the rule catalog.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-issue fields and a top-level summary.

use crate::error::Result;
use crate::models::{AuditResult, Role};
use crate::presentation::{severity_style, ScoreBand};
use crate::rules::rule_catalog;
use crate::upload::ArtifactRef;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Colored `error:` prefix for stderr diagnostics.
pub fn error_prefix() -> String {
    if use_colors("human") {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn warn_prefix() -> String {
    if use_colors("human") {
        "warning:".yellow().bold().to_string()
    } else {
        "warning:".to_string()
    }
}

pub fn note_prefix() -> String {
    if use_colors("human") {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

fn role_label(role: Option<Role>) -> &'static str {
    role.map(Role::as_str).unwrap_or("none")
}

/// Print an audit result in the requested format.
pub fn print_audit(
    artifact: Option<&ArtifactRef>,
    role: Option<Role>,
    res: &AuditResult,
    output: &str,
) -> Result<()> {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_audit_json(artifact, role, res))?
        ),
        _ => print!("{}", render_audit_human(artifact, role, res, use_colors(output))),
    }
    Ok(())
}

/// Human rendering (pure) so it can be tested without a terminal.
pub fn render_audit_human(
    artifact: Option<&ArtifactRef>,
    role: Option<Role>,
    res: &AuditResult,
    color: bool,
) -> String {
    let mut out = String::new();
    if let Some(a) = artifact {
        let name = if color {
            a.name.bold().to_string()
        } else {
            a.name.clone()
        };
        out.push_str(&format!("{} ({}, {} bytes) role={}\n", name, a.mime, a.size, role_label(role)));
    }
    let band = ScoreBand::of(res.score());
    let score = format!("Compliance score: {}/100 ({})", res.score(), band.label());
    if color {
        out.push_str(&format!("{}\n", score.color(band.color()).bold()));
    } else {
        out.push_str(&format!("{}\n", score));
    }
    for is in res.issues() {
        let style = severity_style(is.severity);
        let (icon, sev) = if color {
            (
                style.icon.color(style.color).to_string(),
                style.label.color(style.color).bold().to_string(),
            )
        } else {
            (style.icon.to_string(), style.label.to_string())
        };
        out.push_str(&format!("{} {} ❲{}❳ — {}\n", icon, sev, is.rule, is.message));
        out.push_str(&format!("    ↳ {}\n", is.suggestion));
    }
    let s = res.summary();
    let summary = format!(
        "— Summary — errors={} warnings={} infos={} total={}",
        s.errors, s.warnings, s.infos, s.total
    );
    if color {
        out.push_str(&format!("{}\n", summary.bold()));
    } else {
        out.push_str(&format!("{}\n", summary));
    }
    out
}

/// Compose audit JSON object (pure) for testing purposes.
pub fn compose_audit_json(
    artifact: Option<&ArtifactRef>,
    role: Option<Role>,
    res: &AuditResult,
) -> JsonVal {
    json!({
        "artifact": artifact,
        "role": role,
        "score": res.score(),
        "issues": res.issues(),
        "summary": res.summary(),
    })
}

/// Print every rule with the scope it applies to.
pub fn print_rules(output: &str) -> Result<()> {
    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&compose_rules_json())?),
        _ => {
            let color = use_colors(output);
            for (scope, rule) in rule_catalog() {
                let style = severity_style(rule.severity);
                let scope = scope.map(Role::as_str).unwrap_or("base");
                if color {
                    println!(
                        "{} {:<16} {:<18} {}",
                        style.label.color(style.color).bold(),
                        scope,
                        rule.id.bold(),
                        rule.message
                    );
                } else {
                    println!("{} {:<16} {:<18} {}", style.label, scope, rule.id, rule.message);
                }
            }
        }
    }
    Ok(())
}

pub fn compose_rules_json() -> JsonVal {
    let items: Vec<_> = rule_catalog()
        .map(|(scope, r)| {
            json!({
                "id": r.id,
                "scope": scope.map(Role::as_str).unwrap_or("base"),
                "severity": r.severity,
                "message": r.message,
                "suggestion": r.suggestion,
            })
        })
        .collect();
    json!({ "rules": items, "total": items.len() })
}
