//! Configuration discovery and effective settings resolution.
//!
//! Shotaudit reads `shotaudit.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `role`: none (base rules only)
//! - `output`: `human`
//! - `delay_ms`: 1500
//! - `min_score`: none (never fails)
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{AuditError, Result};
use crate::models::Role;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DELAY_MS: u64 = 1500;

const CONFIG_NAMES: [&str; 3] = ["shotaudit.toml", "shotaudit.yaml", "shotaudit.yml"];

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// Root configuration loaded from `shotaudit.toml|yaml`.
pub struct ShotauditConfig {
    pub role: Option<String>,
    pub output: Option<String>,
    pub delay_ms: Option<u64>,
    pub min_score: Option<u8>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub role_token: Option<String>,
    pub output: String,
    pub delay: Duration,
    pub min_score: Option<u8>,
}

impl Effective {
    /// Resolved role; unknown tokens silently resolve to `None`.
    pub fn role(&self) -> Option<Role> {
        self.role_token.as_deref().and_then(Role::from_token)
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `shotaudit.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ShotauditConfig` from the first config file present in `root`.
///
/// Returns `Ok(None)` when there is no config file; a file that exists but
/// cannot be read or parsed is an error.
pub fn load_config(root: &Path) -> Result<Option<ShotauditConfig>> {
    for name in CONFIG_NAMES {
        let p = root.join(name);
        if !p.exists() {
            continue;
        }
        let path = p.to_string_lossy().to_string();
        let s = fs::read_to_string(&p).map_err(|source| AuditError::Io {
            path: path.clone(),
            source,
        })?;
        let cfg: ShotauditConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| AuditError::Config { path, source })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| AuditError::ConfigYaml { path, source })?
        };
        tracing::debug!(config = %p.display(), "loaded config");
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_role: Option<&str>,
    cli_output: Option<&str>,
    cli_delay_ms: Option<u64>,
    cli_min_score: Option<u8>,
) -> Result<Effective> {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let role_token = cli_role.map(|s| s.to_string()).or(cfg.role);

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let delay_ms = cli_delay_ms.or(cfg.delay_ms).unwrap_or(DEFAULT_DELAY_MS);
    let min_score = cli_min_score.or(cfg.min_score);

    Ok(Effective {
        repo_root,
        config_found,
        role_token,
        output,
        delay: Duration::from_millis(delay_ms),
        min_score,
    })
}
