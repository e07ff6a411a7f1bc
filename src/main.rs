//! Shotaudit CLI binary entry point.
//! Resolves configuration, runs one audit session and prints the result.

use clap::Parser;
use shotaudit::cli::{Cli, Commands};
use shotaudit::output::{error_prefix, note_prefix, warn_prefix};
use shotaudit::session::{AuditSession, Phase, UploadOutcome};
use shotaudit::upload::Upload;
use shotaudit::{config, logging, output};
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> shotaudit::Result<u8> {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
        Commands::Rules { output, repo_root } => {
            let eff =
                config::resolve_effective(repo_root.as_deref(), None, output.as_deref(), None, None)?;
            output::print_rules(&eff.output)?;
            Ok(0)
        }
        Commands::Audit {
            file,
            role,
            mime,
            output,
            delay_ms,
            min_score,
            repo_root,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                role.as_deref(),
                output.as_deref(),
                delay_ms,
                min_score,
            )?;
            let human = eff.output != "json";
            // Friendly note if no config was found
            if !eff.config_found && human {
                eprintln!("{} No shotaudit.toml found; using defaults.", note_prefix());
            }
            if let (Some(tok), None) = (eff.role_token.as_deref(), eff.role()) {
                eprintln!(
                    "{} Unknown role '{}'; only base rules apply.",
                    warn_prefix(),
                    tok
                );
            }

            let upload = Upload::from_path(Path::new(&file), mime.as_deref())?;
            let mut session = AuditSession::new(eff.delay, eff.role());
            match session.upload(&upload) {
                UploadOutcome::Ignored { mime } => {
                    eprintln!(
                        "{} Ignoring '{}': type '{}' is not image/*.",
                        warn_prefix(),
                        file,
                        mime
                    );
                    return Ok(2);
                }
                UploadOutcome::Accepted { .. } => {
                    if human {
                        eprintln!("Analyzing {} ...", upload.artifact().name);
                    }
                }
            }

            let Some(result) = session.wait_for_result().await else {
                eprintln!("{} Analysis was cancelled.", error_prefix());
                return Ok(2);
            };
            let artifact = match session.phase() {
                Phase::Results { artifact, .. } => artifact,
                _ => upload.artifact(),
            };
            output::print_audit(Some(&artifact), eff.role(), &result, &eff.output)?;

            match eff.min_score {
                Some(min) if result.score() < min => {
                    if human {
                        eprintln!(
                            "{} Score {} is below the minimum of {}.",
                            error_prefix(),
                            result.score(),
                            min
                        );
                    }
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }
}
