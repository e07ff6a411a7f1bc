//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shotaudit",
    version,
    about = "Design-system compliance audit for screenshots",
    long_about = "Shotaudit — upload a screenshot, get a design-system compliance score and a list of issues.\n\nConfiguration precedence: CLI > shotaudit.toml > defaults.",
    after_help = "Examples:\n  shotaudit audit screen.png --role developer\n  shotaudit audit screen.png --output json --delay-ms 0\n  shotaudit rules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current shotaudit version."
    )]
    Version,
    /// Audit a screenshot
    #[command(
        about = "Audit a screenshot",
        long_about = "Upload an image, wait for the simulated analysis and print the compliance score. Files not typed image/* are ignored.",
        after_help = "Examples:\n  shotaudit audit shot.png --role designer\n  shotaudit audit shot.bin --mime image/png --min-score 80"
    )]
    Audit {
        #[arg(help = "Path to the screenshot")]
        file: String,
        #[arg(long, help = "Role: developer|designer|product-manager|project-owner")]
        role: Option<String>,
        #[arg(long, help = "Declared MIME type (default: guessed from extension)")]
        mime: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Simulated analysis delay in milliseconds (default: 1500)")]
        delay_ms: Option<u64>,
        #[arg(long, help = "Exit non-zero when the score is below this value")]
        min_score: Option<u8>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
    },
    /// List the rule set
    #[command(
        about = "List rules",
        long_about = "Print the base rules and every role-specific rule."
    )]
    Rules {
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
    },
}
