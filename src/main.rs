use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use userdir::{Route, UiOptions, UserDirectoryUi};

#[derive(Debug, Parser)]
#[command(
    name = "userdir",
    version,
    about = "Browse and edit a user directory from the terminal"
)]
struct Cli {
    /// Base URL of the user service
    #[arg(
        short = 's',
        long = "server",
        value_name = "URL",
        default_value = "http://localhost:1000"
    )]
    server: String,

    /// Start at a path such as "/user/{id}" or "/user/{id}/edit"
    #[arg(long = "route", value_name = "PATH", default_value = "/")]
    route: String,

    /// Directory for edit-form draft files
    #[arg(long = "draft-dir", value_name = "DIR")]
    draft_dir: Option<PathBuf>,

    /// Persistence scope token for edit drafts
    #[arg(long = "scope", value_name = "TOKEN", default_value = "default")]
    scope: String,

    /// Input poll interval in milliseconds
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = 50)]
    tick_ms: u64,

    /// Hide the actions help line
    #[arg(long = "no-help")]
    no_help: bool,

    /// Skip the unsaved-changes confirmation when leaving the form
    #[arg(long = "no-confirm")]
    no_confirm: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let draft_dir = cli.draft_dir.unwrap_or_else(default_draft_dir);
    let options = UiOptions::default()
        .with_tick_rate(Duration::from_millis(cli.tick_ms))
        .with_help(!cli.no_help)
        .with_confirm_discard(!cli.no_confirm);

    UserDirectoryUi::new(cli.server)
        .with_options(options)
        .with_draft_dir(draft_dir)
        .with_scope(cli.scope)
        .with_route(Route::parse(&cli.route))
        .run()
}

fn default_draft_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".userdir").join("drafts"))
        .unwrap_or_else(|| std::env::temp_dir().join("userdir-drafts"))
}
