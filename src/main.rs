mod commands;
mod core;
mod graph;
mod maven;
mod ui;
mod utils;

use clap::Parser;
use crate::commands::ChangesOptions;
use crate::core::context::ProjectContext;
use crate::core::error::{ChangesError, print_error};
use std::path::PathBuf;

/// List the Maven modules changed between two git revisions
#[derive(Parser)]
#[command(name = "mvn-changes")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Path to the top-level pom.xml of the project
  #[arg(long, value_name = "PATH")]
  root_pom: PathBuf,

  /// Revision to compare against (every module counts as changed when omitted)
  #[arg(long, visible_alias = "compared-to-commit", value_name = "REV")]
  baseline: Option<String>,

  /// Revision to inspect (defaults to HEAD)
  #[arg(long, visible_alias = "current-commit", value_name = "REV")]
  target: Option<String>,

  /// Also list modules that depend on a changed module
  #[arg(long)]
  include_dependents: bool,

  /// Also list modules a changed module depends on (wins over --include-dependents)
  #[arg(long)]
  include_dependencies: bool,

  /// Check out each revision while reading its descriptors, then restore the original
  #[arg(long)]
  use_checkout: bool,

  /// Log the duration of each step
  #[arg(long)]
  time_execution: bool,

  /// Output format: names (one identity per line) or json
  #[arg(long, default_value = "names")]
  format: String,

  /// Show a progress bar while scanning modules
  #[arg(long)]
  progress: bool,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  ui::logger::init_cli_logger(cli.verbose, cli.time_execution);

  let ctx = match ProjectContext::build(&cli.root_pom) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let options = ChangesOptions {
    baseline: cli.baseline,
    target: cli.target,
    include_dependents: cli.include_dependents,
    include_dependencies: cli.include_dependencies,
    use_checkout: cli.use_checkout,
    time_execution: cli.time_execution,
    progress: cli.progress,
  };

  if let Err(err) = commands::run_changes(&ctx, options, &cli.format) {
    handle_error(err);
  }
}

fn handle_error(err: ChangesError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
