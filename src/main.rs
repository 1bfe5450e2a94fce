use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use git_convention::check;
use git_convention::config;
use git_convention::domain::ConventionalCommit;
use git_convention::git::Git2Repository;
use git_convention::resolver::VersionResolver;
use git_convention::ui;

#[derive(Parser)]
#[command(
    name = "git-convention",
    about = "Validate conventional commits and infer semantic versions from git history"
)]
struct Cli {
    #[arg(short, long, help = "Custom configuration file path", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check commit messages against the conventional commit format
    Check {
        #[arg(long, help = "Read a single commit message from stdin")]
        from_stdin: bool,

        #[arg(
            long,
            value_name = "START..END",
            help = "Git revision range to check. Both START and END must exist (e.g. HEAD~5..HEAD)"
        )]
        rev_range: Option<String>,

        #[arg(
            long,
            help = "Collect all failures and report statistics instead of stopping at the first"
        )]
        stats: bool,
    },

    /// Print the current or next semantic version
    Version {
        #[arg(
            long,
            help = "Whether to print the next semantic version instead of the current"
        )]
        next: bool,

        #[arg(long, help = "Tag prefix identifying version tags")]
        prefix: Option<String>,

        #[arg(long, help = "Only count commits touching this path")]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Could not load config: {}", e));
            std::process::exit(2);
        }
    };

    match cli.command {
        Command::Check {
            from_stdin,
            rev_range,
            stats,
        } => run_check(from_stdin, rev_range.as_deref(), stats, &config),
        Command::Version { next, prefix, path } => {
            run_version(next, prefix, path.as_deref(), &config)
        }
    }
}

fn run_check(
    from_stdin: bool,
    rev_range: Option<&str>,
    stats: bool,
    config: &config::Config,
) -> Result<()> {
    if from_stdin {
        if rev_range.is_some() {
            ui::display_error(
                "Cannot use --rev-range with --from-stdin. Please provide a single commit message.",
            );
            std::process::exit(2);
        }

        let mut message = String::new();
        std::io::stdin().read_to_string(&mut message)?;
        if let Err(e) = ConventionalCommit::from_message(&message) {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
        return Ok(());
    }

    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let range = match rev_range {
        Some(spec) => match check::parse_rev_range(&repo, spec) {
            Ok(range) => Some(range),
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(2);
            }
        },
        None => None,
    };

    if stats || !config.check.fail_fast {
        let report = match check::check_history_report(&repo, range.as_ref()) {
            Ok(report) => report,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };
        ui::display_check_report(&report);
        if !report.is_clean() {
            std::process::exit(1);
        }
    } else {
        match check::check_history(&repo, range.as_ref()) {
            Ok(checked) => ui::display_success(&format!("{} commits checked", checked)),
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn run_version(
    next: bool,
    prefix: Option<String>,
    path: Option<&std::path::Path>,
    config: &config::Config,
) -> Result<()> {
    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let prefix = prefix.unwrap_or_else(|| config.version.tag_prefix.clone());
    let resolver = VersionResolver::new(prefix);

    let result = if next {
        resolver.next_version(&repo, path)
    } else {
        resolver.current_version(&repo)
    };

    match result {
        Ok(version) => println!("{}", version),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
