use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use autoshelve::{
    ensure_shadow_repo, exit_code_for_shelve_error, resolve_current_branch, shadow_branch_name,
    GitCli, HostFs, ShelveConfig, ShelveEngine, ShelveError,
};

#[derive(Parser, Debug)]
#[command(
    name = "autoshelve",
    version,
    about = "Mirror a repository's uncommitted changes into a hidden shadow repository and push them to its remote as snapshot commits."
)]
struct Cli {
    /// Path to the primary repository (relative paths resolve against the current directory)
    repo: PathBuf,

    /// Push remote to mirror when the repository has more than one remote
    remote: Option<String>,

    /// Print detailed execution info
    #[arg(long)]
    verbose: bool,

    /// Resolve and print what would run, but do not execute
    #[arg(long)]
    dry_run: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "autoshelve=debug"
    } else {
        "autoshelve=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("AUTOSHELVE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), ShelveError> {
    if which::which("git").is_err() {
        return Err(ShelveError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "git not found in PATH",
        )));
    }

    let config = ShelveConfig::resolve(&cli.repo, cli.remote.clone())?;
    let primary = GitCli::new(&config.primary_path);
    let shadow = GitCli::new(&config.shadow_path);

    // Resolve the branch to shelve before touching the filesystem, so a
    // branchless repository aborts without creating the shadow directory.
    let branch =
        resolve_current_branch(&primary, true)?.ok_or(ShelveError::NoBranchFound)?;

    if cli.dry_run {
        eprintln!("autoshelve: primary: {}", config.primary_path.display());
        eprintln!("autoshelve: shadow: {}", config.shadow_path.display());
        eprintln!("autoshelve: branch: {}", shadow_branch_name(&branch.name));
        eprintln!("autoshelve: dry-run requested; not executing.");
        return Ok(());
    }

    let fs = HostFs;
    ensure_shadow_repo(&config, &primary, &shadow, &fs)?;

    let outcome = ShelveEngine::new(&primary, &shadow, &fs, &config).run(&branch)?;
    eprintln!(
        "autoshelve: shelved {} change(s) ({} deleted) from {} to {}{}",
        outcome.files_applied + outcome.files_deleted,
        outcome.files_deleted,
        branch.name,
        outcome.branch,
        if outcome.first_run { " (first run)" } else { "" }
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            eprintln!("autoshelve: {e}");
            ExitCode::from(exit_code_for_shelve_error(&e))
        }
    }
}
