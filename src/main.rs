//! repohub: batch Git management for a local hub of repositories
//!
//! Discovers the git repositories sitting directly under a hub directory
//! and runs bulk operations across them: the commit workflow, cloning
//! missing repositories from GitHub, and listing.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use repohub::batch::CommitMessage;
use repohub::commands;
use repohub::core::{BatchConfig, AUTO_MESSAGE_SENTINEL, DEFAULT_COMMIT_TOOL};
use repohub::github::{CloneFilter, DEFAULT_LIST_LIMIT};

#[derive(Parser)]
#[command(
    name = "repohub",
    version,
    about = "Batch Git management for a local hub of repositories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the commit workflow across every repository in the hub
    Process(ProcessArgs),
    /// Clone missing GitHub repositories into the hub
    Clone(CloneArgs),
    /// List the repositories in the hub
    List(ListArgs),
}

#[derive(Args)]
struct ProcessArgs {
    /// Hub directory containing git repositories
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Pull changes from the remote repository first
    #[arg(long)]
    pull: bool,

    /// Ensure .gitignore includes the conventional ignore entry
    #[arg(long)]
    handle_gitignore: bool,

    /// Remove junk artifact files from working tree and index
    #[arg(long)]
    remove_junk: bool,

    /// Commit message to use, or "auto-commit" for a generated one
    #[arg(long, default_value = AUTO_MESSAGE_SENTINEL)]
    commit_message: String,

    /// Commit with plain git instead of the external commit tool
    #[arg(long)]
    no_commit_tool: bool,

    /// External commit tool executable
    #[arg(long, default_value = DEFAULT_COMMIT_TOOL)]
    commit_tool: String,

    /// Repository names to exclude
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Repository names to restrict the run to (default: all)
    #[arg(long, num_args = 1..)]
    only: Vec<String>,
}

impl ProcessArgs {
    fn into_config(self) -> BatchConfig {
        let message = if self.commit_message == AUTO_MESSAGE_SENTINEL {
            CommitMessage::Auto
        } else {
            CommitMessage::Literal(self.commit_message)
        };

        BatchConfig {
            base_dir: self.dir,
            include: self.only,
            exclude: self.exclude,
            pull: self.pull,
            normalize_ignore: self.handle_gitignore,
            purge_junk: self.remove_junk,
            message,
            use_commit_tool: !self.no_commit_tool,
            commit_tool: self.commit_tool,
        }
    }
}

#[derive(Args)]
struct CloneArgs {
    /// Hub directory where repositories will be cloned
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Maximum number of repositories to fetch from GitHub
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u32,

    /// Skip forked repositories
    #[arg(long)]
    filter_forks: bool,

    /// Only clone repositories with at least this many stars
    #[arg(long, default_value_t = 0)]
    min_stars: u32,

    /// Repository identifiers (owner/name) to exclude
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,
}

#[derive(Args)]
struct ListArgs {
    /// Hub directory containing git repositories
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Show per-repository metadata (requires onefetch)
    #[arg(long)]
    info: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => {
            commands::process::handle_process_command(args.into_config()).await
        }
        Commands::Clone(args) => {
            let filter = CloneFilter {
                skip_forks: args.filter_forks,
                min_stars: args.min_stars,
                exclude: args.exclude,
            };
            commands::clone::handle_clone_command(&args.dir, args.limit, filter).await
        }
        Commands::List(args) => commands::list::handle_list_command(&args.dir, args.info).await,
    }
}
