use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;

use pipegit::checkout::{GerritCheckout, GerritContext, GitScmExecutor, SshCheckout};
use pipegit::config::Config;
use pipegit::env_vars;
use pipegit::git::GitCli;
use pipegit::logging;

#[derive(Parser)]
#[command(name = "pipegit")]
#[command(about = "Git introspection and declarative checkout helpers for CI pipelines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the HEAD commit hash of the current directory
    Commit,

    /// Print the tag-based describe string for HEAD
    Describe {
        /// Strip the trailing -g<sha> suffix
        #[arg(short, long)]
        short: bool,
    },

    /// Clone and check out a named branch over SSH
    CheckoutSsh {
        /// Credentials id (SSH user in the remote URL)
        #[arg(long)]
        credentials: Option<String>,

        /// Branch to check out
        #[arg(long)]
        branch: String,

        /// Review host
        #[arg(long)]
        host: String,

        /// Project path on the host
        #[arg(long)]
        project: String,

        /// Target directory relative to the workspace root
        #[arg(long)]
        target_dir: Option<String>,

        /// SSH port of the host
        #[arg(long)]
        port: Option<String>,

        /// Create a local branch after checkout instead of a detached HEAD
        #[arg(long)]
        merge: bool,
    },

    /// Check out the gerrit patchset of the triggering review event
    CheckoutGerrit {
        /// Credentials id for the gerrit remote
        #[arg(long)]
        credentials: Option<String>,

        /// Create a local branch after checkout instead of a detached HEAD
        #[arg(long)]
        merge: bool,

        /// Wipe the target directory before checkout
        #[arg(long)]
        wipe_out: bool,
    },

    /// List the environment variables pipegit reads
    Env,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    logging::init_logging(&config, cli.debug)?;

    match cli.command {
        Commands::Commit => {
            let cwd = env::current_dir()?;
            println!("{}", GitCli::head_commit(&cwd).await?);
        }

        Commands::Describe { short } => {
            let cwd = env::current_dir()?;
            println!("{}", GitCli::describe(&cwd, short).await?);
        }

        Commands::CheckoutSsh {
            credentials,
            branch,
            host,
            project,
            target_dir,
            port,
            merge,
        } => {
            let request = SshCheckout {
                credentials_id: resolve_credentials(credentials, &config)?,
                branch,
                host,
                project,
                target_dir: target_dir.unwrap_or_else(|| config.checkout.target_dir.clone()),
                port: port.unwrap_or_else(|| config.checkout.port.clone()),
                with_merge: merge,
            };
            let executor = GitScmExecutor::new(config.workspace_path());
            request.submit(&executor).await?;
        }

        Commands::CheckoutGerrit {
            credentials,
            merge,
            wipe_out,
        } => {
            let context = GerritContext::from_env()?;
            let request = GerritCheckout {
                credentials_id: resolve_credentials(credentials, &config)?,
                with_merge: merge,
                with_wipe_out: wipe_out,
            };
            let executor = GitScmExecutor::new(config.workspace_path());
            request.submit(&context, &executor).await?;
        }

        Commands::Env => print_env_vars(),
    }

    Ok(())
}

fn resolve_credentials(flag: Option<String>, config: &Config) -> Result<String> {
    flag.or_else(|| config.checkout.credentials_id.clone())
        .context("No credentials id given (--credentials or checkout.credentials_id in config)")
}

fn print_env_vars() {
    for (category, vars) in env_vars::env_vars_by_category() {
        println!("{}:", category.display_name());
        for var in vars {
            let default = var
                .default
                .map(|d| format!(" (default: {d})"))
                .unwrap_or_default();
            let required = if var.required { " [required]" } else { "" };
            println!("  {}{}{}", var.name, required, default);
            println!("      {}", var.description);
        }
        println!();
    }
}
