use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use plaints::cli::handlers::{self, CommandContext, ListParams, SubmitParams};
use plaints::cli::{Cli, Commands};
use plaints::config::PlaintsConfig;

fn main() -> Result<()> {
    let Cli {
        command,
        config,
        verbose,
        log_file,
    } = Cli::parse();

    let open = || -> Result<CommandContext> {
        let (config, root) = load_config(config.as_ref())?;
        let log_file = log_file.clone().or_else(|| config.log_path(&root));
        plaints::logging::init(verbose, log_file);
        Ok(CommandContext::new(config, root))
    };

    match command {
        Commands::Init { no_seed } => {
            plaints::logging::init(verbose, log_file.clone());
            handlers::handle_init(no_seed)
        }
        Commands::Serve { host, port } => handlers::handle_serve(open()?, host, port),
        Commands::Submit {
            email,
            department,
            category,
            sub_category,
            sub_other,
            description,
            file,
            json,
        } => handlers::handle_submit(
            &open()?,
            SubmitParams {
                email,
                department,
                category,
                sub_category,
                sub_other,
                description,
                file,
                json,
            },
        ),
        Commands::Show { id, json } => handlers::handle_show(&open()?, id, json),
        Commands::List {
            email,
            status,
            priority,
            open: open_only,
            json,
        } => handlers::handle_list(
            &open()?,
            ListParams {
                email,
                status,
                priority,
                open: open_only,
                json,
            },
        ),
        Commands::Status { id, status, json } => {
            handlers::handle_status(&open()?, id, status.into(), json)
        }
        Commands::Options { kind, parent, json } => {
            handlers::handle_options(&open()?, kind.map(Into::into), parent, json)
        }
        Commands::Priority {
            category,
            sub_category,
        } => handlers::handle_priority(category, sub_category),
    }
}

fn load_config(explicit: Option<&PathBuf>) -> Result<(PlaintsConfig, PathBuf)> {
    match explicit {
        Some(path) => PlaintsConfig::load_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let cwd = std::env::current_dir()?;
            PlaintsConfig::load(&cwd).context("Failed to load plaints configuration")
        }
    }
}
