use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, logging};
use crate::model::{Config, QuantityPolicy};
use crate::ops::ShoppingListController;
use crate::ops::script;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref(), &cwd)?;
    let list = build_controller(&cli, &config);

    match cli.command {
        None => {
            logging::init_file(&config.log, &cwd)
                .map_err(|e| format!("cannot open log file: {}", e))?;
            crate::tui::run(list, &config.ui)
        }
        Some(Commands::Replay(args)) => {
            logging::init_stderr(&config.log);
            cmd_replay(list, args)
        }
    }
}

/// Controller configured from the file, with command-line overrides
pub fn build_controller(cli: &Cli, config: &Config) -> ShoppingListController {
    let mut list_config = config.list.clone();
    if let Some(sort) = cli.sort {
        list_config.default_sort = sort;
    }
    if cli.strict {
        list_config.edit_quantity = QuantityPolicy::Strict;
    }
    ShoppingListController::from_config(&list_config)
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

fn read_script(file: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e).into()),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn cmd_replay(mut list: ShoppingListController, args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_script(args.file.as_deref())?;
    let intents = script::parse_script(&text)?;
    tracing::info!(intents = intents.len(), "replaying script");

    let outcome = script::run_script(&mut list, &intents);
    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning);
    }

    let items = script::snapshot(&list);
    let mut out = io::stdout().lock();
    if args.json {
        let json = replay_to_json(&outcome, &items);
        writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
    } else {
        for listing in &outcome.listings {
            write!(out, "{}", format_items(listing))?;
            writeln!(out)?;
        }
        write!(out, "{}", format_items(&items))?;
    }
    Ok(())
}
