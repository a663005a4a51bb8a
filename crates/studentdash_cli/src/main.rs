//! `studentdash` terminal dashboard.
//!
//! # Responsibility
//! - Parse arguments and bootstrap logging.
//! - Dispatch to show, interactive and import flows.
//! - Map failures to `Error: ...` on stderr and exit code 1.

mod args;
mod error;
mod import;
mod interactive;
mod render;
mod source;

use args::{Cli, Command, SourceArgs};
use clap::Parser;
use error::CliError;
use std::process::ExitCode;
use studentdash_core::{default_log_dir, init_logging, Dashboard, PredicateField};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_level, default_log_dir()) {
        eprintln!("Warning: logging disabled: {err}");
    }

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the command ran but the fetch failed.
fn run(command: Command) -> Result<bool, CliError> {
    match command {
        Command::Show { source: args, filters } => show(&args, &filters),
        Command::Interactive { source: args } => {
            interactive::run(&source::open_source(&args)?)?;
            Ok(true)
        }
        Command::Import { db, file } => {
            let ids = import::import_file(&db, &file)?;
            println!("imported {} record(s) into {}", ids.len(), db.display());
            Ok(true)
        }
    }
}

fn show(args: &SourceArgs, filters: &[(String, String)]) -> Result<bool, CliError> {
    let records = source::open_source(args)?;
    let mut dashboard = Dashboard::new();
    let fetched = dashboard.refresh(&records);

    for column in apply_filters(&mut dashboard, filters) {
        log::warn!("event=filter_ignored module=cli column={column}");
        eprintln!("Warning: unknown column `{column}`; filter ignored");
    }

    print!("{}", render::render_dashboard(&dashboard));
    Ok(fetched)
}

/// Appends one predicate per `(column, value)` after the default empty one.
///
/// Returns the column names that did not resolve; their predicates stay
/// inactive.
fn apply_filters(dashboard: &mut Dashboard, filters: &[(String, String)]) -> Vec<String> {
    let mut ignored = Vec::new();
    for (column, value) in filters {
        dashboard.add_predicate();
        let index = dashboard.predicates().len() - 1;
        dashboard.update_predicate(index, PredicateField::Column, column);
        dashboard.update_predicate(index, PredicateField::Value, value);
        if dashboard.predicates()[index].column.is_none() {
            ignored.push(column.clone());
        }
    }
    ignored
}

#[cfg(test)]
mod tests {
    use super::apply_filters;
    use studentdash_core::{Column, Dashboard};

    #[test]
    fn unknown_filter_columns_are_reported() {
        let mut dashboard = Dashboard::new();
        let filters = vec![
            ("subject".to_string(), "sci".to_string()),
            ("nickname".to_string(), "x".to_string()),
        ];

        let ignored = apply_filters(&mut dashboard, &filters);

        assert_eq!(ignored, vec!["nickname".to_string()]);
        assert_eq!(dashboard.predicates().len(), 3);
        assert_eq!(dashboard.predicates()[1].column, Some(Column::Subject));
        assert!(!dashboard.predicates()[2].is_active());
    }

    #[test]
    fn known_filter_columns_are_not_reported() {
        let mut dashboard = Dashboard::new();
        let filters = vec![("MARKS".to_string(), "9".to_string())];

        assert!(apply_filters(&mut dashboard, &filters).is_empty());
        assert!(dashboard.predicates()[1].is_active());
    }
}
