//! Prompt loop for editing filters against a live dashboard.
//!
//! # Invariants
//! - Every command maps to exactly one dashboard operation.
//! - Bad input prints a hint and keeps the session alive.

use crate::error::CliError;
use crate::render::{render_dashboard, render_predicates};
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use studentdash_core::{Dashboard, PredicateField, RecordSource};

const PROMPT: &str = "studentdash> ";
const HELP: &str = "commands:
  add              append an empty filter
  rm N             remove filter N
  col N COLUMN     set filter N column (name|grade|age|gender|subject|marks)
  val N TEXT       set filter N value (empty TEXT clears it)
  list             list filters
  show             print table and chart
  reload           fetch records again
  help             show this help
  quit             leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Add,
    Remove(usize),
    Column(usize, String),
    Value(usize, String),
    List,
    Show,
    Reload,
    Help,
    Quit,
}

/// Parses one prompt line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim_start();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    let command = match verb {
        "" => return Ok(None),
        "add" => ReplCommand::Add,
        "rm" => ReplCommand::Remove(parse_index(rest.trim())?),
        "col" => {
            let (index, column) = split_index(rest)?;
            ReplCommand::Column(index, column.trim().to_string())
        }
        "val" => {
            let (index, value) = split_index(rest)?;
            ReplCommand::Value(index, value.to_string())
        }
        "list" | "ls" => ReplCommand::List,
        "show" => ReplCommand::Show,
        "reload" => ReplCommand::Reload,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

/// Applies `command`; returns text to print, or `None` to end the session.
pub fn execute(
    dashboard: &mut Dashboard,
    source: &impl RecordSource,
    command: ReplCommand,
) -> Option<String> {
    let output = match command {
        ReplCommand::Add => {
            dashboard.add_predicate();
            render_predicates(dashboard.predicates())
        }
        ReplCommand::Remove(index) => match dashboard.remove_predicate(index) {
            Some(_) => render_predicates(dashboard.predicates()),
            None => format!("no filter [{index}]\n"),
        },
        ReplCommand::Column(index, column) => {
            edit(dashboard, index, PredicateField::Column, &column)
        }
        ReplCommand::Value(index, value) => edit(dashboard, index, PredicateField::Value, &value),
        ReplCommand::List => render_predicates(dashboard.predicates()),
        ReplCommand::Show => render_dashboard(dashboard),
        ReplCommand::Reload => {
            dashboard.refresh(source);
            render_dashboard(dashboard)
        }
        ReplCommand::Help => HELP.to_string(),
        ReplCommand::Quit => return None,
    };
    Some(output)
}

/// Runs the prompt until `quit`, Ctrl+C or Ctrl+D.
pub fn run(source: &impl RecordSource) -> Result<(), CliError> {
    let mut dashboard = Dashboard::new();
    dashboard.refresh(source);
    print!("{}", render_dashboard(&dashboard));
    print!("{HELP}");

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        record_history(&mut editor, &line);

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match execute(&mut dashboard, source, command) {
                Some(output) => print!("{output}"),
                None => break,
            },
            Err(hint) => println!("{hint}"),
        }
    }
    Ok(())
}

/// Adds non-blank lines to the prompt history; failures are only logged.
fn record_history(editor: &mut DefaultEditor, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    if let Err(err) = editor.add_history_entry(line) {
        debug!("event=prompt_history module=cli status=error error={err}");
    }
}

fn edit(dashboard: &mut Dashboard, index: usize, field: PredicateField, input: &str) -> String {
    if dashboard.update_predicate(index, field, input) {
        render_predicates(dashboard.predicates())
    } else {
        format!("no filter [{index}]\n")
    }
}

fn split_index(rest: &str) -> Result<(usize, &str), String> {
    let rest = rest.trim_start();
    let (index, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    Ok((parse_index(index)?, tail))
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.parse()
        .map_err(|_| format!("expected a filter number, got `{raw}`"))
}
