//! Interactive shell
//!
//! Reads commands until `exit` (or end of input), then saves the ledger.
//! Rejected commands print a diagnostic and leave the ledger untouched.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use tracing::warn;

use crate::display::{format_category_tree, format_history};
use crate::error::LedgerResult;
use crate::services::Ledger;

use super::console::Console;
use super::ledger::{
    add_records, delete_record, find_records, open_ledger, save_ledger, view_records,
};
use super::Context;

const COMMAND_PROMPT: &str =
    "\nWhat do you want to do (add / view / delete / view categories / find / exit)? ";
const ADD_PROMPT: &str = "Add some expense or income records with category, description and amount (separate by spaces):\n\
                          cat1 desc1 amt1, cat2 desc2 amt2, cat3 desc3 amt3, ...\n";
const DELETE_PROMPT: &str =
    "\nWhich record do you want to delete (Please enter the corresponding record number)? ";
const FIND_PROMPT: &str = "Which category do you want to find? ";

const HISTORY_LIMIT: usize = 10;

const HELP: &str = "Commands:
  add              add records (category description amount, comma separated)
  view             list records and the current balance
  delete           delete a record by its number
  view categories  show the category tree
  find             list records under a category and their total
  history          show recent ledger changes
  exit             save and quit
";

/// A command typed at the shell prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Add,
    View,
    Delete,
    ViewCategories,
    Find,
    History,
    Help,
    Exit,
}

impl ShellCommand {
    /// Parse a command line; `None` for anything unrecognized
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "add" => Some(Self::Add),
            "view" => Some(Self::View),
            "delete" => Some(Self::Delete),
            "view categories" => Some(Self::ViewCategories),
            "find" => Some(Self::Find),
            "history" => Some(Self::History),
            "help" => Some(Self::Help),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the interactive shell until exit
pub fn run_shell<R, W, E>(ctx: &Context, console: &mut Console<R, W, E>) -> LedgerResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut ledger = open_ledger(ctx, console)?;

    // The ledger is saved even when the loop stops on an error
    let outcome = command_loop(ctx, console, &mut ledger);
    save_ledger(ctx, ledger)?;
    outcome
}

fn command_loop<R, W, E>(
    ctx: &Context,
    console: &mut Console<R, W, E>,
    ledger: &mut Ledger,
) -> LedgerResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    loop {
        let line = match console.prompt(COMMAND_PROMPT)? {
            Some(line) => line,
            None => break,
        };

        match ShellCommand::parse(&line) {
            Some(ShellCommand::Exit) => return Ok(()),
            Some(cmd) => {
                if execute(ctx, console, ledger, cmd)?.is_break() {
                    break;
                }
            }
            None => console.warn("Invalid command. Try again.")?,
        }
    }

    // End of input
    console.println("")
}

/// Run one command; `Break` when input ended at one of its prompts
fn execute<R, W, E>(
    ctx: &Context,
    console: &mut Console<R, W, E>,
    ledger: &mut Ledger,
    cmd: ShellCommand,
) -> LedgerResult<ControlFlow<()>>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let (result, failure) = match cmd {
        ShellCommand::Add => {
            let Some(batch) = console.prompt(ADD_PROMPT)? else {
                return Ok(ControlFlow::Break(()));
            };
            (
                add_records(ctx, console, ledger, &batch),
                "Fail to add the records.",
            )
        }
        ShellCommand::View => (view_records(console, ledger), ""),
        ShellCommand::Delete => {
            view_records(console, ledger)?;
            let Some(position) = console.prompt(DELETE_PROMPT)? else {
                return Ok(ControlFlow::Break(()));
            };
            (
                delete_record(ctx, console, ledger, &position),
                "Fail to delete a record.",
            )
        }
        ShellCommand::ViewCategories => (console.print(&format_category_tree(&ctx.taxonomy)), ""),
        ShellCommand::Find => {
            let Some(query) = console.prompt(FIND_PROMPT)? else {
                return Ok(ControlFlow::Break(()));
            };
            (find_records(ctx, console, ledger, &query), "")
        }
        ShellCommand::History => (show_history(ctx, console, HISTORY_LIMIT), ""),
        ShellCommand::Help => (console.print(HELP), ""),
        ShellCommand::Exit => (Ok(()), ""),
    };

    match result {
        Ok(()) => {}
        Err(e) if e.is_recoverable() => {
            if failure.is_empty() {
                console.warn(&e.to_string())?;
            } else {
                console.warn(&format!("{}\n{}", e, failure))?;
            }
        }
        Err(e) => return Err(e),
    }

    Ok(ControlFlow::Continue(()))
}

/// Print the `limit` most recent audit entries
///
/// An unreadable audit log is reported as a diagnostic; it never ends the
/// session.
pub fn show_history<R, W, E>(
    ctx: &Context,
    console: &mut Console<R, W, E>,
    limit: usize,
) -> LedgerResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let Some(logger) = ctx.storage.audit() else {
        return console.println("Audit log is disabled.");
    };

    match logger.read_recent(limit) {
        Ok(entries) => console.print(&format_history(&entries)),
        Err(e) => {
            warn!(error = %e, "failed to read audit log");
            console.warn(&format!("Could not read the audit log: {}", e))
        }
    }
}
