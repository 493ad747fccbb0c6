//! Ledger CLI commands
//!
//! Opening and saving the ledger, and the record commands shared by the
//! interactive shell and the one-shot subcommands.

use std::io::{BufRead, Write};

use clap::Subcommand;
use tracing::warn;

use crate::audit::AuditEntry;
use crate::display::{format_find_result, format_ledger_view};
use crate::error::{LedgerError, LedgerResult};
use crate::services::{Ledger, LedgerOrigin};

use super::console::Console;
use super::Context;

pub const OPENING_BALANCE_PROMPT: &str = "How much money do you have? ";

/// Record subcommands
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Add records: "cat1 desc1 amt1, cat2 desc2 amt2, ..."
    Add {
        /// Comma-separated `category description amount` entries
        #[arg(allow_hyphen_values = true)]
        batch: String,
    },

    /// Show all records and the current balance
    View,

    /// Delete a record by its number in `view`
    Delete {
        /// 1-based record number
        #[arg(allow_hyphen_values = true)]
        position: String,
    },

    /// Show records under a category (including subcategories)
    Find {
        /// Category name
        category: String,
    },
}

/// Append to the audit log; failures are logged, never fatal
pub fn record_audit(ctx: &Context, entry: &AuditEntry) {
    if let Err(e) = ctx.storage.log(entry) {
        warn!(error = %e, "failed to write audit entry");
    }
}

/// Load the ledger, prompting for an opening balance when there is none
pub fn open_ledger<R, W, E>(ctx: &Context, console: &mut Console<R, W, E>) -> LedgerResult<Ledger>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let file_name = ctx.storage.records.path().display().to_string();

    let init = Ledger::initialize(&ctx.storage.records, &ctx.taxonomy, |corrupt| {
        if let Some(err) = corrupt {
            console.warn(&format!("{}\nDeleting the contents of {}.", err, file_name))?;
        }
        Ok(console.prompt(OPENING_BALANCE_PROMPT)?.unwrap_or_default())
    })?;

    for diagnostic in &init.diagnostics {
        match diagnostic {
            LedgerError::CorruptPersistedState { .. } => {
                record_audit(ctx, &AuditEntry::reset(diagnostic.to_string()));
            }
            other => console.warn(&other.to_string())?,
        }
    }

    if init.origin == LedgerOrigin::Loaded {
        console.println("Welcome back!")?;
    }

    Ok(init.ledger)
}

/// Write the ledger to disk, ending its session
pub fn save_ledger(ctx: &Context, ledger: Ledger) -> LedgerResult<()> {
    let entry = AuditEntry::save(ledger.balance(), ledger.len());
    ledger.persist(&ctx.storage.records)?;
    record_audit(ctx, &entry);
    Ok(())
}

/// Add a batch of records
pub fn add_records<R, W, E>(
    ctx: &Context,
    console: &mut Console<R, W, E>,
    ledger: &mut Ledger,
    batch: &str,
) -> LedgerResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let count = ledger.add(batch, &ctx.taxonomy)?;

    let added = &ledger.records()[ledger.len() - count..];
    record_audit(ctx, &AuditEntry::add(added, ledger.balance()));

    let noun = if count == 1 { "record" } else { "records" };
    console.println(&format!("Added {} {}.", count, noun))
}

/// Delete the record at a 1-based position
pub fn delete_record<R, W, E>(
    ctx: &Context,
    console: &mut Console<R, W, E>,
    ledger: &mut Ledger,
    position: &str,
) -> LedgerResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let (position, record) = ledger.delete(position)?;
    record_audit(ctx, &AuditEntry::delete(position, &record, ledger.balance()));

    console.println(&format!("Deleted record {}: {}", position, record))
}

/// Print every record and the balance
pub fn view_records<R, W, E>(console: &mut Console<R, W, E>, ledger: &Ledger) -> LedgerResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    console.print(&format_ledger_view(ledger))
}

/// Print records filed under `query` or any of its subcategories
pub fn find_records<R, W, E>(
    ctx: &Context,
    console: &mut Console<R, W, E>,
    ledger: &Ledger,
    query: &str,
) -> LedgerResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let categories = ctx.taxonomy.descendants_of(query);
    let result = ledger.find(&categories);
    console.print(&format_find_result(query, &result))
}

/// Handle a one-shot record command
///
/// The ledger is always saved afterwards, even when the command itself is
/// rejected, so a freshly entered opening balance is not lost.
pub fn handle_ledger_command<R, W, E>(
    ctx: &Context,
    console: &mut Console<R, W, E>,
    cmd: LedgerCommands,
) -> LedgerResult<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut ledger = open_ledger(ctx, console)?;

    let result = match cmd {
        LedgerCommands::Add { batch } => add_records(ctx, console, &mut ledger, &batch),
        LedgerCommands::View => view_records(console, &ledger),
        LedgerCommands::Delete { position } => {
            delete_record(ctx, console, &mut ledger, &position)
        }
        LedgerCommands::Find { category } => find_records(ctx, console, &ledger, &category),
    };

    save_ledger(ctx, ledger)?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerPaths;
    use crate::models::Record;
    use std::fs;
    use tempfile::TempDir;

    type TestConsole<'a> = Console<&'a [u8], Vec<u8>, Vec<u8>>;

    fn context(temp_dir: &TempDir) -> Context {
        Context::load(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap()
    }

    fn console(input: &[u8]) -> TestConsole<'_> {
        Console::new(input, Vec::new(), Vec::new())
    }

    fn output(console: TestConsole<'_>) -> (String, String) {
        let (out, err) = console.into_writers();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_open_fresh_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let mut console = console(b"300\n");

        let ledger = open_ledger(&ctx, &mut console).unwrap();
        assert_eq!(ledger.balance(), 300);

        let (out, err) = output(console);
        assert!(out.contains(OPENING_BALANCE_PROMPT));
        assert!(!out.contains("Welcome back!"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_open_with_bad_opening_balance() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let mut console = console(b"a lot\n");

        let ledger = open_ledger(&ctx, &mut console).unwrap();
        assert_eq!(ledger.balance(), 0);

        let (_, err) = output(console);
        assert!(err.contains("Set to 0 by default."));
    }

    #[test]
    fn test_open_existing_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        fs::write(ctx.storage.records.path(), "10\nmeal lunch -5\n").unwrap();
        let mut console = console(b"");

        let ledger = open_ledger(&ctx, &mut console).unwrap();
        assert_eq!(ledger.records(), &[Record::new("meal", "lunch", -5)]);

        let (out, _) = output(console);
        assert!(out.contains("Welcome back!"));
        assert!(!out.contains(OPENING_BALANCE_PROMPT));
    }

    #[test]
    fn test_open_corrupt_ledger_warns_and_audits() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        fs::write(ctx.storage.records.path(), "10\nmeal -5\n").unwrap();
        let mut console = console(b"20\n");

        let ledger = open_ledger(&ctx, &mut console).unwrap();
        assert_eq!(ledger.balance(), 20);
        assert!(!ctx.storage.records.path().exists());

        let (_, err) = output(console);
        assert!(err.contains("Invalid format in ledger file at line 2"));

        let entries = ctx.storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, crate::audit::Operation::Reset);
    }

    #[test]
    fn test_one_shot_add_saves() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let mut console = console(b"100\n");

        handle_ledger_command(
            &ctx,
            &mut console,
            LedgerCommands::Add {
                batch: "meal lunch -20, bonus gift 5".into(),
            },
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(ctx.storage.records.path()).unwrap(),
            "85\nmeal lunch -20\nbonus gift 5\n"
        );

        let (out, _) = output(console);
        assert!(out.contains("Added 2 records."));
    }

    #[test]
    fn test_one_shot_rejected_add_still_saves_opening_balance() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let mut console = console(b"100\n");

        let err = handle_ledger_command(
            &ctx,
            &mut console,
            LedgerCommands::Add {
                batch: "groceries milk -4".into(),
            },
        )
        .unwrap_err();

        assert_eq!(err, LedgerError::UnknownCategory("groceries".into()));
        assert_eq!(
            fs::read_to_string(ctx.storage.records.path()).unwrap(),
            "100\n"
        );
    }

    #[test]
    fn test_one_shot_delete_audits() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        fs::write(ctx.storage.records.path(), "75\nmeal lunch -20\nsalary job 95\n").unwrap();
        let mut console = console(b"");

        handle_ledger_command(
            &ctx,
            &mut console,
            LedgerCommands::Delete {
                position: "2".into(),
            },
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(ctx.storage.records.path()).unwrap(),
            "-20\nmeal lunch -20\n"
        );

        let entries = ctx.storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries[0].position, Some(2));
        assert_eq!(entries[0].balance, Some(-20));
    }

    #[test]
    fn test_find_output() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        fs::write(
            ctx.storage.records.path(),
            "975\nmeal lunch -20\nsalary job 1000\nsnack chips -5\n",
        )
        .unwrap();
        let mut console = console(b"");

        handle_ledger_command(
            &ctx,
            &mut console,
            LedgerCommands::Find {
                category: "food".into(),
            },
        )
        .unwrap();

        let (out, _) = output(console);
        assert!(out.contains("The total amount above is -25."));
        assert!(!out.contains("salary"));
    }
}
