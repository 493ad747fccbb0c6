//! Record display formatting
//!
//! Formats the ledger and query results as numbered tables for terminal
//! output.

use crate::models::Record;
use crate::services::{FindResult, Ledger};

const CATEGORY_WIDTH: usize = 15;
const DESCRIPTION_WIDTH: usize = 20;
const AMOUNT_WIDTH: usize = 10;

fn rule() -> String {
    format!(
        "{:>3} {} {} {}\n",
        "",
        "=".repeat(CATEGORY_WIDTH),
        "=".repeat(DESCRIPTION_WIDTH),
        "=".repeat(AMOUNT_WIDTH)
    )
}

/// Format numbered records as a table followed by a footer line
pub fn format_record_table<'a, I>(rows: I, footer: &str) -> String
where
    I: IntoIterator<Item = (usize, &'a Record)>,
{
    let mut output = String::new();

    output.push_str(&format!(
        "{:>3} {:<cw$} {:<dw$} {}\n",
        "",
        "Category",
        "Description",
        "Amount",
        cw = CATEGORY_WIDTH,
        dw = DESCRIPTION_WIDTH
    ));
    output.push_str(&rule());

    for (position, record) in rows {
        output.push_str(&format!(
            "{:>3} {:<cw$} {:<dw$} {}\n",
            position,
            record.category(),
            record.description(),
            record.amount(),
            cw = CATEGORY_WIDTH,
            dw = DESCRIPTION_WIDTH
        ));
    }

    output.push_str(&rule());
    output.push_str(&format!("{:>3} {}\n", "", footer));
    output
}

/// Format the whole ledger with its current balance
pub fn format_ledger_view(ledger: &Ledger) -> String {
    let mut output = String::from("\nHere's your expense and income records:\n");
    output.push_str(&format_record_table(
        ledger.view(),
        &format!("Now you have {} dollars.", ledger.balance()),
    ));
    output
}

/// Format the records found under a category
///
/// Matches are renumbered from 1; positions here are not ledger positions.
pub fn format_find_result(query: &str, result: &FindResult<'_>) -> String {
    let mut output = format!(
        "\nHere's your expense and income records under category \"{}\":\n",
        query
    );
    output.push_str(&format_record_table(
        result.records.iter().enumerate().map(|(i, r)| (i + 1, *r)),
        &format!("The total amount above is {}.", result.total),
    ));
    output
}
