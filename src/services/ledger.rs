//! Ledger service
//!
//! Owns the running balance and the ordered record list. Every mutation is
//! validated in full before anything is committed, so the balance always
//! equals the opening balance plus the amounts of the records currently held.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::record::split_fields;
use crate::models::{CategoryTaxonomy, Record};
use crate::storage::records::render_ledger;
use crate::storage::{LoadOutcome, RecordRepository};

/// How a ledger came into being at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOrigin {
    /// Restored from a valid ledger file
    Loaded,
    /// No ledger file existed
    Fresh,
    /// A corrupt ledger file was deleted and a new ledger started
    Recovered,
}

/// Result of [`Ledger::initialize`]
#[derive(Debug)]
pub struct Initialized {
    pub ledger: Ledger,
    pub origin: LedgerOrigin,
    /// Recovered problems to report to the user, in the order they occurred
    pub diagnostics: Vec<LedgerError>,
}

/// Records matching a category query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindResult<'a> {
    pub records: Vec<&'a Record>,
    pub total: i64,
}

/// The balance plus the records that produced it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    balance: i64,
    records: Vec<Record>,
}

impl Ledger {
    /// Start an empty ledger with an opening balance
    pub fn new(opening_balance: i64) -> Self {
        Self {
            balance: opening_balance,
            records: Vec::new(),
        }
    }

    /// Rebuild a ledger from persisted state (current balance and records)
    pub fn from_parts(balance: i64, records: Vec<Record>) -> Self {
        Self { balance, records }
    }

    /// Load the ledger from `repo`, falling back to a fresh ledger
    ///
    /// A missing file asks `opening_balance` for the starting amount. A
    /// corrupt file is deleted first and then handled like a missing one;
    /// `opening_balance` then receives the corruption error so it can be
    /// shown before prompting. An opening balance that isn't an integer
    /// becomes 0 and is reported in `diagnostics`.
    pub fn initialize<F>(
        repo: &RecordRepository,
        taxonomy: &CategoryTaxonomy,
        opening_balance: F,
    ) -> LedgerResult<Initialized>
    where
        F: FnOnce(Option<&LedgerError>) -> LedgerResult<String>,
    {
        let mut diagnostics = Vec::new();

        let origin = match repo.load(taxonomy)? {
            LoadOutcome::Found { balance, records } => {
                debug!(balance, records = records.len(), "loaded ledger");
                return Ok(Initialized {
                    ledger: Self::from_parts(balance, records),
                    origin: LedgerOrigin::Loaded,
                    diagnostics,
                });
            }
            LoadOutcome::Missing => LedgerOrigin::Fresh,
            LoadOutcome::Corrupt(err) => {
                warn!(path = %repo.path().display(), error = %err, "deleting corrupt ledger file");
                repo.quarantine()?;
                diagnostics.push(err);
                LedgerOrigin::Recovered
            }
        };

        let input = opening_balance(diagnostics.first())?;
        let input = input.trim();
        let balance = match input.parse::<i64>() {
            Ok(balance) => balance,
            Err(_) => {
                warn!(input, "opening balance is not an integer, using 0");
                diagnostics.push(LedgerError::NonIntegerOpeningBalance(input.to_string()));
                0
            }
        };

        Ok(Initialized {
            ledger: Self::new(balance),
            origin,
            diagnostics,
        })
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a batch of comma-separated `category description amount` entries
    ///
    /// All entries are checked for field count and category first, then all
    /// amounts are parsed; any failure leaves the ledger untouched. Returns
    /// how many records were added.
    pub fn add(&mut self, batch: &str, taxonomy: &CategoryTaxonomy) -> LedgerResult<usize> {
        let mut entries = Vec::new();
        for entry in batch.split(',') {
            let (category, description, amount) = split_fields(entry)
                .ok_or_else(|| LedgerError::MalformedBatch(entry.trim().to_string()))?;

            if !taxonomy.is_valid(category) {
                return Err(LedgerError::UnknownCategory(category.to_string()));
            }

            entries.push((category, description, amount));
        }

        let mut balance = self.balance;
        let mut added = Vec::with_capacity(entries.len());
        for (category, description, amount) in entries {
            let amount = amount
                .parse::<i64>()
                .map_err(|_| LedgerError::NonIntegerAmount(amount.to_string()))?;
            balance = balance
                .checked_add(amount)
                .ok_or(LedgerError::AmountOverflow)?;
            added.push(Record::new(category, description, amount));
        }

        let count = added.len();
        self.records.extend(added);
        self.balance = balance;

        debug!(count, balance, "added records");
        Ok(count)
    }

    /// Delete the record at a 1-based position given as text
    ///
    /// Returns the position that was removed along with the record.
    pub fn delete(&mut self, position: &str) -> LedgerResult<(usize, Record)> {
        let position = position.trim();
        let parsed = position
            .parse::<i64>()
            .map_err(|_| LedgerError::NonIntegerPosition(position.to_string()))?;
        let index = self.index_of(parsed)?;
        let record = self.remove(index)?;
        Ok((index + 1, record))
    }

    fn index_of(&self, position: i64) -> LedgerResult<usize> {
        usize::try_from(position)
            .ok()
            .and_then(|p| p.checked_sub(1))
            .filter(|&i| i < self.records.len())
            .ok_or(LedgerError::PositionOutOfRange {
                position,
                len: self.records.len(),
            })
    }

    fn remove(&mut self, index: usize) -> LedgerResult<Record> {
        let balance = self
            .balance
            .checked_sub(self.records[index].amount())
            .ok_or(LedgerError::AmountOverflow)?;

        let record = self.records.remove(index);
        self.balance = balance;

        debug!(position = index + 1, balance, "deleted record");
        Ok(record)
    }

    /// Records in display order paired with their 1-based position
    pub fn view(&self) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.records.iter().enumerate().map(|(i, r)| (i + 1, r))
    }

    /// Records whose category is in `categories`, with their summed amount
    pub fn find<'a>(&'a self, categories: &BTreeSet<String>) -> FindResult<'a> {
        let records: Vec<&Record> = self
            .records
            .iter()
            .filter(|r| categories.contains(r.category()))
            .collect();
        let total = records
            .iter()
            .fold(0i64, |acc, r| acc.saturating_add(r.amount()));

        FindResult { records, total }
    }

    /// Render the ledger in the persisted file layout
    pub fn serialize(&self) -> String {
        render_ledger(self.balance, &self.records)
    }

    /// Write the ledger to `repo`, ending this ledger's session
    pub fn persist(self, repo: &RecordRepository) -> LedgerResult<()> {
        repo.save(&self.serialize())?;
        debug!(path = %repo.path().display(), balance = self.balance, "saved ledger");
        Ok(())
    }
}
