// crates/sincer-core/src/listing.rs - What manager operations hand back for display
//
// The manager never formats text for a terminal. It returns either a plain
// status message or a list of rows, each tagged with how the operation
// touched it. Diffs are expressed as a removed row followed (or preceded) by
// an added row for the same record.

use crate::record::Record;

/// How an operation affected a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowAction {
    #[default]
    Normal,
    Added,
    Removed,
}

/// One displayed record
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRow {
    pub record: Record,
    pub action: RowAction,
}

impl ListingRow {
    pub fn normal(record: Record) -> Self {
        Self {
            record,
            action: RowAction::Normal,
        }
    }

    pub fn added(record: Record) -> Self {
        Self {
            record,
            action: RowAction::Added,
        }
    }

    pub fn removed(record: Record) -> Self {
        Self {
            record,
            action: RowAction::Removed,
        }
    }

    pub fn is_removed(&self) -> bool {
        self.action == RowAction::Removed
    }
}

/// Result of a manager operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A short status line such as "no records" or "reset completed"
    Message(String),
    /// Rows to render as a table
    Listing(Vec<ListingRow>),
}

impl Outcome {
    pub fn message<S: Into<String>>(text: S) -> Self {
        Self::Message(text.into())
    }

    /// Wrap records as unmarked rows
    pub fn listing<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        Self::Listing(records.into_iter().cloned().map(ListingRow::normal).collect())
    }

    /// The rows of a listing; empty for messages
    pub fn rows(&self) -> &[ListingRow] {
        match self {
            Self::Listing(rows) => rows,
            Self::Message(_) => &[],
        }
    }

    /// Names of the rows carrying `action`, in display order
    pub fn names_with(&self, action: RowAction) -> Vec<&str> {
        self.rows()
            .iter()
            .filter(|row| row.action == action)
            .map(|row| row.record.name.as_str())
            .collect()
    }
}
