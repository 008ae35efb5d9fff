// crates/sincer-core/src/manager.rs - The record manager
//
// The manager owns the ordered record list and the name counter. Every
// mutating operation follows the same shape:
//
//   validate inputs ─▶ locate record(s) ─▶ mutate in memory ─▶ persist ─▶ Outcome
//
// Validation happens before anything is touched, so a failed operation
// leaves both the list and the file as they were.
//
// VIRTUAL MANAGERS:
// A manager built without a store never touches the disk. Mutations still
// happen in memory, `save()` and `load_from_store()` report
// `StoreError::Virtual`. Tests and dry runs use this mode.

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::listing::{ListingRow, Outcome, RowAction};
use crate::matcher::{match_first_index, match_indices, name_taken};
use crate::movement::{Move, MoveError};
use crate::namegen::{NameGenError, NameGenerator};
use crate::record::Record;
use crate::store::{Config, ConfigDocument, ConfigStore, StoreError};
use crate::validate::{is_record_name, parse_since};
use crate::{DEFAULT_NAME_TEMPLATE, MAX_RECORDS};

/// Errors reported by manager operations
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("name is invalid")]
    InvalidName,

    #[error("second name is invalid")]
    InvalidNameSecond,

    #[error("new name is invalid")]
    NewNameInvalid,

    #[error("new name is same")]
    NewNameSame,

    #[error("date is invalid")]
    InvalidDate,

    #[error("new date is invalid")]
    InvalidNewDate,

    #[error("record with this name already exists")]
    NameCollision,

    #[error("record '{0}' not found")]
    NotFound(String),

    #[error("second record '{0}' not found")]
    SecondNotFound(String),

    #[error("records '{0}' not found")]
    RecordsNotFound(String),

    #[error("a pattern is required to remove records")]
    MissingPattern,

    #[error("no records")]
    NoRecords,

    #[error("you have reached the limit of {} records", MAX_RECORDS)]
    LimitExceeded,

    #[error(transparent)]
    InvalidMove(#[from] MoveError),

    #[error(transparent)]
    NameGenerator(#[from] NameGenError),
}

/// Result type for manager operations
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Options for `create`
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Start date; defaults to now
    pub date: Option<String>,
    /// Append at the end instead of inserting at the front
    pub below: bool,
    /// Hex colour; defaults to white
    pub color: Option<String>,
}

/// Options for `change`; absent fields are left as they are
#[derive(Debug, Clone, Default)]
pub struct ChangeOptions {
    pub date: Option<String>,
    pub color: Option<String>,
}

/// What `swap` exchanges between two records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapMode {
    /// Only the names trade places
    #[default]
    Names,
    /// The records trade list slots with all their fields
    Places,
}

/// Owns the record list and keeps it in sync with an optional config file
#[derive(Debug)]
pub struct Manager {
    store: Option<ConfigStore>,
    config: Config,
}

impl Manager {
    /// Create a manager with an empty config; nothing is read yet
    pub fn new(store: Option<ConfigStore>) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    /// A manager with no backing file
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    /// Open the config at `store`, starting empty when the file is missing
    ///
    /// A file that exists but does not hold a valid config is an error.
    pub fn open(store: ConfigStore) -> ManagerResult<Self> {
        let mut manager = Self::new(Some(store));
        if !manager.load_from_store()? {
            if let Some(store) = &manager.store {
                info!(path = %store.path().display(), "config file not found, starting empty");
            }
        }
        Ok(manager)
    }

    /// Replace the in-memory config with the file's content
    ///
    /// Returns `false` and keeps the current config when the file is missing.
    pub fn load_from_store(&mut self) -> ManagerResult<bool> {
        let store = self.store.as_ref().ok_or(StoreError::Virtual)?;
        match store.load()? {
            Some(config) => {
                self.config = config;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Validate and adopt an explicit document
    pub fn load_document(&mut self, doc: ConfigDocument) -> ManagerResult<()> {
        self.config = Config::from_document(doc)?;
        Ok(())
    }

    /// Write the config to the backing file
    pub fn save(&self) -> ManagerResult<()> {
        let store = self.store.as_ref().ok_or(StoreError::Virtual)?;
        store.save(&self.config)?;
        Ok(())
    }

    /// Drop the backing file; later mutations stay in memory
    pub fn detach(&mut self) {
        self.store = None;
    }

    pub fn is_virtual(&self) -> bool {
        self.store.is_none()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.config.records
    }

    /// The config serialized as it would be saved
    pub fn to_yaml(&self) -> ManagerResult<String> {
        Ok(self.config.to_yaml()?)
    }

    /// Every record matching `pattern` (two-pass)
    pub fn match_all(&self, pattern: &str) -> Vec<&Record> {
        self.match_all_indices(pattern)
            .into_iter()
            .map(|index| &self.config.records[index])
            .collect()
    }

    /// Positions of every record matching `pattern` (two-pass)
    pub fn match_all_indices(&self, pattern: &str) -> Vec<usize> {
        match_indices(&self.config.records, pattern, None)
    }

    /// First record matching `pattern` (two-pass)
    pub fn match_first(&self, pattern: &str) -> Option<&Record> {
        self.match_first_index(pattern)
            .map(|index| &self.config.records[index])
    }

    /// Position of the first record matching `pattern` (two-pass)
    pub fn match_first_index(&self, pattern: &str) -> Option<usize> {
        match_first_index(&self.config.records, pattern, None)
    }

    /// List all records, or those matching `pattern`
    pub fn display(&self, pattern: Option<&str>) -> Outcome {
        if self.config.records.is_empty() {
            return Outcome::message("no records");
        }

        let Some(pattern) = pattern else {
            return Outcome::listing(&self.config.records);
        };

        let matches = self.match_all(pattern);
        if matches.is_empty() {
            return Outcome::message("no matches");
        }
        Outcome::listing(matches)
    }

    /// Add a record at the front (or the end with `below`)
    ///
    /// Without a name, one is generated from `timer-$0`, skipping names that
    /// are already taken.
    pub fn create(&mut self, name: Option<&str>, options: CreateOptions) -> ManagerResult<Outcome> {
        if self.config.records.len() >= MAX_RECORDS {
            return Err(ManagerError::LimitExceeded);
        }

        let (name, count) = match name {
            Some(name) => (
                name.to_string(),
                self.config
                    .count
                    .checked_add(1)
                    .ok_or(NameGenError::CounterCeiling)?,
            ),
            None => self.next_default_name()?,
        };

        if !is_record_name(&name) {
            return Err(ManagerError::InvalidName);
        }
        let since = resolve_date(options.date.as_deref()).ok_or(ManagerError::InvalidDate)?;
        if name_taken(&self.config.records, &name, None) {
            return Err(ManagerError::NameCollision);
        }

        let record = Record::new(name, since, options.color);
        info!(name = %record.name, below = options.below, "record created");

        self.config.count = count;
        let position = if options.below {
            self.config.records.push(record);
            self.config.records.len() - 1
        } else {
            self.config.records.insert(0, record);
            0
        };
        self.persist()?;

        Ok(Outcome::Listing(
            self.config
                .records
                .iter()
                .enumerate()
                .map(|(index, record)| {
                    if index == position {
                        ListingRow::added(record.clone())
                    } else {
                        ListingRow::normal(record.clone())
                    }
                })
                .collect(),
        ))
    }

    /// Exchange the names (or the list slots) of two records
    pub fn swap(&mut self, name: &str, name2: &str, mode: SwapMode) -> ManagerResult<Outcome> {
        if !is_record_name(name) {
            return Err(ManagerError::InvalidName);
        }
        if !is_record_name(name2) {
            return Err(ManagerError::InvalidNameSecond);
        }

        let records = &mut self.config.records;
        let first = match_first_index(records, name, None)
            .ok_or_else(|| ManagerError::NotFound(name.to_string()))?;
        let second = match_first_index(records, name2, Some(first))
            .ok_or_else(|| ManagerError::SecondNotFound(name2.to_string()))?;

        let message = match mode {
            SwapMode::Names => {
                let taken = std::mem::take(&mut records[first].name);
                records[first].name = std::mem::replace(&mut records[second].name, taken);
                "successfully swapped names"
            }
            SwapMode::Places => {
                records.swap(first, second);
                "successfully swapped places"
            }
        };
        info!(first, second, ?mode, "records swapped");

        self.persist()?;
        Ok(Outcome::message(message))
    }

    /// Update the date and/or colour of the first matching record
    pub fn change(&mut self, name: &str, options: ChangeOptions) -> ManagerResult<Outcome> {
        if !is_record_name(name) {
            return Err(ManagerError::InvalidName);
        }
        let since = match options.date.as_deref() {
            Some(date) => Some(resolve_date(Some(date)).ok_or(ManagerError::InvalidNewDate)?),
            None => None,
        };
        let index = self
            .match_first_index(name)
            .ok_or_else(|| ManagerError::NotFound(name.to_string()))?;

        let before = self.config.records[index].clone();
        let record = &mut self.config.records[index];
        if let Some(since) = since {
            record.since = since.trunc_subsecs(3);
        }
        if let Some(color) = options.color {
            record.color = color;
        }
        info!(name = %record.name, "record changed");

        self.persist()?;
        Ok(self.diff_at(index, before))
    }

    /// Rename the first record matching `pattern`
    pub fn rename(&mut self, pattern: &str, newname: &str) -> ManagerResult<Outcome> {
        if !is_record_name(pattern) {
            return Err(ManagerError::InvalidName);
        }
        if !is_record_name(newname) {
            return Err(ManagerError::NewNameInvalid);
        }
        if pattern == newname {
            return Err(ManagerError::NewNameSame);
        }

        let index = self
            .match_first_index(pattern)
            .ok_or_else(|| ManagerError::NotFound(pattern.to_string()))?;
        if name_taken(&self.config.records, newname, Some(index)) {
            return Err(ManagerError::NameCollision);
        }

        let before = self.config.records[index].clone();
        self.config.records[index].name = newname.to_string();
        info!(from = %before.name, to = newname, "record renamed");

        self.persist()?;
        Ok(self.diff_at(index, before))
    }

    /// Move the first record matching `pattern` by a `u<N>`/`d<N>`/`umax`/`dmax` step
    ///
    /// Counts past the boundary clamp to it. Moving to the current position
    /// is a no-op that still returns the listing.
    pub fn move_record(&mut self, pattern: &str, step: &str) -> ManagerResult<Outcome> {
        let step: Move = step.parse()?;
        let index = self
            .match_first_index(pattern)
            .ok_or_else(|| ManagerError::NotFound(pattern.to_string()))?;

        let records = &mut self.config.records;
        let target = step.target(index, records.len());
        if target == index {
            debug!(index, %step, "record already in place");
            return Ok(Outcome::listing(records.iter()));
        }

        let mut rows: Vec<ListingRow> = records.iter().cloned().map(ListingRow::normal).collect();
        rows[index].action = RowAction::Removed;

        let record = records.remove(index);
        records.insert(target, record.clone());
        // The old row is still in `rows`, so a downward move lands one further
        let display_target = if target > index { target + 1 } else { target };
        rows.insert(display_target, ListingRow::added(record));
        info!(from = index, to = target, "record moved");

        self.persist()?;
        Ok(Outcome::Listing(rows))
    }

    /// Remove every record matching `pattern`
    ///
    /// Records are taken out one at a time, re-running the two-pass lookup
    /// after each removal until nothing matches.
    pub fn remove(&mut self, pattern: Option<&str>) -> ManagerResult<Outcome> {
        if self.config.records.is_empty() {
            return Err(ManagerError::NoRecords);
        }
        let pattern = pattern
            .filter(|p| !p.is_empty())
            .ok_or(ManagerError::MissingPattern)?;
        if self.match_first_index(pattern).is_none() {
            return Err(ManagerError::RecordsNotFound(pattern.to_string()));
        }

        let mut rows: Vec<ListingRow> = self
            .config
            .records
            .iter()
            .cloned()
            .map(ListingRow::normal)
            .collect();
        // Starting row index of each record still in the list
        let mut origins: Vec<usize> = (0..rows.len()).collect();

        while let Some(index) = self.match_first_index(pattern) {
            let removed = self.config.records.remove(index);
            let origin = origins.remove(index);
            rows[origin].action = RowAction::Removed;
            info!(name = %removed.name, "record removed");
        }

        self.persist()?;
        Ok(Outcome::Listing(rows))
    }

    /// Replace everything with an empty config
    pub fn reset(&mut self) -> ManagerResult<Outcome> {
        self.config = Config::default();
        info!("config reset");
        self.persist()?;
        Ok(Outcome::message("reset completed"))
    }

    /// Save when backed by a file; virtual managers skip silently
    fn persist(&self) -> ManagerResult<()> {
        match &self.store {
            Some(store) => Ok(store.save(&self.config)?),
            None => {
                debug!("virtual manager, skipping save");
                Ok(())
            }
        }
    }

    /// Listing with the old state of `index` shown as removed above the new one
    fn diff_at(&self, index: usize, before: Record) -> Outcome {
        let mut rows: Vec<ListingRow> = Vec::with_capacity(self.config.records.len() + 1);
        for (position, record) in self.config.records.iter().enumerate() {
            if position == index {
                rows.push(ListingRow::removed(before.clone()));
                rows.push(ListingRow::added(record.clone()));
            } else {
                rows.push(ListingRow::normal(record.clone()));
            }
        }
        Outcome::Listing(rows)
    }

    /// The first free `timer-N` name and the counter value that produced it
    fn next_default_name(&self) -> ManagerResult<(String, u64)> {
        let mut generator = NameGenerator::new(DEFAULT_NAME_TEMPLATE, self.config.count)?;
        loop {
            let name = generator.next()?.current();
            if !name_taken(&self.config.records, &name, None) {
                return Ok((name, generator.counter()));
            }
            debug!(%name, "default name taken, advancing");
        }
    }
}

/// Command-line date input: a date, the `now` keyword, or nothing for now
fn resolve_date(date: Option<&str>) -> Option<DateTime<Utc>> {
    match date {
        None => Some(Utc::now()),
        Some(date) if date.trim().eq_ignore_ascii_case("now") => Some(Utc::now()),
        Some(date) => parse_since(date),
    }
}
