// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite licence store.
//!
//! Implements the licence query layer the caseload pipelines read from. Built
//! on Diesel with embedded migrations.
//!
//! ## Storage
//!
//! One `licences` table holds every licence summary field. Dates are ISO
//! `YYYY-MM-DD` text; statuses and kinds are stored by name.
//!
//! ## Testing
//!
//! Every test opens its own shared in-memory database, named from an atomic
//! counter so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use caseload::{LicenceQuery, LicenceStore, SourceError};
use caseload_domain::LicenceSummary;
use diesel::SqliteConnection;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Licence store backed by a single SQLite connection.
pub struct SqliteLicenceStore {
    conn: RefCell<SqliteConnection>,
}

impl SqliteLicenceStore {
    /// Opens a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_{db_id}?mode=memory&cache=shared");

        let mut conn = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: RefCell::new(conn),
        })
    }

    /// Opens (creating if needed) a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: RefCell::new(conn),
        })
    }

    /// Inserts a licence and returns its id.
    ///
    /// A summary without a licence id is assigned the next free id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_licence(&self, licence: &LicenceSummary) -> Result<i64, PersistenceError> {
        mutations::insert_licence(&mut *self.connection()?, licence)
    }

    /// Inserts licences atomically and returns their ids.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case.
    pub fn insert_licences(&self, licences: &[LicenceSummary]) -> Result<Vec<i64>, PersistenceError> {
        mutations::insert_licences(&mut *self.connection()?, licences)
    }

    /// Number of stored licences.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<i64, PersistenceError> {
        queries::count_licences(&mut *self.connection()?)
    }

    fn connection(&self) -> Result<RefMut<'_, SqliteConnection>, PersistenceError> {
        self.conn
            .try_borrow_mut()
            .map_err(|_| PersistenceError::ConnectionBusy)
    }
}

impl LicenceStore for SqliteLicenceStore {
    fn query(&self, criteria: &LicenceQuery) -> Result<Vec<LicenceSummary>, SourceError> {
        Ok(queries::query_licences(&mut *self.connection()?, criteria)?)
    }

    fn find_by_id(&self, licence_id: i64) -> Result<Option<LicenceSummary>, SourceError> {
        Ok(queries::find_licence_by_id(
            &mut *self.connection()?,
            licence_id,
        )?)
    }
}
