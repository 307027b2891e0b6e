//! Key-value preference storage.
//!
//! The balance is the only preference. It is stored under [AMOUNT_KEY] as the
//! raw bit pattern of the `f64` so that it round trips exactly.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, params};

use crate::Error;

/// The preference key for the amount due.
pub const AMOUNT_KEY: &str = "Amount due";

const PREFERENCE_TABLE: &str = "preference";

/// Somewhere to keep the amount due between runs.
pub trait AmountStore: Send {
    /// Load the saved amount, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<f64>, Error>;

    /// Save `amount`, replacing any previously saved amount.
    fn store(&mut self, amount: f64) -> Result<(), Error>;
}

/// Create the preference table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_preference_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                key TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            )",
            table = PREFERENCE_TABLE
        ),
        (),
    )?;

    Ok(())
}

/// Get the integer preference stored under `key`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_preference(key: &str, connection: &Connection) -> Result<Option<i64>, Error> {
    connection
        .query_row(
            &format!(
                "SELECT value FROM {table} WHERE key = ?1",
                table = PREFERENCE_TABLE
            ),
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(Error::from)
}

/// Set the integer preference stored under `key`, overwriting any existing value.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn set_preference(key: &str, value: i64, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        &format!(
            "INSERT INTO {table} (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            table = PREFERENCE_TABLE
        ),
        params![key, value],
    )?;

    Ok(())
}

/// Stores the amount due in the application's SQLite database.
#[derive(Debug, Clone)]
pub struct SqlitePreferences {
    db_connection: Arc<Mutex<Connection>>,
}

impl SqlitePreferences {
    /// Create a store that shares `db_connection`.
    ///
    /// The preference table must already exist, see [crate::initialize_db].
    pub fn new(db_connection: Arc<Mutex<Connection>>) -> Self {
        Self { db_connection }
    }
}

impl AmountStore for SqlitePreferences {
    fn load(&self) -> Result<Option<f64>, Error> {
        let connection = self
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let bits = get_preference(AMOUNT_KEY, &connection)?;

        Ok(bits.map(|bits| f64::from_bits(bits as u64)))
    }

    fn store(&mut self, amount: f64) -> Result<(), Error> {
        let connection = self
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        set_preference(AMOUNT_KEY, amount.to_bits() as i64, &connection)
    }
}

/// Keeps nothing, the amount due only lives as long as the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct EphemeralStore;

impl AmountStore for EphemeralStore {
    fn load(&self) -> Result<Option<f64>, Error> {
        Ok(None)
    }

    fn store(&mut self, _amount: f64) -> Result<(), Error> {
        Ok(())
    }
}


#[cfg(test)]
mod sqlite_preferences_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use super::{AMOUNT_KEY, AmountStore, SqlitePreferences, create_preference_table, get_preference};

    fn get_test_store() -> (SqlitePreferences, Arc<Mutex<Connection>>) {
        let conn = Connection::open_in_memory().unwrap();
        create_preference_table(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));

        (SqlitePreferences::new(conn.clone()), conn)
    }

    #[test]
    fn load_defaults_to_none() {
        let (store, _) = get_test_store();

        assert_eq!(store.load(), Ok(None));
    }

    #[test]
    fn round_trip_is_bit_exact() {
        let (mut store, conn) = get_test_store();

        store.store(42.5).unwrap();
        // A second store over the same database stands in for a restart.
        let reopened = SqlitePreferences::new(conn);

        let got = reopened.load().unwrap().unwrap();
        assert_eq!(got.to_bits(), 42.5_f64.to_bits());
    }

    #[test]
    fn keeps_awkward_values() {
        let (mut store, _) = get_test_store();

        for amount in [0.1 + 0.2, -0.0, -12.75, f64::MAX, f64::MIN_POSITIVE] {
            store.store(amount).unwrap();

            let got = store.load().unwrap().unwrap();
            assert_eq!(got.to_bits(), amount.to_bits(), "want {amount:?}, got {got:?}");
        }
    }

    #[test]
    fn stores_raw_bits_under_amount_key() {
        let (mut store, conn) = get_test_store();

        store.store(1.0).unwrap();

        let bits = get_preference(AMOUNT_KEY, &conn.lock().unwrap()).unwrap();
        assert_eq!(bits, Some(1.0_f64.to_bits() as i64));
    }
}
