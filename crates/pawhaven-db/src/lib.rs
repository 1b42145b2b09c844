pub mod migrations;
pub mod models;
pub mod queries;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Single-connection SQLite handle. Every query goes through the mutex, so
/// concurrent requests are serialized here rather than in the handlers.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let db = Self::init(conn)?;
        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Private in-memory database, mostly useful for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&mut conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adoption_requests_enforce_foreign_keys() {
        let db = Database::open_in_memory().unwrap();

        let err = db
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO adoption_requests (user_id, pet_id) VALUES (99, 99)",
                    [],
                )?;
                Ok(())
            })
            .unwrap_err();

        assert!(err.to_string().contains("FOREIGN KEY constraint failed"));
    }

    #[test]
    fn adoption_request_for_existing_rows_is_accepted() {
        let db = Database::open_in_memory().unwrap();

        db.with_conn(|conn| {
            conn.execute("INSERT INTO users (email, password) VALUES ('a@x.com', 'h')", [])?;
            conn.execute("INSERT INTO pets (name, species) VALUES ('Rex', 'Dog')", [])?;
            conn.execute("INSERT INTO adoption_requests (user_id, pet_id) VALUES (1, 1)", [])?;
            Ok(())
        })
        .unwrap();
    }
}
