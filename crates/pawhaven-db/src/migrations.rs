use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Create the schema if it is missing. Runs on every startup and never
/// touches existing rows.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            email       TEXT UNIQUE NOT NULL,
            password    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS pets (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            species     TEXT NOT NULL,
            breed       TEXT,
            color       TEXT,
            age         INTEGER,
            location    TEXT,
            description TEXT,
            image       TEXT
        );

        CREATE TABLE IF NOT EXISTS adoption_requests (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      INTEGER NOT NULL,
            pet_id       INTEGER NOT NULL,
            status       TEXT DEFAULT 'Pending',
            request_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (user_id) REFERENCES users(id),
            FOREIGN KEY (pet_id) REFERENCES pets(id)
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
