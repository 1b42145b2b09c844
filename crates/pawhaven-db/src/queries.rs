use crate::Database;
use crate::models::{PetRow, UserRow};
use anyhow::Result;
use pawhaven_types::models::NewPet;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use tracing::{info, warn};

const PET_COLUMNS: &str = "id, name, species, breed, color, age, location, description, image";

impl Database {
    // -- Users --

    /// Insert a user. Returns the new row id, or `None` when the email is
    /// already registered.
    pub fn create_user(&self, email: &str, password_hash: &str) -> Result<Option<i64>> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (email, password) VALUES (?1, ?2)",
                (email, password_hash),
            );

            match inserted {
                Ok(_) => Ok(Some(conn.last_insert_rowid())),
                Err(e) if is_unique_violation(&e) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    // -- Pets --

    pub fn list_pets(&self) -> Result<Vec<PetRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM pets", PET_COLUMNS))?;
            let rows = stmt
                .query_map([], pet_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_pet(&self, id: i64) -> Result<Option<PetRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM pets WHERE id = ?1", PET_COLUMNS))?;
            let row = stmt.query_row([id], pet_from_row).optional()?;
            Ok(row)
        })
    }

    pub fn insert_pet(&self, pet: &NewPet) -> Result<i64> {
        self.with_conn(|conn| insert_pet(conn, pet))
    }

    /// Load `pets` into an empty table in one transaction. Does nothing when
    /// the table already has rows. Returns how many rows were inserted.
    pub fn seed_pets(&self, pets: &[NewPet]) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let existing = count_pets(&tx)?;
            if existing > 0 {
                info!("Skipping pet seed, table already holds {} rows", existing);
                return Ok(0);
            }

            for pet in pets {
                insert_pet(&tx, pet)?;
            }
            tx.commit()?;

            info!("Seeded {} pets", pets.len());
            Ok(pets.len())
        })
    }
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare("SELECT id, email, password FROM users WHERE email = ?1")?;

    let row = stmt
        .query_row([email], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn count_pets(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM pets", [], |row| row.get(0))?;
    Ok(count)
}

fn insert_pet(conn: &Connection, pet: &NewPet) -> Result<i64> {
    conn.execute(
        "INSERT INTO pets (name, species, breed, color, age, location, description, image)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            pet.name,
            pet.species,
            pet.breed,
            pet.color,
            pet.age,
            pet.location,
            pet.description,
            pet.image,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn pet_from_row(row: &Row<'_>) -> rusqlite::Result<PetRow> {
    let id = row.get(0)?;
    Ok(PetRow {
        id,
        name: row.get(1)?,
        species: row.get(2)?,
        breed: row.get(3)?,
        color: row.get(4)?,
        age: age_from_row(row, id)?,
        location: row.get(6)?,
        description: row.get(7)?,
        image: row.get(8)?,
    })
}

/// Rows can be written outside the app, and SQLite will happily keep text or
/// reals in the `age` column. Anything that is not an integer reads as `None`.
fn age_from_row(row: &Row<'_>, pet_id: i64) -> rusqlite::Result<Option<i64>> {
    let age = match row.get_ref(5)? {
        ValueRef::Null => None,
        ValueRef::Integer(age) => Some(age),
        other => {
            warn!(pet_id, "Ignoring non-integer age stored as {}", other.data_type());
            None
        }
    };
    Ok(age)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rex() -> NewPet {
        NewPet {
            name: "Rex".into(),
            species: "Dog".into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_and_find_user() {
        let db = Database::open_in_memory().unwrap();

        let id = db.create_user("a@x.com", "hash").unwrap().unwrap();
        let user = db.get_user_by_email("a@x.com").unwrap().unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password, "hash");
    }

    #[test]
    fn duplicate_email_returns_none() {
        let db = Database::open_in_memory().unwrap();

        assert!(db.create_user("a@x.com", "first").unwrap().is_some());
        assert!(db.create_user("a@x.com", "second").unwrap().is_none());

        // The original row is untouched
        let user = db.get_user_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(user.password, "first");
    }

    #[test]
    fn email_lookup_is_exact() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("a@x.com", "hash").unwrap();

        assert!(db.get_user_by_email("A@X.COM").unwrap().is_none());
        assert!(db.get_user_by_email("missing@x.com").unwrap().is_none());
    }

    #[test]
    fn list_pets_empty_then_filled() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.list_pets().unwrap().is_empty());

        db.insert_pet(&rex()).unwrap();
        db.insert_pet(&NewPet {
            name: "Tom".into(),
            species: "Cat".into(),
            breed: Some("Tabby".into()),
            age: Some(3),
            ..Default::default()
        })
        .unwrap();

        let pets = db.list_pets().unwrap();
        assert_eq!(pets.len(), 2);
        assert_eq!(pets[1].name, "Tom");
        assert_eq!(pets[1].breed.as_deref(), Some("Tabby"));
        assert_eq!(pets[1].age, Some(3));
        assert!(pets[0].breed.is_none());
    }

    #[test]
    fn get_pet_by_id() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert_pet(&rex()).unwrap();

        let pet = db.get_pet(id).unwrap().unwrap();
        assert_eq!(pet.name, "Rex");
        assert!(db.get_pet(id + 1).unwrap().is_none());
    }

    #[test]
    fn non_integer_age_reads_as_none() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO pets (name, species, age) VALUES ('Rex', 'Dog', '2 years'), ('Tom', 'Cat', 2.5)",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let pets = db.list_pets().unwrap();
        assert_eq!(pets.len(), 2);
        assert!(pets.iter().all(|pet| pet.age.is_none()));
        assert_eq!(pets[0].name, "Rex");

        let rex = db.get_pet(pets[0].id).unwrap().unwrap();
        assert!(rex.age.is_none());
    }

    #[test]
    fn seed_only_fills_empty_table() {
        let db = Database::open_in_memory().unwrap();

        assert_eq!(db.seed_pets(&[rex(), rex()]).unwrap(), 2);
        assert_eq!(db.seed_pets(&[rex()]).unwrap(), 0);
        assert_eq!(db.with_conn(count_pets).unwrap(), 2);
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.db");

        {
            let db = Database::open(&path).unwrap();
            db.create_user("a@x.com", "hash").unwrap();
            db.insert_pet(&rex()).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert!(db.get_user_by_email("a@x.com").unwrap().is_some());
        assert_eq!(db.with_conn(count_pets).unwrap(), 1);
    }
}
