/// Database row types. These map directly to SQLite rows.
/// Distinct from pawhaven-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
}

pub struct PetRow {
    pub id: i64,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub age: Option<i64>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl From<PetRow> for pawhaven_types::models::Pet {
    fn from(row: PetRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            species: row.species,
            breed: row.breed,
            color: row.color,
            age: row.age,
            location: row.location,
            description: row.description,
            image: row.image,
        }
    }
}
