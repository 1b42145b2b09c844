use serde::{Deserialize, Serialize};

/// A pet listing as returned by `GET /pets`. Optional columns serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
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

/// A pet that has not been stored yet. Used by the startup seed file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPet {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// What a logged-in session remembers about its user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: i64,
    pub email: String,
}
