use axum::{
    Json,
    extract::{Path, State},
};

use pawhaven_types::models::Pet;

use crate::auth::AppState;
use crate::blocking;
use crate::error::ApiError;

/// Every pet in the table. No filtering or paging.
pub async fn list_pets(State(state): State<AppState>) -> Result<Json<Vec<Pet>>, ApiError> {
    let db = state.clone();
    let rows = blocking(move || db.db.list_pets())
        .await
        .map_err(ApiError::persistence("Database error"))?;

    Ok(Json(rows.into_iter().map(Pet::from).collect()))
}

/// A single pet, or `null` when the id matches nothing.
pub async fn get_pet(
    State(state): State<AppState>,
    Path(pet_id): Path<i64>,
) -> Result<Json<Option<Pet>>, ApiError> {
    let db = state.clone();
    let row = blocking(move || db.db.get_pet(pet_id))
        .await
        .map_err(ApiError::persistence("Database error"))?;

    Ok(Json(row.map(Pet::from)))
}
