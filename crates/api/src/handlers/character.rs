//! Handlers for the character collection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use multiverse_core::error::CoreError;
use multiverse_core::pagination::{clamp_page, PageInfo};
use multiverse_core::refs::LocationRef;
use multiverse_core::types::DbId;
use multiverse_db::models::character::{
    Character, CharacterPatch, CreateCharacter, NewCharacter, UpdateCharacter,
};
use multiverse_db::repositories::{CharacterRepo, LocationRepo};
use multiverse_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::{conflict, validation};
use crate::query::PageParams;
use crate::response::{envelope, ApiResponse, Paged};
use crate::state::AppState;

/// POST /create_char
///
/// All six fields are required; `status`/`gender` must come from their
/// value lists; `location` must name an existing location; `origin` may be
/// the "unknown" sentinel. A full-identity duplicate is a conflict.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<ApiResponse<Character>>)> {
    let required = [
        &input.name,
        &input.status,
        &input.species,
        &input.gender,
        &input.origin,
        &input.location,
    ];
    if required.iter().any(|field| field.is_empty()) {
        return Err(validation("empty value in payload"));
    }

    let status = input.status.parse()?;
    let gender = input.gender.parse()?;

    if input.location == "unknown" {
        return Err(validation("location name 'unknown' does not exist"));
    }
    let location = resolve_reference(&state.pool, &input.location, "location").await?;
    let origin = if input.origin == "unknown" {
        LocationRef::Unknown
    } else {
        resolve_reference(&state.pool, &input.origin, "origin").await?
    };

    let new = NewCharacter {
        name: input.name,
        status,
        species: input.species,
        gender,
        origin,
        location,
    };

    if CharacterRepo::find_duplicate(&state.pool, &new).await?.is_some() {
        return Err(conflict("character already exists"));
    }

    let character = CharacterRepo::create(&state.pool, &new).await?;
    sync_residents(
        &state.pool,
        &character.url,
        [None, None],
        [character.origin.target(), character.location.target()],
    )
    .await?;

    Ok(envelope(
        StatusCode::CREATED,
        "Success: character created.",
        character,
    ))
}

/// GET /read_char/{id}
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ApiResponse<Character>>)> {
    let character = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(envelope(StatusCode::OK, "Success", character))
}

/// GET /read_char_all?page=N
pub async fn read_all(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<(StatusCode, Json<ApiResponse<Paged<Character>>>)> {
    let page = clamp_page(params.page);
    let data = CharacterRepo::list_page(&state.pool, page).await?;
    let count = CharacterRepo::count(&state.pool).await?;

    let list_url = format!("{}/read_char_all", state.config.public_base_url);
    let info = PageInfo::new(count, page, &list_url);

    Ok(envelope(StatusCode::OK, "Success", Paged { info, data }))
}

/// PUT /update_char/{id}
///
/// Applies only the fields present in the body, each validated
/// independently; an empty string is never a valid value.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<(StatusCode, Json<ApiResponse<Character>>)> {
    let existing = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    let mut patch = CharacterPatch::default();
    if let Some(name) = input.name {
        patch.name = Some(non_empty(name, "name")?);
    }
    if let Some(status) = input.status {
        patch.status = Some(non_empty(status, "status")?.parse()?);
    }
    if let Some(species) = input.species {
        patch.species = Some(non_empty(species, "species")?);
    }
    if let Some(gender) = input.gender {
        patch.gender = Some(non_empty(gender, "gender")?.parse()?);
    }
    if let Some(origin) = input.origin {
        let origin = non_empty(origin, "origin")?;
        patch.origin = Some(if origin == "unknown" {
            LocationRef::Unknown
        } else {
            resolve_reference(&state.pool, &origin, "origin").await?
        });
    }
    if let Some(location) = input.location {
        let location = non_empty(location, "location")?;
        patch.location = Some(if location == "unknown" {
            LocationRef::Unknown
        } else {
            resolve_reference(&state.pool, &location, "location").await?
        });
    }

    let updated = CharacterRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    sync_residents(
        &state.pool,
        &updated.url,
        [existing.origin.target(), existing.location.target()],
        [updated.origin.target(), updated.location.target()],
    )
    .await?;

    Ok(envelope(
        StatusCode::OK,
        "Success: character updated.",
        updated,
    ))
}

/// DELETE /delete_char/{id}
///
/// Removes the record and pulls its URL from every location's `residents`
/// list; responds with the deleted snapshot.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ApiResponse<Character>>)> {
    let character = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    CharacterRepo::delete(&state.pool, id).await?;
    LocationRepo::remove_resident_everywhere(&state.pool, &character.url).await?;

    Ok(envelope(
        StatusCode::OK,
        "Success: character deleted.",
        character,
    ))
}

/// Resolve a reference field to an existing location by display name.
async fn resolve_reference(
    pool: &DbPool,
    name: &str,
    field: &'static str,
) -> Result<LocationRef, AppError> {
    let location = LocationRepo::find_by_name(pool, name).await?.ok_or_else(|| {
        validation(format!("{field} name '{name}' does not exist"))
    })?;
    Ok(LocationRef::resolved(location.id, location.name))
}

fn non_empty(value: String, field: &'static str) -> Result<String, AppError> {
    if value.is_empty() {
        return Err(validation(format!("{field} value is invalid")));
    }
    Ok(value)
}

/// Keep `residents` lists in step with a character's references: the URL is
/// removed from locations it no longer points at and added where it now
/// does.
async fn sync_residents(
    pool: &DbPool,
    url: &str,
    old: [Option<DbId>; 2],
    new: [Option<DbId>; 2],
) -> Result<(), sqlx::Error> {
    let old: Vec<DbId> = old.into_iter().flatten().collect();
    let new: Vec<DbId> = new.into_iter().flatten().collect();

    for id in old.iter().copied().filter(|id| !new.contains(id)) {
        LocationRepo::remove_resident(pool, id, url).await?;
    }
    for id in new.iter().copied().filter(|id| !old.contains(id)) {
        LocationRepo::add_resident(pool, id, url).await?;
    }
    Ok(())
}
