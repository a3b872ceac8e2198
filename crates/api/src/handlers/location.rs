//! Handlers for the location collection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use multiverse_core::error::CoreError;
use multiverse_core::pagination::{clamp_page, PageInfo};
use multiverse_core::types::DbId;
use multiverse_db::models::location::{CreateLocation, Location, NewLocation, UpdateLocation};
use multiverse_db::repositories::{CharacterRepo, LocationRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{conflict, validation};
use crate::query::PageParams;
use crate::response::{envelope, ApiResponse, Paged};
use crate::state::AppState;

/// POST /create_location
///
/// `name` and `dimension` are required; `(name, dimension)` must be
/// unique. `residents` carries character names, resolved here to the URLs
/// of matching characters (unmatched names are dropped).
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<ApiResponse<Location>>)> {
    if input.name.is_empty() || input.dimension.is_empty() {
        return Err(validation("empty value in payload"));
    }

    if LocationRepo::find_duplicate(&state.pool, &input.name, &input.dimension)
        .await?
        .is_some()
    {
        return Err(conflict("location already exists"));
    }

    let residents = if input.residents.is_empty() {
        Vec::new()
    } else {
        CharacterRepo::urls_by_names(&state.pool, &input.residents).await?
    };

    let location = LocationRepo::create(
        &state.pool,
        &NewLocation {
            name: input.name,
            dimension: input.dimension,
            residents,
        },
    )
    .await?;

    Ok(envelope(
        StatusCode::CREATED,
        "Success: location created.",
        location,
    ))
}

/// GET /read_location/{id}
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ApiResponse<Location>>)> {
    let location = LocationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;
    Ok(envelope(StatusCode::OK, "Success", location))
}

/// GET /read_location_all?page=N
pub async fn read_all(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<(StatusCode, Json<ApiResponse<Paged<Location>>>)> {
    let page = clamp_page(params.page);
    let data = LocationRepo::list_page(&state.pool, page).await?;
    let count = LocationRepo::count(&state.pool).await?;

    let list_url = format!("{}/read_location_all", state.config.public_base_url);
    let info = PageInfo::new(count, page, &list_url);

    Ok(envelope(StatusCode::OK, "Success", Paged { info, data }))
}

/// PUT /update_location/{id}
///
/// A present `name` must be non-empty and free for the taking (another
/// location using it is a conflict; the record itself is not). A present
/// empty `dimension` coerces to "unknown". `residents` passes through.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateLocation>,
) -> AppResult<(StatusCode, Json<ApiResponse<Location>>)> {
    LocationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;

    if let Some(name) = &input.name {
        if name.is_empty() {
            return Err(validation("name is empty"));
        }
        if LocationRepo::name_taken_by_other(&state.pool, name, id).await? {
            return Err(conflict("name already exists"));
        }
    }
    if let Some(dimension) = &mut input.dimension {
        if dimension.is_empty() {
            *dimension = "unknown".to_string();
        }
    }

    let location = LocationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;

    Ok(envelope(
        StatusCode::OK,
        "Success: location updated.",
        location,
    ))
}

/// DELETE /delete_location/{id}
///
/// Removes the record and resets every character reference targeting it to
/// the Unknown sentinel; responds with the deleted snapshot.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ApiResponse<Location>>)> {
    let location = LocationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;

    LocationRepo::delete(&state.pool, id).await?;
    CharacterRepo::clear_location_refs(&state.pool, id).await?;

    Ok(envelope(
        StatusCode::OK,
        "Success: location deleted.",
        location,
    ))
}
