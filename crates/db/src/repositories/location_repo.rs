//! Repository for the `locations` table.

use multiverse_core::pagination::{page_offset, PAGE_SIZE};
use multiverse_core::types::DbId;
use sqlx::PgPool;

use crate::models::location::{Location, NewLocation, UpdateLocation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, dimension, residents, url, created";

/// Provides CRUD operations for locations plus maintenance of the
/// `residents` lists as characters come and go.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, dimension, residents)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.dimension)
            .bind(&input.residents)
            .fetch_one(pool)
            .await
    }

    /// Find a location by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// First location with the given name, if any. Reference resolution
    /// matches by name alone, lowest id winning.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE name = $1 ORDER BY id ASC LIMIT 1");
        sqlx::query_as::<_, Location>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// One fixed-size page of locations, ordered by id ascending.
    pub async fn list_page(pool: &PgPool, page: i64) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Location>(&query)
            .bind(PAGE_SIZE)
            .bind(page_offset(page))
            .fetch_all(pool)
            .await
    }

    /// Total number of locations.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(pool)
            .await
    }

    /// Id of an existing location with the same name and dimension, if any.
    pub async fn find_duplicate(
        pool: &PgPool,
        name: &str,
        dimension: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM locations WHERE name = $1 AND dimension = $2")
            .bind(name)
            .bind(dimension)
            .fetch_optional(pool)
            .await
    }

    /// Whether a location other than `id` already uses `name`.
    pub async fn name_taken_by_other(
        pool: &PgPool,
        name: &str,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE name = $1 AND id <> $2)")
            .bind(name)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Apply a validated patch. Only non-`None` fields are written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = COALESCE($2, name),
                dimension = COALESCE($3, dimension),
                residents = COALESCE($4, residents)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(patch.name.as_deref())
            .bind(patch.dimension.as_deref())
            .bind(patch.residents.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a location by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a character URL to one location's `residents`, if not already
    /// present.
    pub async fn add_resident(pool: &PgPool, id: DbId, url: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE locations SET residents = array_append(residents, $2)
             WHERE id = $1 AND NOT ($2 = ANY(residents))",
        )
        .bind(id)
        .bind(url)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a character URL from one location's `residents`.
    pub async fn remove_resident(pool: &PgPool, id: DbId, url: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE locations SET residents = array_remove(residents, $2) WHERE id = $1")
            .bind(id)
            .bind(url)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Remove a character URL from every `residents` list that holds it.
    /// Run when that character is deleted. Returns the number of locations
    /// touched.
    pub async fn remove_resident_everywhere(
        pool: &PgPool,
        url: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE locations SET residents = array_remove(residents, $1)
             WHERE $1 = ANY(residents)",
        )
        .bind(url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
