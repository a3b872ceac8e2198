//! Repository for the `characters` table.

use multiverse_core::pagination::{page_offset, PAGE_SIZE};
use multiverse_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::character::{Character, CharacterPatch, NewCharacter};

/// Column list shared across queries to avoid repetition. Reference display
/// names are joined in from the locations table.
const COLUMNS: &str = "c.id, c.name, c.status, c.species, c.gender, \
     c.origin_id, o.name AS origin_name, \
     c.location_id, l.name AS location_name, \
     c.url, c.created";

const FROM: &str = "FROM characters c \
     LEFT JOIN locations o ON o.id = c.origin_id \
     LEFT JOIN locations l ON l.id = c.location_id";

/// Provides CRUD operations for characters plus the cross-collection
/// cleanup run when a location disappears.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created record.
    ///
    /// The id comes from the table sequence and the `url` column is
    /// generated from it, so concurrent creates cannot collide.
    pub async fn create(pool: &PgPool, input: &NewCharacter) -> Result<Character, sqlx::Error> {
        let (id, url, created): (DbId, String, Timestamp) = sqlx::query_as(
            "INSERT INTO characters (name, status, species, gender, origin_id, location_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, url, created",
        )
        .bind(&input.name)
        .bind(input.status.as_str())
        .bind(&input.species)
        .bind(input.gender.as_str())
        .bind(input.origin.target())
        .bind(input.location.target())
        .fetch_one(pool)
        .await?;

        Ok(Character {
            id,
            name: input.name.clone(),
            status: input.status,
            species: input.species.clone(),
            gender: input.gender,
            origin: input.origin.clone(),
            location: input.location.clone(),
            url,
            created,
        })
    }

    /// Find a character by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE c.id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One fixed-size page of characters, ordered by id ascending.
    pub async fn list_page(pool: &PgPool, page: i64) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} ORDER BY c.id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Character>(&query)
            .bind(PAGE_SIZE)
            .bind(page_offset(page))
            .fetch_all(pool)
            .await
    }

    /// Total number of characters.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM characters")
            .fetch_one(pool)
            .await
    }

    /// Id of an existing character with the same full identity, if any.
    ///
    /// Unknown references compare equal (`IS NOT DISTINCT FROM`), matching
    /// the `uq_characters_identity` index that backstops this check.
    pub async fn find_duplicate(
        pool: &PgPool,
        input: &NewCharacter,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM characters
             WHERE name = $1 AND status = $2 AND species = $3 AND gender = $4
               AND origin_id IS NOT DISTINCT FROM $5
               AND location_id IS NOT DISTINCT FROM $6",
        )
        .bind(&input.name)
        .bind(input.status.as_str())
        .bind(&input.species)
        .bind(input.gender.as_str())
        .bind(input.origin.target())
        .bind(input.location.target())
        .fetch_optional(pool)
        .await
    }

    /// Apply a validated patch. Only non-`None` fields are written; a
    /// present reference overwrites the stored target (possibly to the
    /// Unknown sentinel, hence the flag/value pairs instead of COALESCE).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &CharacterPatch,
    ) -> Result<Option<Character>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE characters SET
                name = COALESCE($2, name),
                status = COALESCE($3, status),
                species = COALESCE($4, species),
                gender = COALESCE($5, gender),
                origin_id = CASE WHEN $6 THEN $7 ELSE origin_id END,
                location_id = CASE WHEN $8 THEN $9 ELSE location_id END
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.species.as_deref())
        .bind(patch.gender.map(|g| g.as_str()))
        .bind(patch.origin.is_some())
        .bind(patch.origin.as_ref().and_then(|r| r.target()))
        .bind(patch.location.is_some())
        .bind(patch.location.as_ref().and_then(|r| r.target()))
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a character by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reset every reference at the given location to the Unknown sentinel.
    /// Run when that location is deleted. Returns the number of cleared
    /// references.
    pub async fn clear_location_refs(pool: &PgPool, location_id: DbId) -> Result<u64, sqlx::Error> {
        let origins = sqlx::query("UPDATE characters SET origin_id = NULL WHERE origin_id = $1")
            .bind(location_id)
            .execute(pool)
            .await?;
        let locations =
            sqlx::query("UPDATE characters SET location_id = NULL WHERE location_id = $1")
                .bind(location_id)
                .execute(pool)
                .await?;
        Ok(origins.rows_affected() + locations.rows_affected())
    }

    /// URLs of all characters whose name appears in `names`, in id order.
    /// Names that match nothing contribute nothing.
    pub async fn urls_by_names(
        pool: &PgPool,
        names: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT url FROM characters WHERE name = ANY($1) ORDER BY id ASC")
            .bind(names)
            .fetch_all(pool)
            .await
    }
}
