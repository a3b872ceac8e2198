//! HTTP-level integration tests for the character endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

/// Create a location through the API and return its record.
async fn seed_location(pool: &PgPool, name: &str, dimension: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/create_location",
        serde_json::json!({"name": name, "dimension": dimension, "residents": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// A valid create-character payload living on `location`.
fn char_payload(name: &str, location: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "status": "Alive",
        "species": "Human",
        "gender": "Male",
        "origin": location,
        "location": location,
    })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_character_resolves_references(pool: PgPool) {
    let earth = seed_location(&pool, "Earth", "C-137").await;
    let earth_url = earth["url"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(app, "/create_char", char_payload("Rick", "Earth")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Success: character created.");
    assert_eq!(json["status_code"], 201);

    let data = &json["data"];
    assert_eq!(data["id"], 1);
    assert_eq!(data["name"], "Rick");
    assert_eq!(data["origin"], serde_json::json!(["Earth", earth_url]));
    assert_eq!(data["location"], serde_json::json!(["Earth", earth_url]));
    assert!(data["url"].as_str().unwrap().ends_with("/character/1"));
    assert!(data["created"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn character_ids_are_sequential(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;

    let mut last_id = 0;
    for name in ["Rick", "Morty", "Summer"] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/create_char", char_payload(name, "Earth")).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["data"]["id"].as_i64().unwrap();
        assert!(id > last_id, "id {id} must exceed previous {last_id}");
        last_id = id;
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_character_appends_to_residents(pool: PgPool) {
    let earth = seed_location(&pool, "Earth", "C-137").await;
    let earth_id = earth["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/create_char", char_payload("Rick", "Earth")).await;
    let char_url = body_json(response).await["data"]["url"]
        .as_str()
        .unwrap()
        .to_string();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/read_location/{earth_id}")).await;
    let residents = body_json(response).await["data"]["residents"].clone();
    assert_eq!(residents, serde_json::json!([char_url]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_missing_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/create_char", serde_json::json!({"name": "Rick"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "empty value in payload");
    assert_eq!(json["status_code"], 400);
    assert!(json["data"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_status_outside_value_list(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;

    let mut payload = char_payload("Rick", "Earth");
    payload["status"] = "Deceased".into();

    let app = common::build_test_app(pool);
    let response = post_json(app, "/create_char", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_gender_outside_value_list(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;

    let mut payload = char_payload("Rick", "Earth");
    payload["gender"] = "other".into();

    let app = common::build_test_app(pool);
    let response = post_json(app, "/create_char", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_unknown_location_sentinel(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;

    let mut payload = char_payload("Rick", "Earth");
    payload["location"] = "unknown".into();

    let app = common::build_test_app(pool);
    let response = post_json(app, "/create_char", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_unresolvable_location(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/create_char", char_payload("Rick", "Nowhere")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_allows_unknown_origin(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;

    let mut payload = char_payload("Rick", "Earth");
    payload["origin"] = "unknown".into();

    let app = common::build_test_app(pool);
    let response = post_json(app, "/create_char", payload).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["origin"], serde_json::json!(["unknown", ""]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_full_identity_duplicate(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/create_char", char_payload("Rick", "Earth")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/create_char", char_payload("Rick", "Earth")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn read_character_by_id(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;
    let app = common::build_test_app(pool.clone());
    post_json(app, "/create_char", char_payload("Rick", "Earth")).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/read_char/1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Success");
    assert_eq!(json["data"]["name"], "Rick");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn read_nonexistent_character_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/read_char/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Character with id 999 not found");
    assert_eq!(json["status_code"], 404);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn paged_listing_serves_fixed_pages_of_ten(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;
    for i in 0..15 {
        let app = common::build_test_app(pool.clone());
        let response =
            post_json(app, "/create_char", char_payload(&format!("Char{i}"), "Earth")).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/read_char_all").await).await;
    assert_eq!(json["data"]["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["data"]["info"]["count"], 15);
    assert_eq!(json["data"]["info"]["pages"], 1);
    assert_eq!(
        json["data"]["info"]["next"],
        "http://localhost:3000/read_char_all?page=2"
    );
    assert!(json["data"]["info"]["prev"].is_null());

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/read_char_all?page=2").await).await;
    assert_eq!(json["data"]["data"].as_array().unwrap().len(), 5);
    assert!(json["data"]["info"]["next"].is_null());
    assert_eq!(
        json["data"]["info"]["prev"],
        "http://localhost:3000/read_char_all?page=1"
    );
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_applies_only_present_fields(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;
    let app = common::build_test_app(pool.clone());
    post_json(app, "/create_char", char_payload("Rick", "Earth")).await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/update_char/1",
        serde_json::json!({"status": "Dead"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Success: character updated.");
    assert_eq!(json["data"]["status"], "Dead");
    // Untouched fields survive.
    assert_eq!(json["data"]["name"], "Rick");
    assert_eq!(json["data"]["species"], "Human");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_rejects_empty_field_values(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;
    let app = common::build_test_app(pool.clone());
    post_json(app, "/create_char", char_payload("Rick", "Earth")).await;

    let app = common::build_test_app(pool);
    let response = put_json(app, "/update_char/1", serde_json::json!({"species": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_rejects_unresolvable_reference(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;
    let app = common::build_test_app(pool.clone());
    post_json(app, "/create_char", char_payload("Rick", "Earth")).await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/update_char/1",
        serde_json::json!({"origin": "Nowhere"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_can_set_reference_to_unknown(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;
    let app = common::build_test_app(pool.clone());
    post_json(app, "/create_char", char_payload("Rick", "Earth")).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/update_char/1",
        serde_json::json!({"location": "unknown"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["location"], serde_json::json!(["unknown", ""]));
    // Origin still points at Earth.
    assert_eq!(json["data"]["origin"][0], "Earth");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_moves_url_between_residents_lists(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;
    let citadel = seed_location(&pool, "Citadel of Ricks", "unknown").await;
    let citadel_id = citadel["id"].as_i64().unwrap();

    let mut payload = char_payload("Rick", "Earth");
    payload["origin"] = "unknown".into();
    let app = common::build_test_app(pool.clone());
    let char_url = body_json(post_json(app, "/create_char", payload).await).await["data"]["url"]
        .as_str()
        .unwrap()
        .to_string();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/update_char/1",
        serde_json::json!({"location": "Citadel of Ricks"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let earth = body_json(get(app, "/read_location/1").await).await;
    assert_eq!(earth["data"]["residents"], serde_json::json!([]));

    let app = common::build_test_app(pool);
    let citadel = body_json(get(app, &format!("/read_location/{citadel_id}")).await).await;
    assert_eq!(citadel["data"]["residents"], serde_json::json!([char_url]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_nonexistent_character_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/update_char/7", serde_json::json!({"name": "X"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_character_returns_snapshot_and_cleans_residents(pool: PgPool) {
    seed_location(&pool, "Earth", "C-137").await;
    let app = common::build_test_app(pool.clone());
    post_json(app, "/create_char", char_payload("Rick", "Earth")).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/delete_char/1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Success: character deleted.");
    assert_eq!(json["data"]["name"], "Rick");

    // Pulled from the residents list.
    let app = common::build_test_app(pool.clone());
    let earth = body_json(get(app, "/read_location/1").await).await;
    assert_eq!(earth["data"]["residents"], serde_json::json!([]));

    // Gone from the collection.
    let app = common::build_test_app(pool);
    let response = get(app, "/read_char/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_nonexistent_character_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/delete_char/5").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
