//! Points REST API — the four CRUD operations on `/api/locations`.
//!
//! Field names are lowercase on the wire; the capitalized spellings the early
//! client iterations sent (`Latitude`, `Longitude`, `Color`, `Note`) are still
//! accepted as aliases on input. Ids are opaque strings, but a JSON number is
//! accepted wherever an id is read because the file-store scheme used raw
//! timestamps.

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;

use crate::AppState;
use crate::store::{NewPoint, PointUpdate, StoreError};

/// An id as it appears in request bodies: a string, or a legacy number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointId {
    Text(String),
    Number(i64),
}

impl PointId {
    fn into_string(self) -> String {
        match self {
            PointId::Text(s) => s,
            PointId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatePointRequest {
    #[serde(alias = "Latitude")]
    latitude: Option<f64>,
    #[serde(alias = "Longitude")]
    longitude: Option<f64>,
    #[serde(alias = "Color")]
    color: Option<String>,
    #[serde(alias = "Note")]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdatePointRequest {
    id: Option<PointId>,
    #[serde(alias = "Color")]
    color: Option<String>,
    #[serde(alias = "Note")]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeletePointRequest {
    id: Option<PointId>,
}

fn storage_error(e: &StoreError) -> HttpResponse {
    log::error!("[LOCATIONS] Storage failure: {}", e);
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": e.to_string()
    }))
}

/// GET /api/locations — all points as a JSON array
async fn list_locations(data: web::Data<AppState>) -> impl Responder {
    match data.store.list() {
        Ok(points) => HttpResponse::Ok().json(points),
        Err(e) => storage_error(&e),
    }
}

/// POST /api/locations — create a point, returning it with its assigned id
async fn create_location(
    data: web::Data<AppState>,
    body: web::Json<CreatePointRequest>,
) -> impl Responder {
    let body = body.into_inner();

    let (latitude, longitude, color) = match (body.latitude, body.longitude, body.color) {
        (Some(lat), Some(lng), Some(color)) if !color.trim().is_empty() => (lat, lng, color),
        _ => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Missing fields"
            }));
        }
    };

    let new = NewPoint {
        latitude,
        longitude,
        color,
        note: body.note.unwrap_or_default(),
    };

    match data.store.create(new) {
        Ok(point) => HttpResponse::Ok().json(point),
        Err(StoreError::Validation(_)) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Missing fields"
        })),
        Err(e) => storage_error(&e),
    }
}

/// PUT /api/locations — update a point's color (and optionally its note)
///
/// Omitting `note` leaves the stored note untouched; an explicit empty string
/// clears it.
async fn update_location(
    data: web::Data<AppState>,
    body: web::Json<UpdatePointRequest>,
) -> impl Responder {
    let body = body.into_inner();

    let (id, color) = match (body.id, body.color) {
        (Some(id), Some(color)) if !color.trim().is_empty() => (id.into_string(), color),
        _ => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Missing fields"
            }));
        }
    };

    let change = PointUpdate {
        color,
        note: body.note,
    };

    match data.store.update(&id, change) {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(StoreError::NotFound) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Not found"
        })),
        Err(e) => storage_error(&e),
    }
}

/// DELETE /api/locations — remove a point by id
async fn delete_location(
    data: web::Data<AppState>,
    body: web::Json<DeletePointRequest>,
) -> impl Responder {
    let id = match body.into_inner().id {
        Some(id) => id.into_string(),
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Missing id"
            }));
        }
    };

    match data.store.delete(&id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(StoreError::NotFound) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Not found"
        })),
        Err(e) => storage_error(&e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/locations")
            .route(web::get().to(list_locations))
            .route(web::post().to(create_location))
            .route(web::put().to(update_location))
            .route(web::delete().to(delete_location)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use std::sync::Arc;
    use tempfile::tempdir;

    use crate::AppState;
    use crate::config::Config;
    use crate::store::{PointStore, SqliteStore};

    fn test_state(dir: &tempfile::TempDir) -> web::Data<AppState> {
        let db_path = dir.path().join("test.db");
        let store: Arc<dyn PointStore> =
            Arc::new(SqliteStore::new(db_path.to_str().unwrap()).unwrap());

        let config = Config::from_env();

        web::Data::new(AppState { store, config })
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .configure(super::config),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_list_empty() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::get().uri("/api/locations").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_create_then_list_round_trip() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::post()
            .uri("/api/locations")
            .set_json(serde_json::json!({
                "latitude": 33.65,
                "longitude": 35.97,
                "color": "red",
                "note": "test"
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["latitude"], 33.65);
        assert_eq!(created["longitude"], 35.97);
        assert_eq!(created["color"], "red");
        assert_eq!(created["note"], "test");
        assert!(created["id"].is_string());

        let req = test::TestRequest::get().uri("/api/locations").to_request();
        let listed: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["id"], created["id"]);
        assert_eq!(listed[0]["color"], "red");
        assert_eq!(listed[0]["note"], "test");
    }

    #[actix_web::test]
    async fn test_create_accepts_legacy_capitalized_fields() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::post()
            .uri("/api/locations")
            .set_json(serde_json::json!({
                "Latitude": 33.65,
                "Longitude": 35.97,
                "Color": "green",
                "Note": "legacy"
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        // Output is normalized to lowercase regardless of input casing
        assert_eq!(created["latitude"], 33.65);
        assert_eq!(created["color"], "green");
        assert_eq!(created["note"], "legacy");
        assert!(created.get("Latitude").is_none());
    }

    #[actix_web::test]
    async fn test_create_missing_fields_is_400() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::post()
            .uri("/api/locations")
            .set_json(serde_json::json!({ "latitude": 33.65, "color": "red" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing fields");
    }

    #[actix_web::test]
    async fn test_update_color_keeps_note() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::post()
            .uri("/api/locations")
            .set_json(serde_json::json!({
                "latitude": 1.0, "longitude": 2.0, "color": "red", "note": "keep me"
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri("/api/locations")
            .set_json(serde_json::json!({ "id": id, "color": "green" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);

        let req = test::TestRequest::get().uri("/api/locations").to_request();
        let listed: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed[0]["color"], "green");
        assert_eq!(listed[0]["note"], "keep me");
    }

    #[actix_web::test]
    async fn test_update_unknown_id_is_404() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::put()
            .uri("/api/locations")
            .set_json(serde_json::json!({ "id": "no-such-id", "color": "green" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Not found");
    }

    #[actix_web::test]
    async fn test_update_missing_color_is_400() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::put()
            .uri("/api/locations")
            .set_json(serde_json::json!({ "id": "whatever" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_update_accepts_numeric_legacy_id() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        // Unknown numeric id still parses — it just isn't found
        let req = test::TestRequest::put()
            .uri("/api/locations")
            .set_json(serde_json::json!({ "id": 1718000000000i64, "color": "green" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_delete_then_list_excludes_id() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::post()
            .uri("/api/locations")
            .set_json(serde_json::json!({
                "latitude": 1.0, "longitude": 2.0, "color": "blue"
            }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::delete()
            .uri("/api/locations")
            .set_json(serde_json::json!({ "id": id }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);

        let req = test::TestRequest::get().uri("/api/locations").to_request();
        let listed: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed, serde_json::json!([]));
    }

    #[actix_web::test]
    async fn test_delete_missing_id_is_400() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::delete()
            .uri("/api/locations")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing id");
    }

    #[actix_web::test]
    async fn test_delete_unknown_id_is_404() {
        let dir = tempdir().unwrap();
        let app = test_app!(test_state(&dir));

        let req = test::TestRequest::delete()
            .uri("/api/locations")
            .set_json(serde_json::json!({ "id": "missing" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
