//! Notes REST API — CRUD plus paginated search over the note store.

use actix_web::{web, HttpResponse, Responder};
use notes_types::{ApiResponse, CreateNoteRequest, ListNotesQuery, UpdateNoteRequest};

use super::validation;
use super::{store_error_response, validation_error_response};
use crate::AppState;

/// Create a note
async fn create_note(
    data: web::Data<AppState>,
    body: web::Json<CreateNoteRequest>,
) -> impl Responder {
    let req = body.into_inner();
    if let Err(e) = validation::validate_create(&req) {
        return validation_error_response(&e);
    }

    match data.store.create(&req.title, &req.content) {
        Ok(note) => HttpResponse::Created().json(ApiResponse::ok("Note created successfully", note)),
        Err(e) => store_error_response(&e),
    }
}

/// List notes, optionally filtered by `search`
async fn list_notes(
    data: web::Data<AppState>,
    query: web::Query<ListNotesQuery>,
) -> impl Responder {
    let query = validation::list_query(query.into_inner());

    match data.store.list(&query) {
        Ok(page) => {
            let pagination = page.pagination();
            HttpResponse::Ok().json(ApiResponse::paginated(
                "Notes retrieved successfully",
                page.items,
                pagination,
            ))
        }
        Err(e) => store_error_response(&e),
    }
}

/// Get a note by ID
async fn get_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    if let Err(e) = validation::validate_note_id(&id) {
        return validation_error_response(&e);
    }

    match data.store.get(&id) {
        Ok(note) => HttpResponse::Ok().json(ApiResponse::ok("Note retrieved successfully", note)),
        Err(e) => store_error_response(&e),
    }
}

/// Update a note's title and/or content
async fn update_note(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateNoteRequest>,
) -> impl Responder {
    let id = path.into_inner();
    if let Err(e) = validation::validate_note_id(&id) {
        return validation_error_response(&e);
    }
    let changes = body.into_inner();
    if let Err(e) = validation::validate_update(&changes) {
        return validation_error_response(&e);
    }

    match data.store.update(&id, changes) {
        Ok(note) => HttpResponse::Ok().json(ApiResponse::ok("Note updated successfully", note)),
        Err(e) => store_error_response(&e),
    }
}

/// Delete a note
async fn delete_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    if let Err(e) = validation::validate_note_id(&id) {
        return validation_error_response(&e);
    }

    match data.store.delete(&id) {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message("Note deleted successfully")),
        Err(e) => store_error_response(&e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notes")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/", web::get().to(list_notes))
            .route("/", web::post().to(create_note))
            // Create path the browser client posts to
            .route("/post", web::post().to(create_note))
            .route("/{id}", web::get().to(get_note))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::{json_config, query_config, route_not_found};
    use crate::notes::NoteStore;
    use actix_web::{test, App};
    use notes_types::Note;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Instant;
    use tempfile::{tempdir, TempDir};

    fn new_state() -> (TempDir, web::Data<AppState>) {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("notes.json"));
        store.initialize().unwrap();
        let state = web::Data::new(AppState {
            store: Arc::new(store),
            started_at: Instant::now(),
        });
        (dir, state)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .app_data(json_config())
                    .app_data(query_config())
                    .configure(config)
                    .default_service(web::to(route_not_found)),
            )
            .await
        };
    }

    fn seed(state: &web::Data<AppState>, title: &str, content: &str) -> Note {
        state.store.create(title, content).unwrap()
    }

    #[actix_web::test]
    async fn test_create_note() {
        let (_dir, state) = new_state();
        let app = app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/notes")
            .set_json(json!({"title": "Shopping", "content": "eggs"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Note created successfully");
        assert_eq!(body["data"]["title"], "Shopping");
        assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
        assert_eq!(state.store.count().unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_create_note_legacy_path() {
        let (_dir, state) = new_state();
        let app = app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/notes/post")
            .set_json(json!({"title": "Legacy", "content": "client path"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
    }

    #[actix_web::test]
    async fn test_create_note_validation() {
        let (_dir, state) = new_state();
        let app = app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/notes")
            .set_json(json!({"title": "ab", "content": "body"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Validation Error");
        assert_eq!(body["error"], "Title must be at least 3 characters");

        // Missing field is rejected by the JSON extractor with the same envelope
        let req = test::TestRequest::post()
            .uri("/notes")
            .set_json(json!({"title": "No content"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Validation Error");

        assert_eq!(state.store.count().unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_list_notes_paginates() {
        let (_dir, state) = new_state();
        for i in 0..25 {
            seed(&state, &format!("Note {}", i), "body");
        }
        let app = app!(state.clone());

        let req = test::TestRequest::get().uri("/notes?page=3&limit=10").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Notes retrieved successfully");
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
        assert_eq!(body["data"][0]["title"], "Note 20");
        assert_eq!(body["pagination"], json!({"page": 3, "limit": 10, "total": 25, "totalPages": 3}));
    }

    #[actix_web::test]
    async fn test_list_notes_search() {
        let (_dir, state) = new_state();
        seed(&state, "Foobar", "first");
        seed(&state, "Groceries", "food for the week");
        seed(&state, "Other", "nothing");
        let app = app!(state.clone());

        let req = test::TestRequest::get().uri("/notes?search=FOO").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["pagination"]["total"], 2);
        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["pagination"]["limit"], 10);
        assert_eq!(body["data"][0]["title"], "Foobar");
        assert_eq!(body["data"][1]["title"], "Groceries");
    }

    #[actix_web::test]
    async fn test_list_notes_rejects_bad_page() {
        let (_dir, state) = new_state();
        let app = app!(state);

        let req = test::TestRequest::get().uri("/notes?page=abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Validation Error");
    }

    #[actix_web::test]
    async fn test_get_note() {
        let (_dir, state) = new_state();
        let note = seed(&state, "Readable", "content");
        let app = app!(state.clone());

        let req = test::TestRequest::get().uri(&format!("/notes/{}", note.id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: ApiResponse<Note> = test::read_body_json(resp).await;
        assert_eq!(body.message, "Note retrieved successfully");
        assert_eq!(body.data, Some(note));
    }

    #[actix_web::test]
    async fn test_get_note_bad_and_missing_ids() {
        let (_dir, state) = new_state();
        let app = app!(state);

        let req = test::TestRequest::get().uri("/notes/not-a-uuid").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid note ID format");

        let missing = "6f1c2a9e-1b3d-4c5e-8f70-9a1b2c3d4e5f";
        let req = test::TestRequest::get().uri(&format!("/notes/{}", missing)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], format!("Note with id {} not found", missing));
    }

    #[actix_web::test]
    async fn test_update_note() {
        let (_dir, state) = new_state();
        let note = seed(&state, "Before", "unchanged");
        let app = app!(state.clone());

        let req = test::TestRequest::put()
            .uri(&format!("/notes/{}", note.id))
            .set_json(json!({"title": "After"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: ApiResponse<Note> = test::read_body_json(resp).await;
        let updated = body.data.unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.content, "unchanged");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at >= note.updated_at);
    }

    #[actix_web::test]
    async fn test_update_note_requires_a_field() {
        let (_dir, state) = new_state();
        let note = seed(&state, "Before", "unchanged");
        let app = app!(state.clone());

        let req = test::TestRequest::put()
            .uri(&format!("/notes/{}", note.id))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "At least one field (title or content) must be provided");
        assert_eq!(state.store.get(&note.id).unwrap(), note);
    }

    #[actix_web::test]
    async fn test_delete_note() {
        let (_dir, state) = new_state();
        let note = seed(&state, "Doomed", "bye");
        let app = app!(state.clone());

        let uri = format!("/notes/{}", note.id);
        let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Note deleted successfully");
        assert!(body.get("data").is_none());

        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), 404);
        let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_trailing_slash_collection_path() {
        let (_dir, state) = new_state();
        let app = app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/notes/")
            .set_json(json!({"title": "Slashed", "content": "body"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::get().uri("/notes/?search=slash").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["pagination"]["total"], 1);
    }

    #[actix_web::test]
    async fn test_write_failure_is_internal_error() {
        let (_dir, state) = new_state();
        std::fs::remove_file(state.store.data_path()).unwrap();
        std::fs::create_dir(state.store.data_path()).unwrap();
        let app = app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/notes")
            .set_json(json!({"title": "Unsaved", "content": "body"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": false, "message": "Internal Server Error"}));
    }

    #[actix_web::test]
    async fn test_unknown_route() {
        let (_dir, state) = new_state();
        let app = app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Route /nope not found");
    }
}
