pub mod health;
pub mod notes;
pub mod validation;

use actix_web::error::InternalError;
use actix_web::{web, HttpRequest, HttpResponse};
use notes_types::ApiResponse;

use crate::notes::NoteStoreError;
use validation::ValidationError;

/// 400 with the first validation issue in `error`
pub fn validation_error_response(err: &ValidationError) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::err("Validation Error", Some(err.to_string())))
}

/// Map a store failure onto the response the client sees
pub fn store_error_response(err: &NoteStoreError) -> HttpResponse {
    match err {
        NoteStoreError::NotFound(_) => {
            HttpResponse::NotFound().json(ApiResponse::err(err.to_string(), None))
        }
        NoteStoreError::NotInitialized => {
            HttpResponse::ServiceUnavailable().json(ApiResponse::err(err.to_string(), None))
        }
        NoteStoreError::Persistence { .. } | NoteStoreError::Serialization(_) => {
            log::error!("[NOTES] Store error: {}", err);
            HttpResponse::InternalServerError()
                .json(ApiResponse::err("Internal Server Error", None))
        }
    }
}

/// Malformed JSON bodies get the same envelope as failed field validation
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let resp = validation_error_response(&ValidationError::new(err.to_string()));
        InternalError::from_response(err, resp).into()
    })
}

/// Unparsable query strings (e.g. `page=abc`) are validation errors too
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let resp = validation_error_response(&ValidationError::new(err.to_string()));
        InternalError::from_response(err, resp).into()
    })
}

/// Fallback for unknown routes
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::err(
        format!("Route {} not found", req.uri()),
        None,
    ))
}
