//! Billables API Routes
//!
//! - /api/services - Service record CRUD, status listings, date ranges
//! - /health - Liveness
//! - /swagger-ui - OpenAPI documentation

pub mod service_record;
pub mod swagger;

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use billables::DomainError;

use crate::config::ServerConfig;
use crate::{health_check, AppState};

/// Map a domain error onto the HTTP status the transport reports
pub fn domain_error(e: DomainError) -> (StatusCode, String) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Repository(_) => {
            tracing::error!("Repository failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}

/// Unwrap a JSON body, reporting unreadable or mistyped fields as 400
pub fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, (StatusCode, String)> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::JsonDataError(e)) => Err((StatusCode::BAD_REQUEST, e.body_text())),
        Err(JsonRejection::JsonSyntaxError(e)) => Err((StatusCode::BAD_REQUEST, e.body_text())),
        Err(rejection) => Err((rejection.status(), rejection.body_text())),
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let Some(origin) = config.cors_allowed_origin.as_deref() else {
        return CorsLayer::permissive();
    };

    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!(
                "⚠️  Invalid CORS_ALLOWED_ORIGIN {:?}: {} - allowing any origin",
                origin,
                e
            );
            CorsLayer::permissive()
        }
    }
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let openapi = swagger::ApiDoc::openapi();
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(service_record::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_statuses() {
        let cases = [
            (DomainError::not_found("ServiceRecord", 1), StatusCode::NOT_FOUND),
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("fk".to_string()), StatusCode::CONFLICT),
            (
                DomainError::Repository("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(domain_error(error).0, expected);
        }
    }

    #[test]
    fn test_openapi_lists_every_operation() {
        let doc = swagger::ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in [
            "/api/services",
            "/api/services/{id}",
            "/api/services/{id}/cancel",
            "/api/services/{id}/reactivate",
            "/api/services/paid-between",
            "/api/services/started-between",
            "/api/services/ended-between",
            "/api/services/pending",
            "/api/services/cancelled",
            "/api/services/completed",
        ] {
            assert!(paths.contains(&path), "missing {}", path);
        }
    }
}
