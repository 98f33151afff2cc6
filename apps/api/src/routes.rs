use actix_web::{web, Scope};

use crate::error::ApiError;
use crate::handlers::{health_check, search_config};

/// Configure all routes for the API
pub fn api_routes() -> Scope {
    web::scope("/api")
        .service(health_check)
        .configure(search_config)
}

/// Fallback for anything outside the API
pub async fn not_found(request: actix_web::HttpRequest) -> Result<actix_web::HttpResponse, ApiError> {
    Err(ApiError::NotFound(format!("No route for {}", request.path())))
}
