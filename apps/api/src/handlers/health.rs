use crate::{models::HealthResponse, services::SearchService};
use actix_web::{get, web, HttpResponse};

#[get("/health")]
pub async fn health_check(search_service: web::Data<SearchService>) -> HttpResponse {
    let dataset = search_service.dataset();
    let status = if dataset.missing_columns().is_empty() {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        movies: dataset.len(),
        missing_columns: dataset.missing_columns().to_vec(),
    })
}
