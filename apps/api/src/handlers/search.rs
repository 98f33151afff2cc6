use crate::{
    error::ApiError,
    models::{SearchRequest, SearchResponse},
    services::{SearchReport, SearchService},
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};

pub fn search_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/search")
            .route(web::post().to(search_movies))
            .route(web::get().to(search_movies_by_query_string)),
    );
}

fn to_response(report: SearchReport) -> SearchResponse {
    let message = report.outcome.message();
    SearchResponse {
        results: report.outcome.results().to_vec(),
        query: report.query,
        filters: report.filters,
        message,
    }
}

/// Search movies with a free-text query in the request body
pub async fn search_movies(
    request: Json<SearchRequest>,
    search_service: web::Data<SearchService>,
) -> Result<HttpResponse, ApiError> {
    let report = search_service.search(&request.query)?;
    Ok(HttpResponse::Ok().json(to_response(report)))
}

/// Same as [`search_movies`], reading `?query=` instead of a JSON body
pub async fn search_movies_by_query_string(
    params: web::Query<SearchRequest>,
    search_service: web::Data<SearchService>,
) -> Result<HttpResponse, ApiError> {
    let report = search_service.search(&params.query)?;
    Ok(HttpResponse::Ok().json(to_response(report)))
}
