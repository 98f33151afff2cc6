use crate::{
    config::Config,
    error::Result,
    routes::{api_routes, not_found},
    services::{MovieDataset, QueryInterpreter, SearchService},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{info, warn};
use std::net::TcpListener;
use std::sync::Arc;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Load the dataset once; every worker shares this snapshot
    pub fn build_search_service(&self) -> Result<SearchService> {
        let dataset = MovieDataset::from_path(&self.config.dataset_path)?;
        if !dataset.missing_columns().is_empty() {
            warn!(
                "Serving a partial dataset, missing columns: {:?}",
                dataset.missing_columns()
            );
        }

        Ok(SearchService::new(
            Arc::new(dataset),
            QueryInterpreter::with_threshold(self.config.match_threshold),
        ))
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}", bind_address);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        let search_service = web::Data::new(self.build_search_service()?);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(search_service.clone())
                .service(api_routes())
                .default_service(web::to(not_found))
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
