//! CORS configuration for the browser client.

use actix_cors::Cors;
use actix_web::http::header;

use rw_shared::config::ServerConfig;

/// Build the CORS middleware from server configuration
pub fn create_cors(config: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(3600);

    if config.allows_any_origin() {
        cors.allow_any_origin()
    } else {
        let mut cors = cors.supports_credentials();
        for origin in config.origins() {
            cors = cors.allowed_origin(&origin);
        }
        cors
    }
}
