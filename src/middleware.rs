use crate::config::Config;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::json;
use tracing::info;

/// Rejects requests whose host is not in `ALLOWED_HOSTS`.
pub async fn host_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let host = req.connection_info().host().to_owned();
    if !config.allows_host(&host) {
        info!(host = %host, "Rejected request for disallowed host");
        let resp = HttpResponse::BadRequest().json(json!({"detail": "Invalid host header."}));
        return Ok(req.into_response(resp.map_into_boxed_body()));
    }

    next.call(req).await
}

/// CORS from `CORS_ALLOWED_ORIGINS`; an empty list lets any origin through.
/// Mismatched origins are served without CORS headers rather than rejected.
pub fn cors(config: &Config) -> Cors {
    let cors = if config.cors_allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        config
            .cors_allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(86400)
        .block_on_origin_mismatch(false)
}
