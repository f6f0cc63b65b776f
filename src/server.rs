use actix_cors::Cors;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{config::Config, service::SentimentService, Error};

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub review: String,
}

#[derive(Debug, Serialize)]
struct ErrorReply {
    error: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/predict", web::post().to(predict))
        .route("/health", web::get().to(health));
}

/// CORS policy from `ALLOWED_ORIGINS`; a `*` entry allows any origin.
pub fn cors(config: &Config) -> Cors {
    if config.allow_any_origin() {
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
    }

    let mut cors = Cors::default().allow_any_method().allow_any_header();
    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

async fn predict(
    service: web::Data<SentimentService>,
    body: web::Json<PredictRequest>,
) -> HttpResponse {
    match service.predict(&body.review) {
        Ok(reply) => HttpResponse::Ok().json(reply),
        Err(Error::Validation(message)) => {
            HttpResponse::BadRequest().json(ErrorReply { error: message })
        }
        Err(e) => {
            error!(error = %e, "prediction failed");
            HttpResponse::InternalServerError().json(ErrorReply {
                error: e.to_string(),
            })
        }
    }
}

async fn health(service: web::Data<SentimentService>) -> HttpResponse {
    HttpResponse::Ok().json(service.health())
}
