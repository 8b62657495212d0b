use actix_web::{HttpResponse, Responder, get};

use crate::models::{HealthResponse, StatusResponse};

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        message: "HRMS Lite API is running",
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(StatusResponse { status: "healthy" })
}
