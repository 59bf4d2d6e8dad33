//! Structured outcome payloads for mutating requests

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::ApiError;

/// Outcome of a create or delete request
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ActionResponse {
    pub fn created(message: String, id: i64) -> Response {
        Self::respond(
            StatusCode::CREATED,
            Self {
                success: true,
                message,
                id: Some(id),
                redirect: None,
            },
        )
    }

    pub fn deleted(message: String, redirect: &str) -> Response {
        Self::respond(
            StatusCode::OK,
            Self {
                success: true,
                message,
                id: None,
                redirect: Some(redirect.to_string()),
            },
        )
    }

    pub fn failed(status: StatusCode, message: String) -> Response {
        Self::respond(
            status,
            Self {
                success: false,
                message,
                id: None,
                redirect: None,
            },
        )
    }

    fn respond(status: StatusCode, body: Self) -> Response {
        (status, Json(body)).into_response()
    }
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
