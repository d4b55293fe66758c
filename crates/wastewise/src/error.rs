use crate::analysis::{AnalysisError, HaulImportError, PayloadError};
use crate::config::ConfigError;
use crate::report::RenderError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Analysis(AnalysisError),
    Payload(PayloadError),
    HaulImport(HaulImportError),
    Render(RenderError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Analysis(err) => write!(f, "analysis error: {}", err),
            AppError::Payload(err) => write!(f, "payload error: {}", err),
            AppError::HaulImport(err) => write!(f, "haul log error: {}", err),
            AppError::Render(err) => write!(f, "render error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Analysis(err) => Some(err),
            AppError::Payload(err) => Some(err),
            AppError::HaulImport(err) => Some(err),
            AppError::Render(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Analysis(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Payload(_) | AppError::HaulImport(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Analysis(err) => json!({
                "error": self.to_string(),
                "errors": err.errors(),
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<AnalysisError> for AppError {
    fn from(value: AnalysisError) -> Self {
        Self::Analysis(value)
    }
}

impl From<PayloadError> for AppError {
    fn from(value: PayloadError) -> Self {
        Self::Payload(value)
    }
}

impl From<HaulImportError> for AppError {
    fn from(value: HaulImportError) -> Self {
        Self::HaulImport(value)
    }
}

impl From<RenderError> for AppError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}
