use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use skillcompass_common::SkillCompassError;
use std::fmt;

use crate::types::ErrorResponse;

/// HTTP wrapper around [`SkillCompassError`]
#[derive(Debug)]
pub struct ApiError(pub SkillCompassError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SkillCompassError> for ApiError {
    fn from(err: SkillCompassError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        // Bad-input messages are shown to clients without the variant prefix
        let message = match &self.0 {
            SkillCompassError::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            message,
        })
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
