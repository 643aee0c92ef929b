use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation successful";

/// Wire shape shared by every response, successful or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub message: String,
    pub success: bool,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            success: true,
        }
    }

    pub fn failed(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: false,
        }
    }
}

/// Successful handler result, wrapped in the envelope on the way out
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: Option<String>,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with the default message
    pub fn success(data: T) -> Self {
        Self {
            data,
            message: None,
            status_code: None,
        }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            message: None,
            status_code: Some(status_code),
        }
    }

    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);
        let message = self
            .message
            .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());

        let data = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                let envelope: Envelope<()> = Envelope::failed(None, "Failed to format response");
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response();
            }
        };

        (status, Json(Envelope::ok(data, message))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_carries_all_three_fields() {
        let value = serde_json::to_value(Envelope::ok(json!({"id": "m1"}), "Saved")).unwrap();
        assert_eq!(value, json!({"data": {"id": "m1"}, "message": "Saved", "success": true}));

        let value = serde_json::to_value(Envelope::<()>::failed(None, "Nope")).unwrap();
        assert_eq!(value, json!({"data": null, "message": "Nope", "success": false}));
    }

    #[test]
    fn created_sets_status() {
        let response = ApiResponse::created(json!({})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = ApiResponse::success(1).with_message("Counted").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
