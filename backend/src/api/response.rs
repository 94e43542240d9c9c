//! Uniform response envelope.
//!
//! Every villa operation answers with an [`ApiResponse`], success or not:
//!
//! ```json
//! { "statusCode": 404, "isSuccess": false, "errorMessages": ["Villa 7 not found"], "result": null }
//! ```
//!
//! Constructors keep the envelope consistent: a failure always carries at
//! least one message, a success never carries any.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol status codes an envelope may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ResponseStatus {
    Ok,
    Created,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl ResponseStatus {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::Created)
    }
}

impl From<ResponseStatus> for u16 {
    fn from(status: ResponseStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u16> for ResponseStatus {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            200 => Ok(Self::Ok),
            201 => Ok(Self::Created),
            400 => Ok(Self::BadRequest),
            404 => Ok(Self::NotFound),
            500 => Ok(Self::InternalServerError),
            other => Err(format!("Unsupported status code: {}", other)),
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Response envelope wrapping an optional payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    status_code: ResponseStatus,
    is_success: bool,
    error_messages: Vec<String>,
    result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope. A failure status is downgraded to
    /// [`ResponseStatus::Ok`] since success never reports an error code.
    pub fn success(status: ResponseStatus, result: Option<T>) -> Self {
        let status_code = if status.is_success() {
            status
        } else {
            ResponseStatus::Ok
        };
        Self {
            status_code,
            is_success: true,
            error_messages: Vec::new(),
            result,
        }
    }

    /// 200 envelope carrying `result`.
    pub fn ok(result: T) -> Self {
        Self::success(ResponseStatus::Ok, Some(result))
    }

    /// 201 envelope carrying `result`.
    pub fn created(result: T) -> Self {
        Self::success(ResponseStatus::Created, Some(result))
    }

    /// Failed envelope with a single message. A success status is upgraded
    /// to [`ResponseStatus::InternalServerError`]; an empty message is
    /// replaced by the status code so the message list is never empty.
    pub fn failure(status: ResponseStatus, message: impl Into<String>) -> Self {
        let status_code = if status.is_success() {
            ResponseStatus::InternalServerError
        } else {
            status
        };
        let mut message = message.into();
        if message.is_empty() {
            message = format!("Request failed with status {}", status_code);
        }
        Self {
            status_code,
            is_success: false,
            error_messages: vec![message],
            result: None,
        }
    }

    pub fn status_code(&self) -> ResponseStatus {
        self.status_code
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<T> {
        self.result
    }

    /// Map the payload, keeping status and messages.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status_code: self.status_code,
            is_success: self.is_success,
            error_messages: self.error_messages,
            result: self.result.map(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::ok(vec![1, 2]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"statusCode": 200, "isSuccess": true, "errorMessages": [], "result": [1, 2]})
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let response: ApiResponse<()> = ApiResponse::failure(ResponseStatus::NotFound, "gone");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"statusCode": 404, "isSuccess": false, "errorMessages": ["gone"], "result": null})
        );
    }

    #[test]
    fn test_delete_success_has_null_result() {
        let response: ApiResponse<()> = ApiResponse::success(ResponseStatus::Ok, None);
        assert!(response.is_success());
        assert!(response.result().is_none());
        assert!(response.error_messages().is_empty());
    }

    #[test]
    fn test_failure_never_has_empty_messages() {
        let response: ApiResponse<()> = ApiResponse::failure(ResponseStatus::BadRequest, "");
        assert_eq!(response.error_messages().len(), 1);
        assert!(!response.error_messages()[0].is_empty());
    }

    #[test]
    fn test_constructors_keep_status_consistent() {
        let ok: ApiResponse<u8> = ApiResponse::success(ResponseStatus::NotFound, None);
        assert_eq!(ok.status_code(), ResponseStatus::Ok);

        let failed: ApiResponse<u8> = ApiResponse::failure(ResponseStatus::Created, "x");
        assert_eq!(failed.status_code(), ResponseStatus::InternalServerError);
        assert!(!failed.is_success());
    }

    #[test]
    fn test_status_code_deserializes() {
        let response: ApiResponse<String> = serde_json::from_str(
            r#"{"statusCode":201,"isSuccess":true,"errorMessages":[],"result":"x"}"#,
        )
        .unwrap();
        assert_eq!(response.status_code(), ResponseStatus::Created);
        assert!(serde_json::from_str::<ResponseStatus>("418").is_err());
    }
}
