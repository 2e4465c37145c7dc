//! API error types and the translation of failures into HTTP responses.
//!
//! [`ApiError`] is the unified error type for all API endpoints. Its
//! `IntoResponse` impl is the single place where a failure becomes a status
//! code and a JSON body, so every error leaving the server has one of the
//! shapes below:
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `Validation` | 400 | `timestamp, status, mensaje, errores` |
//! | `MalformedBody` | 400 | `timestamp, status, error, mensaje` |
//! | `InvalidArgument` | 400 | `timestamp, status, error, mensaje` |
//! | `Internal` | 500 | `timestamp, status, error, mensaje` (generic) |

use std::any::Any;
use std::collections::BTreeMap;
use std::error::Error as StdError;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use registro_core::{CoreError, ValidationErrors};
use registro_storage::StorageError;

use crate::schema::students::BindingError;

/// `mensaje` of a field validation failure.
pub const VALIDATION_MESSAGE: &str = "Error de validación en los datos enviados";

/// `mensaje` of a malformed body whose cause chain holds no invalid argument.
pub const MALFORMED_BODY_MESSAGE: &str = "Datos inválidos en el cuerpo de la solicitud";

/// `mensaje` of every unclassified failure.
pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// Key used in `errores` for a violation with no field name.
const GENERIC_FIELD_KEY: &str = "error";

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Local time the error was produced.
    pub timestamp: String,
    /// Numeric HTTP status, repeated from the status line.
    pub status: u16,
    /// Reason phrase. Absent on field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Client-facing description of what went wrong.
    pub mensaje: String,
    /// Per-field messages. Only present on field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errores: Option<BTreeMap<String, String>>,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more fields failed validation while binding the payload (400).
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The request body could not be bound to the expected shape (400).
    #[error("malformed request body: {0}")]
    MalformedBody(#[source] Box<dyn StdError + Send + Sync>),

    /// A domain rule rejected the request, e.g. a duplicate id (400).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Anything else (500). The message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::MalformedBody(_)
            | ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the response body. Logs as a side effect.
    pub fn to_body(&self) -> ErrorBody {
        let status = self.status();
        let reason = status.canonical_reason();
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!("rejected payload: {}", errors);
                let errores = errors
                    .violations()
                    .iter()
                    .map(|v| {
                        let key = v.field.as_deref().unwrap_or(GENERIC_FIELD_KEY);
                        (key.to_string(), v.message.clone())
                    })
                    .collect();
                ErrorBody {
                    timestamp: timestamp(),
                    status: status.as_u16(),
                    error: None,
                    mensaje: VALIDATION_MESSAGE.to_string(),
                    errores: Some(errores),
                }
            }
            ApiError::MalformedBody(source) => {
                tracing::debug!("unreadable body: {}", source);
                let mensaje = invalid_argument_message(&**source)
                    .unwrap_or_else(|| MALFORMED_BODY_MESSAGE.to_string());
                ErrorBody {
                    timestamp: timestamp(),
                    status: status.as_u16(),
                    error: reason,
                    mensaje,
                    errores: None,
                }
            }
            ApiError::InvalidArgument(msg) => {
                tracing::warn!("invalid argument: {}", msg);
                ErrorBody {
                    timestamp: timestamp(),
                    status: status.as_u16(),
                    error: reason,
                    mensaje: msg.clone(),
                    errores: None,
                }
            }
            ApiError::Internal(detail) => {
                tracing::error!("unhandled failure: {}", detail);
                ErrorBody {
                    timestamp: timestamp(),
                    status: status.as_u16(),
                    error: reason,
                    mensaje: INTERNAL_MESSAGE.to_string(),
                    errores: None,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), axum::Json(self.to_body())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(Box::new(rejection))
    }
}

impl From<BindingError> for ApiError {
    fn from(err: BindingError) -> Self {
        match err {
            BindingError::Rejected { .. } => ApiError::MalformedBody(Box::new(err)),
            BindingError::Invalid(errors) => errors.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::DuplicateId { .. } => ApiError::InvalidArgument(err.to_string()),
            StorageError::Backend { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

/// Walks `err` and its chain of sources, returning the message of the first
/// invalid-argument error found.
pub fn invalid_argument_message(err: &(dyn StdError + 'static)) -> Option<String> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(core) = e.downcast_ref::<CoreError>() {
            return Some(core.to_string());
        }
        if let Some(dup @ StorageError::DuplicateId { .. }) = e.downcast_ref::<StorageError>() {
            return Some(dup.to_string());
        }
        current = e.source();
    }
    None
}

/// Response for a panic caught by `tower_http::catch_panic`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(format!("panic: {detail}")).into_response()
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.f")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::students::CreateStudentRequest;
    use registro_core::{FieldViolation, Student};
    use serde_json::Value;

    /// Error wrapping another error, for building cause chains.
    #[derive(Debug, thiserror::Error)]
    #[error("{context}")]
    struct Wrapped {
        context: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    }

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_lists_each_field() {
        let errors = Student::from_fields(Some("12"), Some("Ana"), None).unwrap_err();
        let (status, body) = render(errors.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["mensaje"], VALIDATION_MESSAGE);
        assert_eq!(body["errores"]["id"], "El ID debe tener exactamente 9 digitos");
        assert_eq!(body["errores"]["carrera"], "La carrera no puede estar vacia");
        assert!(body.get("error").is_none());
        assert!(body["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn validation_without_field_uses_generic_key() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldViolation {
            field: None,
            message: "payload rejected".into(),
        });
        let (_, body) = render(errors.into()).await;
        assert_eq!(body["errores"]["error"], "payload rejected");
    }

    #[tokio::test]
    async fn malformed_body_unwinds_to_invalid_argument() {
        let chain = Wrapped {
            context: "outer",
            source: Box::new(Wrapped {
                context: "inner",
                source: Box::new(CoreError::BlankName),
            }),
        };
        let (status, body) = render(ApiError::MalformedBody(Box::new(chain))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["mensaje"], "El nombre no puede estar vacio");
    }

    #[tokio::test]
    async fn malformed_body_without_invalid_argument_is_generic() {
        let parse_err = serde_json::from_str::<Value>("{not json").unwrap_err();
        let chain = Wrapped {
            context: "could not parse",
            source: Box::new(parse_err),
        };
        let (status, body) = render(ApiError::MalformedBody(Box::new(chain))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["mensaje"], MALFORMED_BODY_MESSAGE);
    }

    #[tokio::test]
    async fn duplicate_id_is_bad_request_with_message() {
        let err: ApiError = StorageError::DuplicateId {
            id: "123456789".into(),
        }
        .into();
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["mensaje"], "Ya existe un estudiante con el ID: 123456789");
        assert!(body.get("errores").is_none());
    }

    #[tokio::test]
    async fn rejected_field_unwinds_to_its_cause() {
        let err = serde_json::from_str::<CreateStudentRequest>(
            r#"{"id": "123456789", "nombre": "Ana", "carrera": "  "}"#,
        )
        .unwrap()
        .into_student()
        .unwrap_err();
        let api_err = ApiError::from(err);
        assert!(matches!(api_err, ApiError::MalformedBody(_)));

        let (status, body) = render(api_err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["mensaje"], "La carrera no puede estar vacia");
        assert!(body.get("errores").is_none());
    }

    #[tokio::test]
    async fn backend_failure_does_not_leak() {
        let err: ApiError = StorageError::Backend {
            reason: "connection string postgres://secret".into(),
        }
        .into();
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["mensaje"], INTERNAL_MESSAGE);
        assert!(!body.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn panic_payload_becomes_generic_500() {
        let response = panic_response(Box::new("boom at line 3"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["mensaje"], INTERNAL_MESSAGE);
        assert!(!body.to_string().contains("boom"));
    }

    #[test]
    fn unwinding_stops_at_first_match() {
        let chain = Wrapped {
            context: "outer",
            source: Box::new(StorageError::DuplicateId { id: "1".into() }),
        };
        assert_eq!(
            invalid_argument_message(&chain).as_deref(),
            Some("Ya existe un estudiante con el ID: 1")
        );
        assert!(invalid_argument_message(&StorageError::Backend {
            reason: "down".into()
        })
        .is_none());
    }
}
