use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineError;

/// Класс ошибки для клиента.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest,
    /// Недопустимый ход – можно повторить другим действием.
    InvalidAction,
    /// Команда не может быть выполнена в текущем состоянии стола.
    InvalidCommand,
    /// Внутренняя ошибка движка.
    Internal,
}

/// Ошибка внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("{kind:?}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let kind = match &err {
            EngineError::InvalidAction(_) => ApiErrorKind::InvalidAction,
            EngineError::Config(_) => ApiErrorKind::BadRequest,
            EngineError::Internal(_) => ApiErrorKind::Internal,
            _ => ApiErrorKind::InvalidCommand,
        };
        ApiError::new(kind, err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::new(ApiErrorKind::BadRequest, err.to_string())
    }
}
