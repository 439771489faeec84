use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer};

/// `code` value carried by every successful envelope.
const SUCCESS_CODE: u16 = 100;
/// `code` value carried by every failed envelope.
const FAIL_CODE: u16 = 200;

/// Field name (wire spelling) to the first failing rule's message.
pub type FieldErrors = BTreeMap<String, String>;

/// Payload for endpoints that succeed without data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Empty {}

/// Outcome of a single request.
///
/// Serializes to `{"code": .., "msg": .., ...}` where the variant decides
/// which extra fields are flattened into the top-level object:
///
/// * `Success(payload)` merges the payload's own fields.
/// * `ValidationFailed` adds `errorFields`.
/// * `NotAvailable` adds `va_msg`.
/// * `NotFound` and `Failed` carry only the message.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    ValidationFailed(FieldErrors),
    NotAvailable(String),
    NotFound(String),
    Failed(String),
}

impl Outcome<Empty> {
    pub fn ok() -> Self {
        Outcome::Success(Empty {})
    }
}

impl<T> Outcome<T> {
    pub fn code(&self) -> u16 {
        match self {
            Outcome::Success(_) => SUCCESS_CODE,
            _ => FAIL_CODE,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::OK,
        }
    }
}

#[derive(Serialize)]
struct Wire<'a, T> {
    code: u16,
    msg: &'a str,
    #[serde(flatten)]
    extra: Extra<'a, T>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Extra<'a, T> {
    Payload(&'a T),
    ErrorFields {
        #[serde(rename = "errorFields")]
        error_fields: &'a FieldErrors,
    },
    VaMsg {
        va_msg: &'a str,
    },
    Nothing {},
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (msg, extra) = match self {
            Outcome::Success(payload) => ("success", Extra::Payload(payload)),
            Outcome::ValidationFailed(fields) => (
                "validation failed",
                Extra::ErrorFields {
                    error_fields: fields,
                },
            ),
            Outcome::NotAvailable(reason) => ("fail", Extra::VaMsg { va_msg: reason }),
            Outcome::NotFound(msg) | Outcome::Failed(msg) => (msg.as_str(), Extra::Nothing {}),
        };
        Wire {
            code: self.code(),
            msg,
            extra,
        }
        .serialize(serializer)
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
