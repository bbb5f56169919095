//! Response envelope helpers. A catalog answers either with bare records or with `{ success, data }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Envelope {
    /// Body is the record, the array of records, or `{ message }`.
    Bare,
    /// Body is `{ success: true, data }` (lists add `meta.count`).
    #[default]
    Wrapped,
}

impl std::str::FromStr for Envelope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bare" => Ok(Envelope::Bare),
            "wrapped" => Ok(Envelope::Wrapped),
            other => Err(format!("invalid envelope: {} (expected bare or wrapped)", other)),
        }
    }
}

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

#[derive(Serialize)]
pub struct SuccessMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub message: String,
}

impl Envelope {
    pub fn one<T: Serialize>(self, status: StatusCode, data: T) -> Response {
        match self {
            Envelope::Bare => (status, Json(data)).into_response(),
            Envelope::Wrapped => (status, Json(SuccessOne { success: true, data })).into_response(),
        }
    }

    pub fn many<T: Serialize>(self, data: Vec<T>) -> Response {
        match self {
            Envelope::Bare => (StatusCode::OK, Json(data)).into_response(),
            Envelope::Wrapped => {
                let count = data.len() as u64;
                (
                    StatusCode::OK,
                    Json(SuccessMany {
                        success: true,
                        data,
                        meta: MetaCount { count },
                    }),
                )
                    .into_response()
            }
        }
    }

    pub fn message(self, message: String) -> Response {
        let success = match self {
            Envelope::Bare => None,
            Envelope::Wrapped => Some(true),
        };
        (StatusCode::OK, Json(SuccessMessage { success, message })).into_response()
    }
}

pub fn created(envelope: Envelope, data: Value) -> Response {
    envelope.one(StatusCode::CREATED, data)
}

pub fn ok(envelope: Envelope, data: Value) -> Response {
    envelope.one(StatusCode::OK, data)
}
