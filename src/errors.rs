// Copyright (c) 2022 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

//! Custom application error with conversions from common Rust and 3rd-party errors.

use actix::MailboxError;
use awc::error::{JsonPayloadError, SendRequestError};
use derive_more::Display;
use log::error;

#[derive(Debug, Display, PartialEq)]
pub enum ServiceError {
    #[display("Internal server error: {_0}")]
    InternalServerError(String),

    #[display("Internal serialization error: {_0}")]
    SerializationError(String),

    #[display("BadRequest: {_0}")]
    BadRequest(String),

    #[display("Not found: {_0}")]
    NotFound(String),

    /// Configured device is not known by the control server.
    #[display("Configuration mismatch: {_0}")]
    ConfigurationMismatch(String),

    /// Connection or transport error while talking to a control server.
    #[display("Transport failure: {_0}")]
    TransportFailure(String),
}

impl std::error::Error for ServiceError {}

impl From<MailboxError> for ServiceError {
    fn from(e: MailboxError) -> Self {
        ServiceError::InternalServerError(format!("Internal message error: {e:?}"))
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        error!("{e:?}");
        ServiceError::SerializationError(e.to_string())
    }
}

impl From<SendRequestError> for ServiceError {
    fn from(e: SendRequestError) -> Self {
        ServiceError::TransportFailure(e.to_string())
    }
}

impl From<JsonPayloadError> for ServiceError {
    fn from(e: JsonPayloadError) -> Self {
        ServiceError::SerializationError(e.to_string())
    }
}

impl From<url::ParseError> for ServiceError {
    fn from(e: url::ParseError) -> Self {
        ServiceError::BadRequest(format!("Invalid url: {e}"))
    }
}
