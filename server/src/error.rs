// error.rs
use log::{error, info};
use rocket::data::ByteUnit;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::Request;
use thiserror::Error;

use crate::util::HostelId;

/// Failures reported by the hostel store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No such hostel exists: {0}")]
    NotFound(HostelId),
    #[error("Not a valid ID: {0}")]
    InvalidId(HostelId),
}

/// Failures surfaced to HTTP callers. Every variant is terminal for the request.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Malformed(String),
    #[error("need Content-Type 'application/json'")]
    UnsupportedMediaType,
    #[error("request body exceeds {0}")]
    PayloadTooLarge(ByteUnit),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Malformed(_) => Status::BadRequest,
            ApiError::UnsupportedMediaType => Status::UnsupportedMediaType,
            ApiError::PayloadTooLarge(_) => Status::PayloadTooLarge,
            ApiError::Store(StoreError::NotFound(_)) => Status::NotFound,
            ApiError::Store(StoreError::InvalidId(_)) => Status::BadRequest,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status.code >= 500 {
            error!("{} {}: {}", req.method(), req.uri(), self);
        } else {
            info!("{} {} rejected with {}: {}", req.method(), req.uri(), status, self);
        }
        (status, self.to_string()).respond_to(req)
    }
}
