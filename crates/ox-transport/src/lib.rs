#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Shared HTTP plumbing for ox API clients
//!
//! This crate provides the pieces a thin API client wires together:
//! a typed-operation [`Transport`] bound to a base URL, [`RequestInterceptor`]
//! hooks (bearer auth among them), a raw request path, and a
//! `multipart/form-data` encoder for file uploads.

pub mod error;
pub mod interceptor;
pub mod multipart;
pub mod request_builder;

pub use error::TransportError;
pub use interceptor::{BearerAuth, RequestContext, RequestInterceptor, bearer_header};
pub use multipart::{Entry, MultipartForm};
pub use request_builder::{
    Endpoint, HttpMethod, OperationOutput, RawRequest, RawResponse, Transport,
};

/// Re-export common types for convenience
pub use bytes::Bytes;
pub use reqwest::{Method, header};
