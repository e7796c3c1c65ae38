//! Vani API Library
//!
//! This crate provides the HTTP handlers, routing and application setup for the media
//! catalog.

mod api_doc;
mod handlers;
mod telemetry;

pub mod error;
pub mod setup;
pub mod state;

pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
