//! Game Bridge - a chunk-reassembly bridge and passthrough proxy
//!
//! The bridge accepts a large JSON payload split into ordered base64 chunks,
//! each delivered as an independent image-shaped HTTP request, reassembles
//! them into one document and publishes the latest result for a reader. An
//! independent passthrough proxy forwards arbitrary requests to a
//! caller-named upstream host and relays the response.

pub mod application;
pub mod bridge;
pub mod config;
pub mod error;
pub mod proxy;

pub use application::Application;
pub use error::{Error, Result};
