//! NetBox REST API client and typed models

pub mod circuits;
pub mod client;
pub mod common;
pub mod dcim;
pub mod error;
pub mod extras;
pub mod ipam;
pub mod pool;
pub mod tenancy;
pub mod virtualization;
pub mod vpn;
pub mod wireless;

#[cfg(test)]
pub mod test_helpers;

pub use client::Client;
pub use common::{ApiQueryParams, Choice, Endpoint, NestedRef, NestedTag, NetBoxModel, Paginated};
pub use error::ApiError;
