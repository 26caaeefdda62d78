//! Protocol buffer types for Terraform Plugin Protocol v6
//!
//! The generated code lives in `OUT_DIR` and is produced by `build.rs`.
//! Some protobuf messages share names with framework types (`DynamicValue`,
//! `Diagnostic`, `Schema`), so always refer to these through the `proto::`
//! prefix.
//!
//! Besides the provider service, go-plugin expects two auxiliary services on
//! the same listener: the standard gRPC health check and the controller used
//! to request shutdown. Both live in their own submodules.

include!(concat!(env!("OUT_DIR"), "/tfplugin6.rs"));

pub use provider_server::{Provider as ProviderService, ProviderServer};

/// grpc.health.v1
pub mod health {
    include!(concat!(env!("OUT_DIR"), "/grpc.health.v1.rs"));
}

/// go-plugin controller service
pub mod controller {
    include!(concat!(env!("OUT_DIR"), "/plugin.rs"));
}
