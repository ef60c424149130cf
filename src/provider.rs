//! Provider-facing descriptors (data) and strategies (behavior).
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering HTTPS-only,
//! per-environment endpoint sets plus the built-in E*TRADE preset. `strategy` defines
//! [`ProviderStrategy`], an HTTP-client-agnostic hook used by flows to augment outgoing
//! token-endpoint calls and map handshake failures into the broker error taxonomy.

pub mod descriptor;
pub mod strategy;

pub use descriptor::*;
pub use strategy::*;
