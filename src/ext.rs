//! Public extension contracts (request signing).
//!
//! The crate intentionally exposes traits without concrete implementations so
//! downstream services can bring their own HTTP client. Opinionated adapters can
//! live in separate crates without expanding the surface of `oauth1-broker` itself.

pub mod request_signer;

pub use request_signer::*;
