//! Token value types shared by the handshake flows and the stores.

pub mod record;
pub mod request;
pub mod secret;
