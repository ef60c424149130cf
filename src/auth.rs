//! Auth-domain environments, credentials, sessions, and token models.

pub mod credentials;
pub mod environment;
pub mod id;
pub mod session;
pub mod token;

pub use credentials::*;
pub use environment::*;
pub use id::*;
pub use session::*;
pub use token::{record::*, request::*, secret::*};
