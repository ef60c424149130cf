//! Request signing contracts that let downstream crates attach session signatures
//! to arbitrary HTTP clients.

// self
use crate::auth::Session;

/// Describes how to attach a [`Session`] signature to an outbound request without
/// constraining the HTTP client type.
///
/// The trait is intentionally generic over both the request and error types so
/// implementers can integrate with any client builder (`reqwest`, `surf`, a
/// bespoke SDK, etc.) while keeping `oauth1-broker` free of those dependencies.
/// Implementations typically call [`Session::authorization`] with the request's
/// method and URL and inject the result as the `Authorization` header.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes (or clones) the provided request and injects authorization state
	/// derived from the [`Session`].
	fn attach_signature(&self, request: Request, session: &Session) -> Result<Request, Error>;
}
