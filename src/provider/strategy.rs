//! Provider strategy hooks that customize handshake exchanges.
//!
//! Implementations decorate outgoing token-endpoint calls and normalize error mapping
//! without tying flows to any particular HTTP client.

// self
use crate::{_prelude::*, oauth::HandshakeStep};

/// Strategy hook that allows providers to decorate requests and classify errors.
///
/// Implementors are required to be `Send + Sync`, and the hooks intentionally use
/// crate-owned data types so downstream crates never depend on reqwest-specific
/// structures. Override only what you need; `augment_token_request` has a default
/// no-op implementation.
pub trait ProviderStrategy: Send + Sync {
	/// Maps a failed token-endpoint exchange into the broker taxonomy.
	fn classify_handshake_error(&self, ctx: &HandshakeErrorContext) -> HandshakeErrorKind;

	/// Gives providers a chance to add query parameters before a token-endpoint call.
	///
	/// The default implementation does nothing, which is enough for most providers.
	/// Override the hook when a provider requires extra signed parameters. The method
	/// works on a plain `BTreeMap` so implementations remain HTTP client agnostic.
	fn augment_token_request(&self, _step: HandshakeStep, _params: &mut BTreeMap<String, String>) {}
}

/// Canonical handshake failure categories used by strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeErrorKind {
	/// Provider rejected the verifier (wrong, reused, or expired PIN).
	VerifierRejected,
	/// Failure passes through as a raw endpoint error.
	Endpoint,
}

/// Context passed to provider strategies when classifying handshake failures.
///
/// The struct intentionally keeps only primitive data (step, status code, body preview)
/// so strategies stay completely decoupled from any HTTP client. Flows populate the
/// context before invoking [`ProviderStrategy::classify_handshake_error`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandshakeErrorContext {
	/// Handshake step associated with the failing request.
	pub step: HandshakeStep,
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Preview of the response body for diagnostics and hint matching.
	pub body_preview: Option<String>,
}
impl HandshakeErrorContext {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Creates a new context scoped to the provided step and status.
	pub fn new(step: HandshakeStep, status: u16) -> Self {
		Self { step, status, body_preview: None }
	}

	/// Adds a body preview, truncated to a bounded length.
	pub fn with_body_preview(mut self, body: impl Into<String>) -> Self {
		self.body_preview = Some(truncate_preview(body.into()));

		self
	}
}

/// Default strategy that applies OAuth 1.0a problem-reporting heuristics.
///
/// It prioritizes `oauth_problem` hints in the response body and falls back to the
/// HTTP status code. Only the verifier exchange can produce a verifier rejection;
/// request-token failures always pass through as endpoint errors.
#[derive(Debug, Default)]
pub struct DefaultProviderStrategy;
impl Display for DefaultProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-provider-strategy")
	}
}
impl ProviderStrategy for DefaultProviderStrategy {
	fn classify_handshake_error(&self, ctx: &HandshakeErrorContext) -> HandshakeErrorKind {
		if ctx.step != HandshakeStep::AccessToken {
			return HandshakeErrorKind::Endpoint;
		}

		if let Some(kind) = classify_body(ctx.body_preview.as_deref()) {
			return kind;
		}

		match ctx.status {
			401 | 403 => HandshakeErrorKind::VerifierRejected,
			_ => HandshakeErrorKind::Endpoint,
		}
	}
}

fn truncate_preview(body: String) -> String {
	if body.chars().count() <= HandshakeErrorContext::BODY_PREVIEW_LIMIT {
		return body;
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= HandshakeErrorContext::BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}

fn classify_body(body: Option<&str>) -> Option<HandshakeErrorKind> {
	let body = body?;
	let lowered = body.to_ascii_lowercase();

	match lowered.as_str() {
		text if text.contains("verifier_invalid")
			|| text.contains("permission_denied")
			|| text.contains("permission_unknown") => Some(HandshakeErrorKind::VerifierRejected),
		text if text.contains("token_rejected")
			|| text.contains("token_expired")
			|| text.contains("token_revoked") => Some(HandshakeErrorKind::Endpoint),
		_ => None,
	}
}
