//! Store-only session restoration.
//!
//! The broker exposes [`Broker::load_saved_session`] so callers can resume a
//! previously authorized session without a new handshake. The lookup is purely
//! local; "not authenticated" is an expected state, not an error.

// self
use crate::{
	_prelude::*,
	auth::{Environment, Session},
	flows::Broker,
	http::SessionHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Broker<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// Loads the persisted session for an environment, if one exists.
	///
	/// The lookup only touches the token store and never performs network I/O; an
	/// absent record resolves to `Ok(None)` so callers can branch into the handshake.
	pub async fn load_saved_session(&self, environment: Environment) -> Result<Option<Session>> {
		const KIND: FlowKind = FlowKind::LoadSession;

		let span = FlowSpan::new(KIND, "load_saved_session");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let record = self.store.fetch(environment).await?;

				Ok(record.filter(|record| record.environment == environment).map(|record| {
					Session::new(
						self.credentials.clone(),
						record,
						self.descriptor.endpoints(environment).api_base.clone(),
					)
				}))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
