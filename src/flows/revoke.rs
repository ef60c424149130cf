//! Local token revocation.

// self
use crate::{
	_prelude::*,
	auth::Environment,
	flows::Broker,
	http::SessionHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Broker<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// Deletes the persisted token record for an environment.
	///
	/// The provider offers no remote revocation endpoint for consumer tokens, so the
	/// operation is purely local. Revoking an environment that holds no record is a
	/// no-op, which keeps repeated revokes idempotent.
	pub async fn revoke(&self, environment: Environment) -> Result<()> {
		const KIND: FlowKind = FlowKind::Revoke;

		let span = FlowSpan::new(KIND, "revoke");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.store.delete(environment).await?;

				Ok(())
			})
			.await;

		match &result {
			Ok(()) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
