//! Best-effort credit redemption.

use observability_gpt_core::{AgentRequestId, CreditAmount, RedemptionOutcome};
use observability_gpt_payments::PaymentsApi;

/// Redeem `credits` against an agent request.
///
/// Failures (including an explicit rejection from the backend) are logged
/// and reported in the returned outcome; they are never propagated.
pub async fn redeem_credits(
    payments: &dyn PaymentsApi,
    agent_request_id: &AgentRequestId,
    access_token: &str,
    credits: CreditAmount,
) -> RedemptionOutcome {
    tracing::info!(
        agent_request_id = %agent_request_id,
        credits = %credits,
        "Redeeming credits"
    );

    match payments
        .redeem_credits_from_request(agent_request_id, access_token, credits)
        .await
    {
        Ok(result) if result.success == Some(false) => {
            tracing::warn!(
                agent_request_id = %agent_request_id,
                "Credit redemption rejected by backend"
            );
            RedemptionOutcome::failed("redemption rejected")
        }
        Ok(result) => {
            tracing::info!(
                agent_request_id = %agent_request_id,
                credits = %credits,
                tx_hash = ?result.tx_hash,
                "Credits redeemed"
            );
            RedemptionOutcome::redeemed(credits, result.tx_hash)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                agent_request_id = %agent_request_id,
                "Failed to redeem credits"
            );
            RedemptionOutcome::failed(e.to_string())
        }
    }
}
