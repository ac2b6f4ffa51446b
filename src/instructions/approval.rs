//! Allowance checks

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tracing::debug;

use super::{calls, ApprovalMode};
use crate::chain::ChainClient;
use crate::errors::ChainError;
use crate::types::instruction::Instruction;
use crate::types::tokens::is_native;

/// Decides whether a spend needs an approval first
///
/// Allowances are read fresh on every call. The read-then-decide race with
/// a concurrent spend is left to the broadcaster, which resubmits.
#[derive(Clone)]
pub struct ApprovalPlanner {
    chain: Arc<dyn ChainClient>,
    mode: ApprovalMode,
}

impl ApprovalPlanner {
    pub fn new(chain: Arc<dyn ChainClient>, mode: ApprovalMode) -> Self {
        Self { chain, mode }
    }

    pub fn mode(&self) -> ApprovalMode {
        self.mode
    }

    /// An approval instruction if `owner`'s allowance to `spender` is below `required`
    ///
    /// The native coin needs no approval.
    pub async fn approval_for(
        &self,
        chain_id: u64,
        token: Address,
        owner: Address,
        spender: Address,
        required: U256,
    ) -> Result<Option<Instruction>, ChainError> {
        if is_native(token) {
            return Ok(None);
        }

        let allowance = self.chain.allowance(chain_id, token, owner, spender).await?;
        if allowance >= required {
            debug!(chain_id, ?token, ?spender, %allowance, %required, "Allowance sufficient");
            return Ok(None);
        }

        debug!(chain_id, ?token, ?spender, %allowance, %required, "Allowance short, approving");
        Ok(Some(calls::approve(
            token,
            spender,
            self.mode.approval_amount(required),
        )))
    }
}

/// Whether `queued` leaves `spender` an unlimited allowance on `token`
///
/// A later spend of the same token by the same spender then needs no
/// approval of its own.
pub fn grants_unlimited(queued: &Instruction, token: Address, spender: Address) -> bool {
    queued.to == token
        && matches!(
            calls::decode_approve(queued),
            Some((approved, amount)) if approved == spender && amount == U256::MAX
        )
}

impl std::fmt::Debug for ApprovalPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalPlanner")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: Address = Address::repeat_byte(0x01);
    const SPENDER: Address = Address::repeat_byte(0x02);

    #[test]
    fn test_unlimited_approval_is_recognised() {
        let queued = calls::approve(TOKEN, SPENDER, U256::MAX);
        assert!(grants_unlimited(&queued, TOKEN, SPENDER));
    }

    #[test]
    fn test_other_approvals_do_not_count() {
        let exact = calls::approve(TOKEN, SPENDER, U256::from(1000u64));
        assert!(!grants_unlimited(&exact, TOKEN, SPENDER));

        let unlimited = calls::approve(TOKEN, SPENDER, U256::MAX);
        assert!(!grants_unlimited(&unlimited, Address::repeat_byte(0x03), SPENDER));
        assert!(!grants_unlimited(&unlimited, TOKEN, Address::repeat_byte(0x03)));

        let transfer = calls::erc20_transfer(TOKEN, SPENDER, U256::MAX);
        assert!(!grants_unlimited(&transfer, TOKEN, SPENDER));
    }
}
