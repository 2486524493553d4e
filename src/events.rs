multiversx_sc::imports!();

use crate::types::{FeeRole, FeeType, StakingConfig};

#[multiversx_sc::module]
pub trait EventsModule {
    // ── Deposits & withdrawals ──

    #[event("deposit")]
    fn deposit_event(
        &self,
        #[indexed] depositor: &ManagedAddress,
        #[indexed] pool: &ManagedAddress,
        #[indexed] amount: &BigUint,
        #[indexed] referral: &ManagedAddress,
        shares: &BigUint,
    );

    #[event("withdraw")]
    fn withdraw_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] pool: &ManagedAddress,
        #[indexed] amount: &BigUint,
        shares: &BigUint,
    );

    #[event("delegationsUpdated")]
    fn delegations_updated_event(
        &self,
        #[indexed] account: &ManagedAddress,
        pool_count: usize,
    );

    #[event("sharesTransferred")]
    fn shares_transferred_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        #[indexed] pool: &ManagedAddress,
        shares: &BigUint,
    );

    #[event("poolCreated")]
    fn pool_created_event(
        &self,
        #[indexed] pool: &ManagedAddress,
        #[indexed] fee_paid: &BigUint,
        block_nonce: u64,
    );

    #[event("poolListingChanged")]
    fn pool_listing_changed_event(&self, #[indexed] pool: &ManagedAddress, listed: bool);

    // ── Ledger ──

    #[event("feeMinted")]
    fn fee_minted_event(
        &self,
        #[indexed] fee_type: FeeType,
        #[indexed] role: FeeRole,
        #[indexed] recipient: &ManagedAddress,
        shares: &BigUint,
    );

    #[event("rebase")]
    fn rebase_event(
        &self,
        #[indexed] gain: bool,
        #[indexed] amount: &BigUint,
        total_value: &BigUint,
    );

    // ── Oracle reports ──

    #[event("reportSubmitted")]
    fn report_submitted_event(
        &self,
        #[indexed] epoch: u64,
        #[indexed] oracle: &ManagedAddress,
        hash: &ManagedByteArray<Self::Api, 32>,
    );

    #[event("consensusReached")]
    fn consensus_reached_event(
        &self,
        #[indexed] epoch: u64,
        #[indexed] hash: &ManagedByteArray<Self::Api, 32>,
        executable_at: u64,
    );

    #[event("reportExecuted")]
    fn report_executed_event(
        &self,
        #[indexed] epoch: u64,
        #[indexed] beacon_balance: &BigUint,
        total_value: &BigUint,
    );

    #[event("reportRevoked")]
    fn report_revoked_event(
        &self,
        #[indexed] epoch: u64,
        hash: &ManagedByteArray<Self::Api, 32>,
    );

    #[event("reportOracleAdded")]
    fn report_oracle_added_event(&self, #[indexed] oracle: &ManagedAddress);

    #[event("reportOracleRemoved")]
    fn report_oracle_removed_event(&self, #[indexed] oracle: &ManagedAddress);

    #[event("reportOracleBlacklisted")]
    fn report_oracle_blacklisted_event(&self, #[indexed] oracle: &ManagedAddress);

    #[event("reportOracleUnblacklisted")]
    fn report_oracle_unblacklisted_event(&self, #[indexed] oracle: &ManagedAddress);

    #[event("quorumUpdated")]
    fn quorum_updated_event(&self, #[indexed] active_oracles: usize, quorum: u32);

    // ── Validator rotation ──

    #[event("validatorCreated")]
    fn validator_created_event(
        &self,
        #[indexed] oracle: &ManagedAddress,
        #[indexed] validator_key: &ManagedBuffer,
        validator_count: u64,
    );

    #[event("rotationAdvanced")]
    fn rotation_advanced_event(
        &self,
        #[indexed] forced: bool,
        #[indexed] from_index: usize,
        to_index: usize,
    );

    // ── Administration ──

    #[event("configUpdated")]
    fn config_updated_event(&self, config: &StakingConfig<Self::Api>);

    #[event("feeUpdated")]
    fn fee_updated_event(
        &self,
        #[indexed] fee_type: FeeType,
        #[indexed] is_percentage: bool,
        value: &BigUint,
    );
}
