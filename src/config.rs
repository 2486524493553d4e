multiversx_sc::imports!();

use crate::{
    errors::{ERR_INVALID_ADDRESS, ERR_INVALID_FEE_RATE, ERR_INVALID_SUM, ERR_ONLY_SENTINEL},
    types::{Fee, FeeAllocation, FeeRole, FeeType, StakingConfig},
    PRECISION,
};

// ============================================================
// Configuration, fee schedule and role registry
// ============================================================

#[multiversx_sc::module]
pub trait ConfigModule: crate::events::EventsModule {
    /// Replaces the whole configuration record. Fields below their
    /// protocol floor are raised to the floor.
    #[only_owner]
    #[endpoint(setConfig)]
    fn set_config(&self, config: StakingConfig<Self::Api>) {
        let applied = config.with_floors();
        self.config().set(&applied);
        self.config_updated_event(&applied);
    }

    #[only_owner]
    #[endpoint(setFee)]
    fn set_fee(
        &self,
        fee_type: FeeType,
        value: BigUint,
        is_percentage: bool,
        allocation: FeeAllocation<Self::Api>,
    ) {
        require!(allocation.sum() == PRECISION, ERR_INVALID_SUM);
        require!(
            !is_percentage || value <= PRECISION,
            ERR_INVALID_FEE_RATE
        );

        self.fee_updated_event(fee_type, is_percentage, &value);
        self.fee_schedule(fee_type).set(Fee {
            value,
            is_percentage,
            allocation,
        });
    }

    /// Default recipient for a fee role. Pool and sender are normally
    /// overridden by the operation that charges the fee.
    #[only_owner]
    #[endpoint(setFeeRoleAddress)]
    fn set_fee_role_address(&self, role: FeeRole, address: ManagedAddress) {
        self.fee_role_address(role).set(&address);
    }

    #[only_owner]
    #[endpoint(setSentinel)]
    fn set_sentinel(&self, sentinel: ManagedAddress) {
        require!(!sentinel.is_zero(), ERR_INVALID_ADDRESS);
        self.sentinel().set(&sentinel);
    }

    #[only_owner]
    #[endpoint(setValidatorDepositAddress)]
    fn set_validator_deposit_address(&self, address: ManagedAddress) {
        require!(!address.is_zero(), ERR_INVALID_ADDRESS);
        self.validator_deposit_address().set(&address);
    }

    fn install_defaults(&self) {
        self.config().set(StakingConfig::default_config());
        for fee_type in [
            FeeType::Entry,
            FeeType::RewardProcessing,
            FeeType::PoolCreation,
            FeeType::ValidatorCreation,
        ] {
            if self.fee_schedule(fee_type).is_empty() {
                self.fee_schedule(fee_type).set(Fee::zero());
            }
        }
    }

    fn require_sentinel(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            !self.sentinel().is_empty() && self.sentinel().get() == caller,
            ERR_ONLY_SENTINEL
        );
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getConfig)]
    fn get_config(&self) -> StakingConfig<Self::Api> {
        self.config().get()
    }

    #[view(getFee)]
    fn get_fee(&self, fee_type: FeeType) -> Fee<Self::Api> {
        self.fee_schedule(fee_type).get()
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("config")]
    fn config(&self) -> SingleValueMapper<StakingConfig<Self::Api>>;

    #[storage_mapper("feeSchedule")]
    fn fee_schedule(&self, fee_type: FeeType) -> SingleValueMapper<Fee<Self::Api>>;

    #[view(getFeeRoleAddress)]
    #[storage_mapper("feeRoleAddress")]
    fn fee_role_address(&self, role: FeeRole) -> SingleValueMapper<ManagedAddress>;

    #[view(getSentinel)]
    #[storage_mapper("sentinel")]
    fn sentinel(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getValidatorDepositAddress)]
    #[storage_mapper("validatorDepositAddress")]
    fn validator_deposit_address(&self) -> SingleValueMapper<ManagedAddress>;
}
