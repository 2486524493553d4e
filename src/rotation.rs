multiversx_sc::imports!();

use crate::{
    errors::{
        ERR_INSUFFICIENT_BUFFERED_VALUE, ERR_INVALID_ADDRESS, ERR_INVALID_VALIDATOR_KEY,
        ERR_NOT_CURRENT_AUTHORIZED_ACTOR, ERR_UNDERFLOW, ERR_VALIDATOR_DEPOSIT_ADDRESS_NOT_SET,
        ERR_VALIDATOR_EXISTS, ERR_VALIDATOR_ORACLE_EXISTS, ERR_VALIDATOR_ORACLE_NOT_EXISTS,
        ERR_ZERO_AMOUNT,
    },
    types::{FeeRecipients, FeeType},
};

/// Cursor position after one step over a list of `len` actors.
pub fn next_cursor(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

// ============================================================
// Validator creation rotation
// Exactly one registered oracle may create the next validator.
// The cursor moves on after every creation, or when the
// sentinel skips an unresponsive oracle.
// ============================================================

#[multiversx_sc::module]
pub trait RotationModule:
    crate::share_ledger::ShareLedgerModule
    + crate::fees::FeeModule
    + crate::config::ConfigModule
    + crate::events::EventsModule
{
    // ========================================================
    // ENDPOINT: createValidator
    // Moves one validator's worth of buffered value to the
    // deposit address and hands the turn to the next oracle.
    // ========================================================

    #[endpoint(createValidator)]
    fn create_validator(&self, validator_key: ManagedBuffer) {
        let caller = self.blockchain().get_caller();
        require!(
            self.current_validator_oracle() == Some(caller.clone()),
            ERR_NOT_CURRENT_AUTHORIZED_ACTOR
        );
        require!(!validator_key.is_empty(), ERR_INVALID_VALIDATOR_KEY);
        require!(
            !self.validator_keys().contains(&validator_key),
            ERR_VALIDATOR_EXISTS
        );
        require!(
            !self.validator_deposit_address().is_empty(),
            ERR_VALIDATOR_DEPOSIT_ADDRESS_NOT_SET
        );

        let validator_size = self.config().get().validator_size;
        require!(
            validator_size <= self.buffered_value().get(),
            ERR_INSUFFICIENT_BUFFERED_VALUE
        );

        self.buffered_value().update(|v| *v -= &validator_size);
        self.beacon_value().update(|v| *v += &validator_size);
        self.validator_keys().insert(validator_key.clone());
        let validator_count = self.validator_count().update(|count| {
            *count += 1;
            *count
        });

        let recipients = FeeRecipients {
            pool: None,
            sender: Some(caller.clone()),
        };
        self.distribute_dilution(FeeType::ValidatorCreation, &validator_size, &recipients);

        let deposit_address = self.validator_deposit_address().get();
        self.send().direct_egld(&deposit_address, &validator_size);
        self.validator_created_event(&caller, &validator_key, validator_count);

        self.advance_rotation(false);
    }

    /// Skips the current oracle without a validator being created.
    #[endpoint(forceAdvance)]
    fn force_advance(&self) {
        self.require_sentinel();
        self.advance_rotation(true);
    }

    /// Value coming back from validators (exits, skimmed rewards).
    /// Total value is unchanged; it only moves from beacon to buffered.
    #[only_owner]
    #[payable("EGLD")]
    #[endpoint(returnValidatorFunds)]
    fn return_validator_funds(&self) {
        let amount = self.call_value().egld_value().clone_value();
        require!(amount > 0u64, ERR_ZERO_AMOUNT);
        let beacon = self.beacon_value().get();
        require!(amount <= beacon, ERR_UNDERFLOW);

        self.beacon_value().set(&(beacon - &amount));
        self.buffered_value().update(|v| *v += &amount);
    }

    #[only_owner]
    #[endpoint(addValidatorOracle)]
    fn add_validator_oracle(&self, oracle: ManagedAddress) {
        require!(!oracle.is_zero(), ERR_INVALID_ADDRESS);
        require!(
            self.validator_oracle_position(&oracle).is_none(),
            ERR_VALIDATOR_ORACLE_EXISTS
        );
        self.validator_oracles().push(&oracle);
    }

    /// Keeps the order of the remaining oracles. The cursor stays on
    /// the same oracle, or wraps to the front if it ran off the end.
    #[only_owner]
    #[endpoint(removeValidatorOracle)]
    fn remove_validator_oracle(&self, oracle: ManagedAddress) {
        let position = match self.validator_oracle_position(&oracle) {
            Some(position) => position,
            None => sc_panic!(ERR_VALIDATOR_ORACLE_NOT_EXISTS),
        };

        let mut oracles = self.validator_oracles();
        let len = oracles.len();
        for index in (position + 1)..len {
            let next = oracles.get(index + 1);
            oracles.set(index, &next);
        }
        oracles.swap_remove(len);

        let remaining = len - 1;
        let cursor = self.rotation_cursor().get();
        let mut new_cursor = if position < cursor { cursor - 1 } else { cursor };
        if new_cursor >= remaining {
            new_cursor = 0;
        }
        self.rotation_cursor().set(new_cursor);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn advance_rotation(&self, forced: bool) {
        let len = self.validator_oracles().len();
        if len == 0 {
            return;
        }
        let from_index = self.rotation_cursor().get();
        let to_index = next_cursor(from_index, len);
        self.rotation_cursor().set(to_index);
        self.rotation_advanced_event(forced, from_index, to_index);
    }

    fn current_validator_oracle(&self) -> Option<ManagedAddress> {
        let oracles = self.validator_oracles();
        if oracles.is_empty() {
            return None;
        }
        Some(oracles.get(self.rotation_cursor().get() + 1))
    }

    /// 0-based position in the rotation.
    fn validator_oracle_position(&self, oracle: &ManagedAddress) -> Option<usize> {
        self.validator_oracles()
            .iter()
            .position(|candidate| &candidate == oracle)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    /// The oracle whose turn it is to create the next validator.
    #[view(getCurrentValidatorOracle)]
    fn get_current_validator_oracle(&self) -> OptionalValue<ManagedAddress> {
        self.current_validator_oracle().into()
    }

    #[view(getValidatorOracles)]
    fn get_validator_oracles(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for oracle in self.validator_oracles().iter() {
            result.push(oracle);
        }
        result
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("validatorOracles")]
    fn validator_oracles(&self) -> VecMapper<ManagedAddress>;

    /// 0-based index into `validatorOracles`.
    #[view(getRotationCursor)]
    #[storage_mapper("rotationCursor")]
    fn rotation_cursor(&self) -> SingleValueMapper<usize>;

    #[storage_mapper("validatorKeys")]
    fn validator_keys(&self) -> UnorderedSetMapper<ManagedBuffer>;

    #[view(getValidatorCount)]
    #[storage_mapper("validatorCount")]
    fn validator_count(&self) -> SingleValueMapper<u64>;
}
