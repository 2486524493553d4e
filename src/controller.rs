multiversx_sc::imports!();

use crate::{
    errors::{
        ERR_DEPOSIT_LIMIT_REACHED, ERR_EARLY_TRANSFER, ERR_FEATURE_DISABLED,
        ERR_INSUFFICIENT_ACCOUNT_BALANCE, ERR_INSUFFICIENT_BUFFERED_VALUE,
        ERR_INSUFFICIENT_DELEGATION, ERR_INSUFFICIENT_SHARES, ERR_INVALID_ADDRESS,
        ERR_INVALID_SUM, ERR_LESS_THAN_MINIMUM_DEPOSIT, ERR_LESS_THAN_MINIMUM_WITHDRAW,
        ERR_OVERFLOW, ERR_POOL_EXISTS, ERR_POOL_NOT_FOUND, ERR_TOO_MANY_DELEGATIONS,
        ERR_WITHDRAWALS_LIMIT_REACHED, ERR_ZERO_AMOUNT,
    },
    types::{FeeRecipients, FeeType, LimitWindow, PoolInfo},
};

// ============================================================
// Deposits, withdrawals and delegations
// ============================================================

#[multiversx_sc::module]
pub trait ControllerModule:
    crate::share_ledger::ShareLedgerModule
    + crate::fees::FeeModule
    + crate::config::ConfigModule
    + crate::events::EventsModule
{
    // ========================================================
    // ENDPOINT: deposit
    // Entry fee is taken in shares; everything the depositor
    // receives is delegated to the target pool.
    // ========================================================

    #[payable("EGLD")]
    #[endpoint(deposit)]
    fn deposit(
        &self,
        pool: ManagedAddress,
        referral: OptionalValue<ManagedAddress>,
    ) -> BigUint {
        let caller = self.blockchain().get_caller();
        let amount = self.call_value().egld_value().clone_value();
        let config = self.config().get();
        let now = self.blockchain().get_block_nonce();

        require!(config.deposits_enabled, ERR_FEATURE_DISABLED);
        require!(amount > 0u64, ERR_ZERO_AMOUNT);
        require!(amount >= config.min_deposit, ERR_LESS_THAN_MINIMUM_DEPOSIT);
        let window = self.next_window(
            &self.deposit_window(),
            &amount,
            &config.deposit_limit,
            config.blocks_per_window,
            ERR_DEPOSIT_LIMIT_REACHED,
        );
        require!(self.is_listed_pool(&pool), ERR_POOL_NOT_FOUND);

        let recipients = FeeRecipients {
            pool: Some(pool.clone()),
            sender: Some(caller.clone()),
        };
        let distribution =
            self.distribute_inflow(FeeType::Entry, &amount, &recipients, &caller);
        self.buffered_value().update(|v| *v += &amount);

        let minted_to_caller = &distribution.principal_shares + &distribution.sender_fee_shares;
        self.add_delegation(&caller, &pool, &minted_to_caller);

        let eligible_at = match now.checked_add(config.withdraw_delay_blocks) {
            Some(nonce) => nonce,
            None => sc_panic!(ERR_OVERFLOW),
        };
        self.deposit_window().set(&window);
        self.withdraw_eligible_at(&caller).set(eligible_at);

        let referral_address = referral
            .into_option()
            .unwrap_or_else(ManagedAddress::zero);
        self.deposit_event(&caller, &pool, &amount, &referral_address, &minted_to_caller);

        minted_to_caller
    }

    // ========================================================
    // ENDPOINT: withdraw
    // No fee. Shares are burned rounding up, value is released
    // exactly as requested.
    // ========================================================

    #[endpoint(withdraw)]
    fn withdraw(&self, amount: BigUint, pool: ManagedAddress) -> BigUint {
        let caller = self.blockchain().get_caller();
        let config = self.config().get();

        require!(config.withdrawals_enabled, ERR_FEATURE_DISABLED);
        self.require_transfer_allowed(&caller);
        require!(amount > 0u64, ERR_ZERO_AMOUNT);
        require!(amount >= config.min_withdraw, ERR_LESS_THAN_MINIMUM_WITHDRAW);
        require!(!self.pools(&pool).is_empty(), ERR_POOL_NOT_FOUND);

        let shares_to_burn = self.shares_for_value_ceil(&amount);
        require!(
            shares_to_burn <= self.shares(&caller).get(),
            ERR_INSUFFICIENT_ACCOUNT_BALANCE
        );
        require!(
            amount <= self.buffered_value().get(),
            ERR_INSUFFICIENT_BUFFERED_VALUE
        );
        let window = self.next_window(
            &self.withdrawal_window(),
            &amount,
            &config.withdrawal_limit,
            config.blocks_per_window,
            ERR_WITHDRAWALS_LIMIT_REACHED,
        );

        self.release_delegation(&caller, &pool, &shares_to_burn);
        self.burn_shares(&caller, &shares_to_burn);
        self.buffered_value().update(|v| *v -= &amount);
        self.withdrawal_window().set(&window);

        self.send().direct_egld(&caller, &amount);
        self.withdraw_event(&caller, &pool, &amount, &shares_to_burn);

        amount
    }

    // ========================================================
    // ENDPOINT: updateDelegations
    // Replaces all delegations; the splits must cover the
    // caller's shares exactly.
    // ========================================================

    #[endpoint(updateDelegations)]
    fn update_delegations(&self, splits: MultiValueEncoded<MultiValue2<ManagedAddress, BigUint>>) {
        let caller = self.blockchain().get_caller();
        let max_delegations = self.config().get().max_delegations as usize;

        // Failures revert the whole call, so the map can be rebuilt in place.
        let mut delegations = self.delegations(&caller);
        delegations.clear();

        let mut total = BigUint::zero();
        for split in splits {
            let (pool, shares) = split.into_tuple();
            require!(shares > 0u64, ERR_ZERO_AMOUNT);
            require!(!self.pools(&pool).is_empty(), ERR_POOL_NOT_FOUND);
            total += &shares;

            let current = delegations.get(&pool).unwrap_or_default();
            delegations.insert(pool, current + shares);
            require!(delegations.len() <= max_delegations, ERR_TOO_MANY_DELEGATIONS);
        }
        require!(total == self.shares(&caller).get(), ERR_INVALID_SUM);

        self.delegations_updated_event(&caller, delegations.len());
    }

    // ========================================================
    // ENDPOINT: transferShares
    // Moves shares together with their delegation to `pool`.
    // ========================================================

    #[endpoint(transferShares)]
    fn transfer_shares(&self, recipient: ManagedAddress, shares: BigUint, pool: ManagedAddress) {
        let caller = self.blockchain().get_caller();
        self.require_transfer_allowed(&caller);
        require!(shares > 0u64, ERR_ZERO_AMOUNT);
        require!(
            !recipient.is_zero() && recipient != caller,
            ERR_INVALID_ADDRESS
        );
        require!(!self.pools(&pool).is_empty(), ERR_POOL_NOT_FOUND);
        require!(shares <= self.shares(&caller).get(), ERR_INSUFFICIENT_SHARES);

        let moved_delegation = self.release_delegation(&caller, &pool, &shares);
        self.burn_shares(&caller, &shares);
        self.mint_shares(&recipient, &shares);
        if moved_delegation > 0u64 {
            self.add_delegation(&recipient, &pool, &moved_delegation);
        }

        self.shares_transferred_event(&caller, &recipient, &pool, &shares);
    }

    // ========================================================
    // ENDPOINT: createPool
    // Registers the caller as a listed pool. The payment, net of
    // the pool-creation fee, is minted to the new pool.
    // ========================================================

    #[payable("EGLD")]
    #[endpoint(createPool)]
    fn create_pool(&self) -> BigUint {
        let caller = self.blockchain().get_caller();
        let payment = self.call_value().egld_value().clone_value();
        require!(self.pools(&caller).is_empty(), ERR_POOL_EXISTS);

        let now = self.blockchain().get_block_nonce();
        self.pools(&caller).set(PoolInfo {
            listed: true,
            created_at: now,
        });

        let recipients = FeeRecipients {
            pool: Some(caller.clone()),
            sender: Some(caller.clone()),
        };
        let distribution =
            self.distribute_inflow(FeeType::PoolCreation, &payment, &recipients, &caller);
        self.buffered_value().update(|v| *v += &payment);

        self.pool_created_event(&caller, &distribution.fee_value, now);

        distribution.principal_shares
    }

    #[only_owner]
    #[endpoint(setPoolListed)]
    fn set_pool_listed(&self, pool: ManagedAddress, listed: bool) {
        require!(!self.pools(&pool).is_empty(), ERR_POOL_NOT_FOUND);
        self.pools(&pool).update(|info| info.listed = listed);
        self.pool_listing_changed_event(&pool, listed);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn is_listed_pool(&self, pool: &ManagedAddress) -> bool {
        let mapper = self.pools(pool);
        !mapper.is_empty() && mapper.get().listed
    }

    fn require_transfer_allowed(&self, account: &ManagedAddress) {
        let now = self.blockchain().get_block_nonce();
        require!(
            now >= self.withdraw_eligible_at(account).get(),
            ERR_EARLY_TRANSFER
        );
    }

    /// Fixed-window counter: usage resets whenever the block nonce
    /// enters a new window. Returns the window to store on success.
    fn next_window(
        &self,
        window: &SingleValueMapper<LimitWindow<Self::Api>>,
        amount: &BigUint,
        limit: &BigUint,
        blocks_per_window: u64,
        limit_error: &str,
    ) -> LimitWindow<Self::Api> {
        let index = self.blockchain().get_block_nonce() / blocks_per_window;
        let used = if window.is_empty() {
            amount.clone()
        } else {
            let current = window.get();
            if current.index == index {
                current.used + amount
            } else {
                amount.clone()
            }
        };
        require!(*limit == 0u64 || &used <= limit, limit_error);

        LimitWindow { index, used }
    }

    fn add_delegation(&self, account: &ManagedAddress, pool: &ManagedAddress, shares: &BigUint) {
        if *shares == 0u64 {
            return;
        }
        let mut delegations = self.delegations(account);
        let current = delegations.get(pool).unwrap_or_default();
        if current == 0u64 {
            let max_delegations = self.config().get().max_delegations as usize;
            require!(delegations.len() < max_delegations, ERR_TOO_MANY_DELEGATIONS);
        }
        delegations.insert(pool.clone(), current + shares);
    }

    /// Releases `shares` from the account's delegation to `pool`. Any
    /// part the pool does not cover must come from undelegated shares.
    /// Returns the amount taken from the pool's delegation.
    fn release_delegation(
        &self,
        account: &ManagedAddress,
        pool: &ManagedAddress,
        shares: &BigUint,
    ) -> BigUint {
        let mut delegations = self.delegations(account);
        let mut delegated_total = BigUint::zero();
        for (_, delegated) in delegations.iter() {
            delegated_total += delegated;
        }

        let account_shares = self.shares(account).get();
        let undelegated = if account_shares > delegated_total {
            account_shares - delegated_total
        } else {
            BigUint::zero()
        };

        let in_pool = delegations.get(pool).unwrap_or_default();
        let from_pool = if &in_pool < shares {
            in_pool.clone()
        } else {
            shares.clone()
        };
        require!(
            &(shares - &from_pool) <= &undelegated,
            ERR_INSUFFICIENT_DELEGATION
        );

        if from_pool > 0u64 {
            let remaining = in_pool - &from_pool;
            if remaining == 0u64 {
                delegations.remove(pool);
            } else {
                delegations.insert(pool.clone(), remaining);
            }
        }

        from_pool
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getDelegations)]
    fn get_delegations(
        &self,
        account: &ManagedAddress,
    ) -> MultiValueEncoded<MultiValue2<ManagedAddress, BigUint>> {
        let mut result = MultiValueEncoded::new();
        for (pool, shares) in self.delegations(account).iter() {
            result.push((pool, shares).into());
        }
        result
    }

    #[view(getPool)]
    fn get_pool(&self, pool: &ManagedAddress) -> OptionalValue<PoolInfo> {
        let mapper = self.pools(pool);
        if mapper.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(mapper.get())
        }
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("pools")]
    fn pools(&self, pool: &ManagedAddress) -> SingleValueMapper<PoolInfo>;

    #[storage_mapper("delegations")]
    fn delegations(&self, account: &ManagedAddress) -> MapMapper<ManagedAddress, BigUint>;

    #[view(getWithdrawEligibleAt)]
    #[storage_mapper("withdrawEligibleAt")]
    fn withdraw_eligible_at(&self, account: &ManagedAddress) -> SingleValueMapper<u64>;

    #[storage_mapper("depositWindow")]
    fn deposit_window(&self) -> SingleValueMapper<LimitWindow<Self::Api>>;

    #[storage_mapper("withdrawalWindow")]
    fn withdrawal_window(&self) -> SingleValueMapper<LimitWindow<Self::Api>>;
}
