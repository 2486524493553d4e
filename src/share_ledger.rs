multiversx_sc::imports!();

use crate::{
    errors::{ERR_INSUFFICIENT_SHARES, ERR_OVERFLOW, ERR_POOL_INSOLVENT, ERR_UNDERFLOW},
    types::Rebase,
    SHARE_DOMAIN_BITS,
};

// ============================================================
// Share ledger
// Balances are derived: value(a) = shares(a) * totalValue / totalShares.
// A rebase moves totalValue only, so every balance moves at once.
// ============================================================

#[multiversx_sc::module]
pub trait ShareLedgerModule: crate::events::EventsModule {
    fn mint_shares(&self, account: &ManagedAddress, shares: &BigUint) {
        if *shares == 0u64 {
            return;
        }
        let new_total = &self.total_shares().get() + shares;
        require!(
            new_total < BigUint::from(2u64).pow(SHARE_DOMAIN_BITS),
            ERR_OVERFLOW
        );

        self.shares(account).update(|s| *s += shares);
        self.total_shares().set(&new_total);
    }

    fn burn_shares(&self, account: &ManagedAddress, shares: &BigUint) {
        let balance = self.shares(account).get();
        require!(&balance >= shares, ERR_INSUFFICIENT_SHARES);

        self.shares(account).set(&(balance - shares));
        self.total_shares().update(|ts| *ts -= shares);
    }

    /// Shares credited for `value` (rounded down).
    fn shares_for_value(&self, value: &BigUint) -> BigUint {
        let total_shares = self.total_shares().get();
        let total_value = self.total_value();
        if total_shares == 0u64 {
            return value.clone();
        }
        require!(total_value > 0u64, ERR_POOL_INSOLVENT);

        value * &total_shares / total_value
    }

    /// Shares debited for `value` (rounded up).
    fn shares_for_value_ceil(&self, value: &BigUint) -> BigUint {
        let total_shares = self.total_shares().get();
        let total_value = self.total_value();
        if total_shares == 0u64 {
            return value.clone();
        }
        require!(total_value > 0u64, ERR_POOL_INSOLVENT);

        let numerator = value * &total_shares + &total_value - BigUint::from(1u64);
        numerator / total_value
    }

    /// Value of `shares` (rounded down).
    fn value_for_shares(&self, shares: &BigUint) -> BigUint {
        let total_shares = self.total_shares().get();
        if total_shares == 0u64 {
            return BigUint::zero();
        }

        shares * &self.total_value() / total_shares
    }

    /// Moves the externally held value. Total shares are untouched.
    fn rebase(&self, delta: Rebase<Self::Api>) {
        let (gain, amount) = match delta {
            Rebase::Gain(amount) => {
                self.beacon_value().update(|v| *v += &amount);
                (true, amount)
            }
            Rebase::Loss(amount) => {
                let beacon = self.beacon_value().get();
                require!(beacon >= amount, ERR_UNDERFLOW);
                self.beacon_value().set(&(beacon - &amount));
                (false, amount)
            }
        };

        self.rebase_event(gain, &amount, &self.total_value());
    }

    fn total_value(&self) -> BigUint {
        self.buffered_value().get() + self.beacon_value().get()
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getTotalValue)]
    fn get_total_value(&self) -> BigUint {
        self.total_value()
    }

    #[view(getSharesOf)]
    fn get_shares_of(&self, account: &ManagedAddress) -> BigUint {
        self.shares(account).get()
    }

    #[view(getValueOf)]
    fn get_value_of(&self, account: &ManagedAddress) -> BigUint {
        self.value_for_shares(&self.shares(account).get())
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getTotalShares)]
    #[storage_mapper("totalShares")]
    fn total_shares(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("shares")]
    fn shares(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    /// Value held by the contract itself.
    #[view(getBufferedValue)]
    #[storage_mapper("bufferedValue")]
    fn buffered_value(&self) -> SingleValueMapper<BigUint>;

    /// Value deployed to validators, re-valued by executed reports.
    #[view(getBeaconValue)]
    #[storage_mapper("beaconValue")]
    fn beacon_value(&self) -> SingleValueMapper<BigUint>;
}
