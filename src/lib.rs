#![no_std]

multiversx_sc::imports!();

pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod fees;
pub mod oracle;
pub mod rotation;
pub mod share_ledger;
pub mod types;

use errors::{ERR_INVALID_ADDRESS, ERR_INVALID_QUORUM};

// ============================================================
// Constants
// ============================================================

/// 1.0 in fixed point: fee rates and allocation weights are fractions of this.
pub const PRECISION: u64 = 1_000_000_000_000_000_000;

/// Basis points denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Quorum is at least 3/5 of the active report oracles.
pub const QUORUM_NUMERATOR: u64 = 3;
pub const QUORUM_DENOMINATOR: u64 = 5;

/// Total shares must stay below 2^256.
pub const SHARE_DOMAIN_BITS: u32 = 256;

/// ~1 day of 6-second blocks
pub const DEFAULT_BLOCKS_PER_WINDOW: u64 = 14_400;
pub const DEFAULT_WITHDRAW_DELAY_BLOCKS: u64 = 10;
pub const DEFAULT_REPORT_DELAY_BLOCKS: u64 = 100;
pub const DEFAULT_MAX_DELEGATIONS: u32 = 5;
/// 10% of beacon value per report
pub const DEFAULT_MAX_REPORT_CHANGE_BPS: u64 = 1_000;
pub const DEFAULT_VALIDATOR_SIZE_EGLD: u64 = 2_500;

// Floors applied by setConfig. Values below are raised, not rejected.
pub const MIN_BLOCKS_PER_WINDOW: u64 = 1;
pub const MIN_WITHDRAW_DELAY_BLOCKS: u64 = 1;
pub const MIN_REPORT_DELAY_BLOCKS: u64 = 5;
pub const MIN_MAX_DELEGATIONS: u32 = 1;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait StakingPool:
    config::ConfigModule
    + events::EventsModule
    + share_ledger::ShareLedgerModule
    + fees::FeeModule
    + controller::ControllerModule
    + rotation::RotationModule
    + oracle::OracleModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, min_quorum: u32, sentinel: ManagedAddress) {
        require!(min_quorum > 0, ERR_INVALID_QUORUM);
        require!(!sentinel.is_zero(), ERR_INVALID_ADDRESS);

        self.install_defaults();
        self.sentinel().set(&sentinel);
        self.min_quorum().set(min_quorum);
        self.recompute_quorum();
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // VIEWS
    // ========================================================

    /// (total value, total shares, buffered value, beacon value, last executed epoch)
    #[view(getPoolStats)]
    fn get_pool_stats(&self) -> MultiValue5<BigUint, BigUint, BigUint, BigUint, u64> {
        (
            self.total_value(),
            self.total_shares().get(),
            self.buffered_value().get(),
            self.beacon_value().get(),
            self.last_executed_epoch().get(),
        )
            .into()
    }

    /// Value of one whole share, scaled by `PRECISION`.
    #[view(getSharePrice)]
    fn get_share_price(&self) -> BigUint {
        let total_shares = self.total_shares().get();
        if total_shares == 0u64 {
            return BigUint::from(PRECISION);
        }
        (self.total_value() * BigUint::from(PRECISION)) / total_shares
    }
}
