multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::{
    BPS_DENOMINATOR, DEFAULT_BLOCKS_PER_WINDOW, DEFAULT_MAX_DELEGATIONS,
    DEFAULT_MAX_REPORT_CHANGE_BPS, DEFAULT_REPORT_DELAY_BLOCKS, DEFAULT_VALIDATOR_SIZE_EGLD,
    DEFAULT_WITHDRAW_DELAY_BLOCKS, MIN_BLOCKS_PER_WINDOW, MIN_MAX_DELEGATIONS,
    MIN_REPORT_DELAY_BLOCKS, MIN_WITHDRAW_DELAY_BLOCKS, PRECISION,
};

// ============================================================
// Fees
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum FeeType {
    /// Charged on every deposit.
    Entry,
    /// Charged on the profit of an executed oracle report.
    RewardProcessing,
    /// Charged when a new pool registers.
    PoolCreation,
    /// Charged when the rotation's current oracle creates a validator.
    ValidatorCreation,
}

/// Stakeholder categories entitled to a part of every fee.
/// Declaration order is the allocation order.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum FeeRole {
    Pool,
    Operator,
    Protocol,
    Sender,
}

impl FeeRole {
    pub const ALL: [FeeRole; 4] = [
        FeeRole::Pool,
        FeeRole::Operator,
        FeeRole::Protocol,
        FeeRole::Sender,
    ];
}

/// Weights across the four fee roles, each a fraction of `PRECISION`.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct FeeAllocation<M: ManagedTypeApi> {
    pub pool: BigUint<M>,
    pub operator: BigUint<M>,
    pub protocol: BigUint<M>,
    pub sender: BigUint<M>,
}

impl<M: ManagedTypeApi> FeeAllocation<M> {
    pub fn all_to(role: FeeRole) -> Self {
        let mut allocation = FeeAllocation {
            pool: BigUint::zero(),
            operator: BigUint::zero(),
            protocol: BigUint::zero(),
            sender: BigUint::zero(),
        };
        *allocation.weight_mut(role) = BigUint::from(PRECISION);
        allocation
    }

    pub fn weight(&self, role: FeeRole) -> &BigUint<M> {
        match role {
            FeeRole::Pool => &self.pool,
            FeeRole::Operator => &self.operator,
            FeeRole::Protocol => &self.protocol,
            FeeRole::Sender => &self.sender,
        }
    }

    fn weight_mut(&mut self, role: FeeRole) -> &mut BigUint<M> {
        match role {
            FeeRole::Pool => &mut self.pool,
            FeeRole::Operator => &mut self.operator,
            FeeRole::Protocol => &mut self.protocol,
            FeeRole::Sender => &mut self.sender,
        }
    }

    pub fn sum(&self) -> BigUint<M> {
        &(&self.pool + &self.operator) + &(&self.protocol + &self.sender)
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Fee<M: ManagedTypeApi> {
    /// Fraction of `PRECISION` when `is_percentage`, absolute EGLD amount otherwise.
    pub value: BigUint<M>,
    pub is_percentage: bool,
    pub allocation: FeeAllocation<M>,
}

impl<M: ManagedTypeApi> Fee<M> {
    pub fn zero() -> Self {
        Fee {
            value: BigUint::zero(),
            is_percentage: true,
            allocation: FeeAllocation::all_to(FeeRole::Protocol),
        }
    }

    /// Fee value owed on `gross`. Fixed fees never exceed `gross`.
    pub fn fee_value(&self, gross: &BigUint<M>) -> BigUint<M> {
        if self.is_percentage {
            return gross * &self.value / BigUint::from(PRECISION);
        }
        if &self.value > gross {
            gross.clone()
        } else {
            self.value.clone()
        }
    }
}

/// Per-operation overrides for the context-dependent fee roles.
/// Operator and protocol always come from the role registry.
pub struct FeeRecipients<M: ManagedTypeApi> {
    pub pool: Option<ManagedAddress<M>>,
    pub sender: Option<ManagedAddress<M>>,
}

impl<M: ManagedTypeApi> FeeRecipients<M> {
    pub fn none() -> Self {
        FeeRecipients {
            pool: None,
            sender: None,
        }
    }
}

/// Result of one fee distribution.
pub struct Distribution<M: ManagedTypeApi> {
    pub fee_value: BigUint<M>,
    pub net_value: BigUint<M>,
    pub principal_shares: BigUint<M>,
    /// Fee shares minted to the sender role, already included in `fee_shares_minted`.
    pub sender_fee_shares: BigUint<M>,
    pub fee_shares_minted: BigUint<M>,
}

// ============================================================
// Ledger
// ============================================================

/// Signed change of the externally held (beacon) value.
pub enum Rebase<M: ManagedTypeApi> {
    Gain(BigUint<M>),
    Loss(BigUint<M>),
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct PoolInfo {
    pub listed: bool,
    pub created_at: u64,
}

/// Fixed-window usage counter. `index` is `block_nonce / blocks_per_window`.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct LimitWindow<M: ManagedTypeApi> {
    pub index: u64,
    pub used: BigUint<M>,
}

// ============================================================
// Configuration
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct StakingConfig<M: ManagedTypeApi> {
    pub deposits_enabled: bool,
    pub withdrawals_enabled: bool,
    pub min_deposit: BigUint<M>,
    pub min_withdraw: BigUint<M>,
    /// Per-window deposit cap. Zero means uncapped.
    pub deposit_limit: BigUint<M>,
    /// Per-window withdrawal cap. Zero means uncapped.
    pub withdrawal_limit: BigUint<M>,
    pub blocks_per_window: u64,
    pub withdraw_delay_blocks: u64,
    pub report_delay_blocks: u64,
    pub max_delegations: u32,
    pub max_report_change_bps: u64,
    pub validator_size: BigUint<M>,
}

impl<M: ManagedTypeApi> StakingConfig<M> {
    pub fn default_config() -> Self {
        StakingConfig {
            deposits_enabled: true,
            withdrawals_enabled: true,
            min_deposit: BigUint::from(PRECISION / 1_000),
            min_withdraw: BigUint::from(PRECISION / 1_000),
            deposit_limit: BigUint::zero(),
            withdrawal_limit: BigUint::zero(),
            blocks_per_window: DEFAULT_BLOCKS_PER_WINDOW,
            withdraw_delay_blocks: DEFAULT_WITHDRAW_DELAY_BLOCKS,
            report_delay_blocks: DEFAULT_REPORT_DELAY_BLOCKS,
            max_delegations: DEFAULT_MAX_DELEGATIONS,
            max_report_change_bps: DEFAULT_MAX_REPORT_CHANGE_BPS,
            validator_size: BigUint::from(DEFAULT_VALIDATOR_SIZE_EGLD) * BigUint::from(PRECISION),
        }
    }

    /// Raises every floored field to its protocol floor.
    pub fn with_floors(mut self) -> Self {
        self.blocks_per_window = self.blocks_per_window.max(MIN_BLOCKS_PER_WINDOW);
        self.withdraw_delay_blocks = self.withdraw_delay_blocks.max(MIN_WITHDRAW_DELAY_BLOCKS);
        self.report_delay_blocks = self.report_delay_blocks.max(MIN_REPORT_DELAY_BLOCKS);
        self.max_delegations = self.max_delegations.max(MIN_MAX_DELEGATIONS);
        self
    }

    /// Largest beacon value change a single report may carry.
    pub fn max_report_change(&self, beacon_value: &BigUint<M>) -> BigUint<M> {
        beacon_value * self.max_report_change_bps / BPS_DENOMINATOR
    }
}

// ============================================================
// Oracle reports
// ============================================================

pub type ReportHash<M> = ManagedByteArray<M, 32>;

/// Values oracles agree on for one epoch.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct OracleReport<M: ManagedTypeApi> {
    /// Total value held by the pool's validators at the end of the epoch.
    pub beacon_balance: BigUint<M>,
    pub validator_count: u64,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum RoundState {
    /// Collecting votes.
    Open,
    /// A hash reached quorum; executable after the report delay.
    ConsensusReached,
    /// Applied to the ledger. Terminal state.
    Executed,
    /// Cancelled by the sentinel. Terminal state.
    Revoked,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct ReportRound<M: ManagedTypeApi> {
    pub state: RoundState,
    /// Agreed hash; all zeroes while the round is open.
    pub consensus_hash: ReportHash<M>,
    /// First block nonce at which the agreed report may be executed (0 while open).
    pub executable_at: u64,
}

impl<M: ManagedTypeApi> ReportRound<M> {
    pub fn open() -> Self {
        ReportRound {
            state: RoundState::Open,
            consensus_hash: ManagedByteArray::new_from_bytes(&[0u8; 32]),
            executable_at: 0,
        }
    }
}
