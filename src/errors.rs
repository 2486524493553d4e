// ============================================================
// Failure signals
// Every require!/sc_panic! in the contract uses one of these,
// so callers can branch on the exact kind.
// ============================================================

// ── Validation ──

pub const ERR_ZERO_AMOUNT: &str = "ZeroAmount";
pub const ERR_INVALID_ADDRESS: &str = "InvalidAddress";
pub const ERR_INVALID_SUM: &str = "InvalidSum";
pub const ERR_INVALID_FEE_RATE: &str = "InvalidFeeRate";
pub const ERR_INVALID_QUORUM: &str = "InvalidQuorum";
pub const ERR_INVALID_REPORT: &str = "InvalidReport";
pub const ERR_INVALID_VALIDATOR_KEY: &str = "InvalidValidatorKey";
pub const ERR_REPORT_ENCODING: &str = "ReportEncodingFailed";

// ── Authorization ──

pub const ERR_ONLY_ACTIVE_ORACLE: &str = "OnlyActiveOracle";
pub const ERR_ONLY_SENTINEL: &str = "OnlySentinel";
pub const ERR_NOT_CURRENT_AUTHORIZED_ACTOR: &str = "NotCurrentAuthorizedActor";

// ── State preconditions ──

pub const ERR_FEATURE_DISABLED: &str = "FeatureDisabled";
pub const ERR_POOL_NOT_FOUND: &str = "PoolNotFound";
pub const ERR_POOL_EXISTS: &str = "PoolExists";
pub const ERR_EARLY_TRANSFER: &str = "EarlyTransfer";
pub const ERR_EPOCH_NOT_GREATER: &str = "EpochNotGreaterThanLastConsensus";
pub const ERR_ORACLE_ALREADY_VOTED: &str = "OracleAlreadyVoted";
pub const ERR_TOO_EARLY_TO_EXECUTE: &str = "TooEarlyToExecute";
pub const ERR_REVOKED_REPORT: &str = "RevokedReport";
pub const ERR_REPORT_NOT_FOUND: &str = "ReportNotFound";
pub const ERR_REPORT_ALREADY_EXECUTED: &str = "ReportAlreadyExecuted";
pub const ERR_CONSENSUS_NOT_REACHED: &str = "ConsensusNotReached";
pub const ERR_REPORT_ORACLE_EXISTS: &str = "ReportOracleExists";
pub const ERR_REPORT_ORACLE_NOT_EXISTS: &str = "ReportOracleNotExists";
pub const ERR_ORACLE_ALREADY_BLACKLISTED: &str = "OracleAlreadyBlacklisted";
pub const ERR_ORACLE_NOT_BLACKLISTED: &str = "OracleNotBlacklisted";
pub const ERR_VALIDATOR_ORACLE_EXISTS: &str = "ValidatorOracleExists";
pub const ERR_VALIDATOR_ORACLE_NOT_EXISTS: &str = "ValidatorOracleNotExists";
pub const ERR_VALIDATOR_EXISTS: &str = "ValidatorExists";
pub const ERR_VALIDATOR_DEPOSIT_ADDRESS_NOT_SET: &str = "ValidatorDepositAddressNotSet";
pub const ERR_POOL_INSOLVENT: &str = "PoolInsolvent";

// ── Capacity ──

pub const ERR_LESS_THAN_MINIMUM_DEPOSIT: &str = "LessThanMinimumDeposit";
pub const ERR_LESS_THAN_MINIMUM_WITHDRAW: &str = "LessThanMinimumWithdraw";
pub const ERR_DEPOSIT_LIMIT_REACHED: &str = "DepositLimitReached";
pub const ERR_WITHDRAWALS_LIMIT_REACHED: &str = "WithdrawalsPoolLimitReached";
pub const ERR_INSUFFICIENT_ACCOUNT_BALANCE: &str = "InsufficientAccountBalance";
pub const ERR_INSUFFICIENT_BUFFERED_VALUE: &str = "InsufficientBufferedValue";
pub const ERR_INSUFFICIENT_SHARES: &str = "InsufficientShares";
pub const ERR_INSUFFICIENT_DELEGATION: &str = "InsufficientDelegation";
pub const ERR_TOO_MANY_DELEGATIONS: &str = "TooManyDelegations";

// ── Numeric ──

pub const ERR_OVERFLOW: &str = "Overflow";
pub const ERR_UNDERFLOW: &str = "Underflow";
