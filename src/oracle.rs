multiversx_sc::imports!();

use crate::{
    errors::{
        ERR_CONSENSUS_NOT_REACHED, ERR_EPOCH_NOT_GREATER, ERR_INVALID_ADDRESS,
        ERR_INVALID_QUORUM, ERR_INVALID_REPORT, ERR_ONLY_ACTIVE_ORACLE,
        ERR_ORACLE_ALREADY_BLACKLISTED, ERR_ORACLE_ALREADY_VOTED, ERR_ORACLE_NOT_BLACKLISTED,
        ERR_OVERFLOW, ERR_REPORT_ALREADY_EXECUTED, ERR_REPORT_ENCODING, ERR_REPORT_NOT_FOUND,
        ERR_REPORT_ORACLE_EXISTS, ERR_REPORT_ORACLE_NOT_EXISTS, ERR_REVOKED_REPORT,
        ERR_TOO_EARLY_TO_EXECUTE,
    },
    types::{FeeRecipients, FeeType, OracleReport, Rebase, ReportHash, ReportRound, RoundState},
    QUORUM_DENOMINATOR, QUORUM_NUMERATOR,
};

/// Votes required for consensus with `active_oracles` non-blacklisted members.
pub fn quorum_for(active_oracles: usize, min_quorum: u32) -> u32 {
    let proportional = (active_oracles as u64 * QUORUM_NUMERATOR / QUORUM_DENOMINATOR) as u32;
    core::cmp::max(min_quorum, proportional)
}

// ============================================================
// Oracle report consensus
// Open → ConsensusReached → Executed, with Revoked reachable
// from the first two. The only path from reported beacon
// value into the ledger.
// ============================================================

#[multiversx_sc::module]
pub trait OracleModule:
    crate::share_ledger::ShareLedgerModule
    + crate::fees::FeeModule
    + crate::rotation::RotationModule
    + crate::config::ConfigModule
    + crate::events::EventsModule
{
    // ========================================================
    // ENDPOINT: submitReport
    // ========================================================

    #[endpoint(submitReport)]
    fn submit_report(&self, epoch: u64, report: OracleReport<Self::Api>) {
        let caller = self.blockchain().get_caller();
        require!(self.is_active_oracle(&caller), ERR_ONLY_ACTIVE_ORACLE);
        require!(
            epoch > self.last_executed_epoch().get(),
            ERR_EPOCH_NOT_GREATER
        );

        let round_mapper = self.report_round(epoch);
        let mut round = if round_mapper.is_empty() {
            ReportRound::open()
        } else {
            round_mapper.get()
        };
        require!(round.state != RoundState::Revoked, ERR_REVOKED_REPORT);
        require!(
            self.oracle_vote(epoch, &caller).is_empty(),
            ERR_ORACLE_ALREADY_VOTED
        );

        let hash = self.report_hash(epoch, &report);
        self.oracle_vote(epoch, &caller).set(&hash);
        let tally = self.hash_tally(epoch, &hash).update(|count| {
            *count += 1;
            *count
        });
        self.report_submitted_event(epoch, &caller, &hash);

        if round.state == RoundState::Open {
            let leading = self.leading_hash(epoch);
            if leading.is_empty() || tally > self.hash_tally(epoch, &leading.get()).get() {
                leading.set(&hash);
            }

            if tally >= self.quorum().get() {
                self.reach_consensus(epoch, &mut round, hash);
            } else {
                self.open_rounds().insert(epoch);
            }
        }

        round_mapper.set(&round);
    }

    // ========================================================
    // ENDPOINT: executeReport
    // Anyone may execute once the delay has passed.
    // ========================================================

    #[endpoint(executeReport)]
    fn execute_report(&self, epoch: u64, report: OracleReport<Self::Api>) {
        require!(
            epoch > self.last_executed_epoch().get(),
            ERR_EPOCH_NOT_GREATER
        );

        let round_mapper = self.report_round(epoch);
        require!(!round_mapper.is_empty(), ERR_REPORT_NOT_FOUND);
        let mut round = round_mapper.get();
        match round.state {
            RoundState::ConsensusReached => {}
            RoundState::Open => sc_panic!(ERR_CONSENSUS_NOT_REACHED),
            RoundState::Executed => sc_panic!(ERR_REPORT_ALREADY_EXECUTED),
            RoundState::Revoked => sc_panic!(ERR_REVOKED_REPORT),
        }
        require!(
            self.report_hash(epoch, &report) == round.consensus_hash,
            ERR_CONSENSUS_NOT_REACHED
        );
        require!(
            self.blockchain().get_block_nonce() >= round.executable_at,
            ERR_TOO_EARLY_TO_EXECUTE
        );

        // ── Sanity checks ──
        // A validator created after the round was agreed moves value into the
        // beacon that the report does not know about.
        require!(
            report.validator_count == self.validator_count().get(),
            ERR_INVALID_REPORT
        );
        let beacon = self.beacon_value().get();
        let max_change = self.config().get().max_report_change(&beacon);

        if report.beacon_balance >= beacon {
            let gain = &report.beacon_balance - &beacon;
            require!(gain <= max_change, ERR_INVALID_REPORT);
            if gain > 0u64 {
                self.rebase(Rebase::Gain(gain.clone()));
                self.distribute_dilution(
                    FeeType::RewardProcessing,
                    &gain,
                    &FeeRecipients::none(),
                );
            }
        } else {
            let loss = &beacon - &report.beacon_balance;
            require!(loss <= max_change, ERR_INVALID_REPORT);
            self.rebase(Rebase::Loss(loss));
        }

        round.state = RoundState::Executed;
        round_mapper.set(&round);
        self.last_executed_epoch().set(epoch);

        self.report_executed_event(epoch, &report.beacon_balance, &self.total_value());
    }

    // ========================================================
    // ENDPOINT: revokeConsensusReport
    // Sentinel veto before execution.
    // ========================================================

    #[endpoint(revokeConsensusReport)]
    fn revoke_consensus_report(&self, epoch: u64, hash: ReportHash<Self::Api>) {
        self.require_sentinel();

        let round_mapper = self.report_round(epoch);
        require!(!round_mapper.is_empty(), ERR_REPORT_NOT_FOUND);
        let mut round = round_mapper.get();
        match round.state {
            RoundState::Open => {
                require!(self.hash_tally(epoch, &hash).get() > 0, ERR_REPORT_NOT_FOUND);
            }
            RoundState::ConsensusReached => {
                require!(round.consensus_hash == hash, ERR_CONSENSUS_NOT_REACHED);
            }
            RoundState::Executed => sc_panic!(ERR_REPORT_ALREADY_EXECUTED),
            RoundState::Revoked => sc_panic!(ERR_REVOKED_REPORT),
        }

        round.state = RoundState::Revoked;
        round_mapper.set(&round);
        self.open_rounds().swap_remove(&epoch);
        self.report_revoked_event(epoch, &hash);
    }

    // ========================================================
    // Oracle set management
    // Every change recomputes the quorum before returning.
    // ========================================================

    #[only_owner]
    #[endpoint(addReportOracle)]
    fn add_report_oracle(&self, oracle: ManagedAddress) {
        require!(!oracle.is_zero(), ERR_INVALID_ADDRESS);
        require!(
            self.report_oracles().insert(oracle.clone()),
            ERR_REPORT_ORACLE_EXISTS
        );

        self.report_oracle_added_event(&oracle);
        self.recompute_quorum();
    }

    #[only_owner]
    #[endpoint(removeReportOracle)]
    fn remove_report_oracle(&self, oracle: ManagedAddress) {
        require!(
            self.report_oracles().swap_remove(&oracle),
            ERR_REPORT_ORACLE_NOT_EXISTS
        );
        self.blacklisted_oracles().swap_remove(&oracle);

        self.report_oracle_removed_event(&oracle);
        self.recompute_quorum();
    }

    #[only_owner]
    #[endpoint(blacklistReportOracle)]
    fn blacklist_report_oracle(&self, oracle: ManagedAddress) {
        require!(
            self.report_oracles().contains(&oracle),
            ERR_REPORT_ORACLE_NOT_EXISTS
        );
        require!(
            self.blacklisted_oracles().insert(oracle.clone()),
            ERR_ORACLE_ALREADY_BLACKLISTED
        );

        self.report_oracle_blacklisted_event(&oracle);
        self.recompute_quorum();
    }

    #[only_owner]
    #[endpoint(unBlacklistReportOracle)]
    fn un_blacklist_report_oracle(&self, oracle: ManagedAddress) {
        require!(
            self.report_oracles().contains(&oracle),
            ERR_REPORT_ORACLE_NOT_EXISTS
        );
        require!(
            self.blacklisted_oracles().swap_remove(&oracle),
            ERR_ORACLE_NOT_BLACKLISTED
        );

        self.report_oracle_unblacklisted_event(&oracle);
        self.recompute_quorum();
    }

    #[only_owner]
    #[endpoint(setMinQuorum)]
    fn set_min_quorum(&self, min_quorum: u32) {
        require!(min_quorum > 0, ERR_INVALID_QUORUM);
        self.min_quorum().set(min_quorum);
        self.recompute_quorum();
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn recompute_quorum(&self) {
        let active = self.active_oracle_count();
        let quorum = quorum_for(active, self.min_quorum().get());
        self.quorum().set(quorum);
        self.quorum_updated_event(active, quorum);

        self.settle_open_rounds(quorum);
    }

    /// Re-checks every open round against a changed quorum. Rounds whose
    /// leading hash already has enough votes reach consensus now; rounds
    /// that can no longer execute are dropped from the open set.
    fn settle_open_rounds(&self, quorum: u32) {
        let mut epochs = ManagedVec::<Self::Api, u64>::new();
        for epoch in self.open_rounds().iter() {
            epochs.push(epoch);
        }

        let last_executed = self.last_executed_epoch().get();
        for epoch in epochs.iter() {
            let round_mapper = self.report_round(epoch);
            let mut round = round_mapper.get();
            if epoch <= last_executed || round.state != RoundState::Open {
                self.open_rounds().swap_remove(&epoch);
                continue;
            }

            let leading = self.leading_hash(epoch).get();
            if self.hash_tally(epoch, &leading).get() >= quorum {
                self.reach_consensus(epoch, &mut round, leading);
                round_mapper.set(&round);
            }
        }
    }

    fn reach_consensus(
        &self,
        epoch: u64,
        round: &mut ReportRound<Self::Api>,
        hash: ReportHash<Self::Api>,
    ) {
        let delay = self.config().get().report_delay_blocks;
        let executable_at = match self.blockchain().get_block_nonce().checked_add(delay) {
            Some(nonce) => nonce,
            None => sc_panic!(ERR_OVERFLOW),
        };

        self.consensus_reached_event(epoch, &hash, executable_at);
        round.state = RoundState::ConsensusReached;
        round.consensus_hash = hash;
        round.executable_at = executable_at;
        self.open_rounds().swap_remove(&epoch);
    }

    fn active_oracle_count(&self) -> usize {
        // Blacklisted oracles are always members.
        self.report_oracles().len() - self.blacklisted_oracles().len()
    }

    fn is_active_oracle(&self, oracle: &ManagedAddress) -> bool {
        self.report_oracles().contains(oracle) && !self.blacklisted_oracles().contains(oracle)
    }

    /// keccak256 over the nested encoding of (epoch, report).
    fn report_hash(&self, epoch: u64, report: &OracleReport<Self::Api>) -> ReportHash<Self::Api> {
        let mut payload = ManagedBuffer::new();
        require!(
            epoch.dep_encode(&mut payload).is_ok() && report.dep_encode(&mut payload).is_ok(),
            ERR_REPORT_ENCODING
        );
        self.crypto().keccak256(&payload)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(isReportOracle)]
    fn is_report_oracle(&self, oracle: &ManagedAddress) -> bool {
        self.report_oracles().contains(oracle)
    }

    #[view(isBlacklistedOracle)]
    fn is_blacklisted_oracle(&self, oracle: &ManagedAddress) -> bool {
        self.blacklisted_oracles().contains(oracle)
    }

    #[view(getActiveOracleCount)]
    fn get_active_oracle_count(&self) -> usize {
        self.active_oracle_count()
    }

    #[view(getReportRound)]
    fn get_report_round(&self, epoch: u64) -> OptionalValue<ReportRound<Self::Api>> {
        let mapper = self.report_round(epoch);
        if mapper.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(mapper.get())
        }
    }

    #[view(getReportHash)]
    fn get_report_hash(&self, epoch: u64, report: OracleReport<Self::Api>) -> ReportHash<Self::Api> {
        self.report_hash(epoch, &report)
    }

    #[view(getHashTally)]
    fn get_hash_tally(&self, epoch: u64, hash: ReportHash<Self::Api>) -> u32 {
        self.hash_tally(epoch, &hash).get()
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("reportOracles")]
    fn report_oracles(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("blacklistedOracles")]
    fn blacklisted_oracles(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[view(getQuorum)]
    #[storage_mapper("quorum")]
    fn quorum(&self) -> SingleValueMapper<u32>;

    #[view(getMinQuorum)]
    #[storage_mapper("minQuorum")]
    fn min_quorum(&self) -> SingleValueMapper<u32>;

    #[view(getLastExecutedEpoch)]
    #[storage_mapper("lastExecutedEpoch")]
    fn last_executed_epoch(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("reportRound")]
    fn report_round(&self, epoch: u64) -> SingleValueMapper<ReportRound<Self::Api>>;

    #[storage_mapper("oracleVote")]
    fn oracle_vote(
        &self,
        epoch: u64,
        oracle: &ManagedAddress,
    ) -> SingleValueMapper<ReportHash<Self::Api>>;

    /// Epochs with an open round, re-checked whenever the quorum changes.
    #[storage_mapper("openRounds")]
    fn open_rounds(&self) -> UnorderedSetMapper<u64>;

    /// Hash with the most votes in an open round; the first to get there wins ties.
    #[storage_mapper("leadingHash")]
    fn leading_hash(&self, epoch: u64) -> SingleValueMapper<ReportHash<Self::Api>>;

    #[storage_mapper("hashTally")]
    fn hash_tally(&self, epoch: u64, hash: &ReportHash<Self::Api>) -> SingleValueMapper<u32>;
}
