multiversx_sc::imports!();

use crate::{
    types::{Distribution, Fee, FeeRecipients, FeeRole, FeeType},
    PRECISION,
};

// ============================================================
// Fee distribution
// Fee value is converted to shares and split across the four
// roles by the schedule's allocation weights. Split remainders
// are never minted and stay with every holder.
// ============================================================

#[multiversx_sc::module]
pub trait FeeModule:
    crate::share_ledger::ShareLedgerModule
    + crate::config::ConfigModule
    + crate::events::EventsModule
{
    /// Distributes an inflow of `gross_value` that has not been booked
    /// into the ledger yet. The fee part goes to the roles, the rest is
    /// minted to `principal`. Every conversion uses the pre-inflow totals,
    /// so the caller must book the value only after this returns.
    fn distribute_inflow(
        &self,
        fee_type: FeeType,
        gross_value: &BigUint,
        recipients: &FeeRecipients<Self::Api>,
        principal: &ManagedAddress,
    ) -> Distribution<Self::Api> {
        let fee = self.fee_schedule(fee_type).get();
        let fee_value = fee.fee_value(gross_value);
        let net_value = gross_value - &fee_value;

        let fee_shares = self.shares_for_value(&fee_value);
        let principal_shares = self.shares_for_value(&net_value);

        let (fee_shares_minted, sender_fee_shares) =
            self.mint_fee_shares(fee_type, &fee, &fee_shares, recipients);
        self.mint_shares(principal, &principal_shares);

        Distribution {
            fee_value,
            net_value,
            principal_shares,
            sender_fee_shares,
            fee_shares_minted,
        }
    }

    /// Charges a fee on value already in the ledger (report profit,
    /// validator creation). No principal is minted; fee shares dilute
    /// existing holders so that they are worth exactly the fee value.
    fn distribute_dilution(
        &self,
        fee_type: FeeType,
        gross_value: &BigUint,
        recipients: &FeeRecipients<Self::Api>,
    ) -> Distribution<Self::Api> {
        let fee = self.fee_schedule(fee_type).get();
        let fee_value = fee.fee_value(gross_value);
        let net_value = gross_value - &fee_value;

        let total_shares = self.total_shares().get();
        let total_value = self.total_value();
        let fee_shares = if total_shares == 0u64 || total_value <= fee_value {
            BigUint::zero()
        } else {
            &fee_value * &total_shares / (total_value - &fee_value)
        };

        let (fee_shares_minted, sender_fee_shares) =
            self.mint_fee_shares(fee_type, &fee, &fee_shares, recipients);

        Distribution {
            fee_value,
            net_value,
            principal_shares: BigUint::zero(),
            sender_fee_shares,
            fee_shares_minted,
        }
    }

    /// Returns (total minted, minted to the sender role).
    fn mint_fee_shares(
        &self,
        fee_type: FeeType,
        fee: &Fee<Self::Api>,
        fee_shares: &BigUint,
        recipients: &FeeRecipients<Self::Api>,
    ) -> (BigUint, BigUint) {
        let mut minted = BigUint::zero();
        let mut sender_part = BigUint::zero();
        if *fee_shares == 0u64 {
            return (minted, sender_part);
        }

        for role in FeeRole::ALL {
            let part = fee_shares * fee.allocation.weight(role) / PRECISION;
            if part == 0u64 {
                continue;
            }
            let recipient = match self.resolve_fee_recipient(role, recipients) {
                Some(address) => address,
                None => continue,
            };

            self.mint_shares(&recipient, &part);
            self.fee_minted_event(fee_type, role, &recipient, &part);

            if role == FeeRole::Sender {
                sender_part += &part;
            }
            minted += part;
        }

        (minted, sender_part)
    }

    fn resolve_fee_recipient(
        &self,
        role: FeeRole,
        recipients: &FeeRecipients<Self::Api>,
    ) -> Option<ManagedAddress> {
        let explicit = match role {
            FeeRole::Pool => recipients.pool.clone(),
            FeeRole::Sender => recipients.sender.clone(),
            FeeRole::Operator | FeeRole::Protocol => None,
        };
        let address = match explicit {
            Some(address) => address,
            None => {
                let registry = self.fee_role_address(role);
                if registry.is_empty() {
                    return None;
                }
                registry.get()
            }
        };

        if address.is_zero() {
            None
        } else {
            Some(address)
        }
    }
}
