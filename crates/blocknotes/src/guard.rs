//! Incoming-transfer guard.
//!
//! The registry sells nothing and accepts no payment. Value sent to it
//! without an operation is bounced back to the sender in the same call
//! that received it, so the registry's balance is zero between calls.

use blocknotes_core::{Amount, Principal};

/// A refund owed to the sender of an unsolicited transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refund {
    /// Who receives the refund. Always the original sender.
    pub to: Principal,
    /// Refunded amount. Always the full amount received.
    pub amount: Amount,
}

/// Accepts and immediately returns unsolicited transfers.
#[derive(Debug, Default)]
pub struct TransferGuard {
    balance: Amount,
    refund_count: u64,
    refunded_total: Amount,
}

impl TransferGuard {
    /// Create a guard with a zero balance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `amount` from `sender` and return it in full.
    pub fn receive(&mut self, sender: Principal, amount: Amount) -> Refund {
        // Balance is zero on entry, so crediting cannot overflow.
        self.balance += amount;
        let refund = Refund { to: sender, amount };
        self.balance -= refund.amount;
        debug_assert_eq!(self.balance, 0);

        self.refund_count = self.refund_count.saturating_add(1);
        self.refunded_total = self.refunded_total.saturating_add(amount);

        refund
    }

    /// Value currently held. Zero whenever no `receive` is in progress.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Number of transfers bounced so far.
    pub fn refund_count(&self) -> u64 {
        self.refund_count
    }

    /// Sum of all refunded amounts, saturating.
    pub fn refunded_total(&self) -> Amount {
        self.refunded_total
    }
}
