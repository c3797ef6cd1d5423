//! Sender-side accounting for transfer scenarios.
//!
//! The registry only ever sees the amount; what the sender pays to submit
//! the transfer is modelled here so tests can check the sender ends up
//! down exactly the submission fee.

use blocknotes::Refund;
use blocknotes_core::{Amount, Principal};

/// A principal with a spendable balance.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub owner: Principal,
    balance: Amount,
}

impl Wallet {
    /// Create a wallet holding `balance`.
    pub fn new(owner: Principal, balance: Amount) -> Self {
        Self { owner, balance }
    }

    /// Current balance.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Pay `amount` plus `fee`. Returns the amount in flight, or `None` if
    /// the wallet cannot cover both.
    pub fn send(&mut self, amount: Amount, fee: Amount) -> Option<Amount> {
        let total = amount.checked_add(fee)?;
        self.balance = self.balance.checked_sub(total)?;
        Some(amount)
    }

    /// Apply a refund addressed to this wallet.
    ///
    /// # Panics
    ///
    /// If the refund is addressed to someone else.
    pub fn credit(&mut self, refund: &Refund) {
        assert_eq!(refund.to, self.owner, "refund credited to the wrong wallet");
        self.balance += refund.amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_and_credit() {
        let owner = Principal::from_bytes([1; 32]);
        let mut wallet = Wallet::new(owner, 1_000);

        assert_eq!(wallet.send(400, 10), Some(400));
        assert_eq!(wallet.balance(), 590);

        wallet.credit(&Refund { to: owner, amount: 400 });
        assert_eq!(wallet.balance(), 990);
    }

    #[test]
    fn test_send_insufficient_funds() {
        let mut wallet = Wallet::new(Principal::from_bytes([1; 32]), 100);

        assert_eq!(wallet.send(95, 10), None);
        assert_eq!(wallet.balance(), 100);
    }
}
