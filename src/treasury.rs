multiversx_sc::imports!();

use crate::errors::*;

/// Custody of the DAO's EGLD and ESDT holdings. `locked_funds` is a single
/// global counter per token shared by every pending proposal.
#[multiversx_sc::module]
pub trait TreasuryModule: crate::events::EventsModule {
    #[endpoint(deposit)]
    #[payable("*")]
    fn deposit(&self) {
        let payment = self.call_value().egld_or_single_esdt();
        require!(payment.amount > 0u64, ERR_INVALID_AMOUNT);
        let caller = self.blockchain().get_caller();
        self.treasury_deposit_event(&caller, &payment.token_identifier, &payment.amount);
    }

    fn treasury_balance(&self, token: &EgldOrEsdtTokenIdentifier) -> BigUint {
        self.blockchain().get_sc_balance(token, 0)
    }

    fn lock_funds(&self, token: &EgldOrEsdtTokenIdentifier, amount: &BigUint) {
        let available = self.get_available_funds(token);
        require!(*amount <= available, ERR_FUNDS_UNAVAILABLE);
        self.locked_funds(token).update(|locked| *locked += amount);
        self.funds_locked_event(token, amount);
    }

    fn unlock_funds(&self, token: &EgldOrEsdtTokenIdentifier, amount: &BigUint) {
        let locked = self.locked_funds(token).get();
        require!(&locked >= amount, ERR_LOCK_UNDERFLOW);
        self.locked_funds(token).set(&locked - amount);
        self.funds_unlocked_event(token, amount);
    }

    /// Releases the reservation and pays it out. A failed transfer reverts
    /// the whole call, leaving the lock in place for a retry.
    fn debit_and_unlock(
        &self,
        token: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
        recipient: &ManagedAddress,
    ) {
        self.unlock_funds(token, amount);
        self.send().direct(recipient, token, 0, amount);
    }

    #[view(getAvailableFunds)]
    fn get_available_funds(&self, token: &EgldOrEsdtTokenIdentifier) -> BigUint {
        let balance = self.treasury_balance(token);
        let locked = self.locked_funds(token).get();
        if balance > locked {
            balance - locked
        } else {
            BigUint::zero()
        }
    }

    #[view(getLockedFunds)]
    #[storage_mapper("lockedFunds")]
    fn locked_funds(&self, token: &EgldOrEsdtTokenIdentifier) -> SingleValueMapper<BigUint>;
}
