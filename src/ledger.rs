multiversx_sc::imports!();

use crate::errors::*;

/// Multi-asset balance table. Asset 0 is membership, every other id is the
/// voting asset of one election.
#[multiversx_sc::module]
pub trait LedgerModule: crate::events::EventsModule {
    /// Only reachable from purchase, claim, initial supply and proposal
    /// execution; there is no public mint endpoint.
    fn mint(&self, asset_id: u64, to: &ManagedAddress, amount: &BigUint) {
        require!(*amount > 0u64, ERR_INVALID_AMOUNT);
        self.balance(to, asset_id).update(|b| *b += amount);
        self.total_supply(asset_id).update(|s| *s += amount);
    }

    /// Destroys the holder's whole balance of `asset_id`. Returns the amount.
    fn burn_all(&self, asset_id: u64, holder: &ManagedAddress) -> BigUint {
        let amount = self.balance(holder, asset_id).take();
        if amount > 0u64 {
            self.total_supply(asset_id).update(|s| *s -= &amount);
        }
        amount
    }

    /// Moves `amount` with no policy beyond the sender's raw balance.
    /// Vesting and sink rules are enforced by the caller.
    fn move_balance(
        &self,
        from: &ManagedAddress,
        to: &ManagedAddress,
        asset_id: u64,
        amount: &BigUint,
    ) {
        require!(*amount > 0u64, ERR_INVALID_AMOUNT);
        let sender_balance = self.balance(from, asset_id).get();
        require!(&sender_balance >= amount, ERR_INSUFFICIENT_BALANCE);

        self.balance(from, asset_id).set(&sender_balance - amount);
        self.balance(to, asset_id).update(|b| *b += amount);

        self.transfer_event(from, to, asset_id, amount);
    }

    /// Assets 0..next_asset_id are live
    fn asset_exists(&self, asset_id: u64) -> bool {
        asset_id < self.next_asset_id().get()
    }

    fn allocate_voting_asset(&self) -> u64 {
        let asset_id = self.next_asset_id().get();
        self.next_asset_id().set(asset_id + 1);
        asset_id
    }

    #[view(balanceOf)]
    fn balance_of(&self, holder: &ManagedAddress, asset_id: u64) -> BigUint {
        self.balance(holder, asset_id).get()
    }

    #[view(totalSupply)]
    fn get_total_supply(&self, asset_id: u64) -> BigUint {
        self.total_supply(asset_id).get()
    }

    #[storage_mapper("balance")]
    fn balance(&self, holder: &ManagedAddress, asset_id: u64) -> SingleValueMapper<BigUint>;

    #[storage_mapper("totalSupply")]
    fn total_supply(&self, asset_id: u64) -> SingleValueMapper<BigUint>;

    #[storage_mapper("nextAssetId")]
    fn next_asset_id(&self) -> SingleValueMapper<u64>;
}
