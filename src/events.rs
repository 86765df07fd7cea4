multiversx_sc::imports!();

use crate::types::{Resolution, VoteSide};

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("purchase")]
    fn purchase_event(
        &self,
        #[indexed] buyer: &ManagedAddress,
        #[indexed] unlock_height: u64,
        amount: &BigUint,
    );

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        #[indexed] asset_id: u64,
        amount: &BigUint,
    );

    #[event("vestingReleased")]
    fn vesting_released_event(&self, #[indexed] holder: &ManagedAddress, amount: &BigUint);

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        created_at: u64,
    );

    #[event("supportChanged")]
    fn support_changed_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] supporter: &ManagedAddress,
        support_total: &BigUint,
    );

    #[event("electionTriggered")]
    fn election_triggered_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voting_asset: u64,
        #[indexed] election_start: u64,
        snapshot_total_votes: &BigUint,
    );

    #[event("votingTokensClaimed")]
    fn voting_tokens_claimed_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] holder: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("voteCast")]
    fn vote_cast_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] side: VoteSide,
        amount: &BigUint,
    );

    #[event("proposalResolved")]
    fn proposal_resolved_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] resolution: Resolution,
        #[indexed] early: bool,
        resolved_at: u64,
    );

    #[event("proposalExecuted")]
    fn proposal_executed_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] executor: &ManagedAddress,
        executed_at: u64,
    );

    #[event("fundsLocked")]
    fn funds_locked_event(&self, #[indexed] token: &EgldOrEsdtTokenIdentifier, amount: &BigUint);

    #[event("fundsUnlocked")]
    fn funds_unlocked_event(&self, #[indexed] token: &EgldOrEsdtTokenIdentifier, amount: &BigUint);

    #[event("treasuryDeposit")]
    fn treasury_deposit_event(
        &self,
        #[indexed] depositor: &ManagedAddress,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
    );
}
