multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{
    Proposal, ProposalStatus, Resolution, VoteSide, VoteSink, BPS_DENOMINATOR, MEMBERSHIP_ASSET,
};

/// Per-proposal state machine: election trigger, vote sinks, tallying and
/// lazy resolution. Every transition is evaluated against the current block
/// when a call touches the proposal; nothing runs in the background.
#[multiversx_sc::module]
pub trait ElectionModule:
    crate::ledger::LedgerModule
    + crate::vesting::VestingModule
    + crate::treasury::TreasuryModule
    + crate::config::ConfigModule
    + crate::events::EventsModule
{
    fn load_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        require!(!self.proposals(proposal_id).is_empty(), ERR_UNKNOWN_PROPOSAL);
        self.proposals(proposal_id).get()
    }

    fn is_expired(&self, proposal: &Proposal<Self::Api>, now: u64) -> bool {
        !proposal.election_triggered
            && now - proposal.created_at > self.config().get().max_proposal_age
    }

    fn election_end(&self, proposal: &Proposal<Self::Api>) -> u64 {
        proposal.election_start + self.config().get().election_duration
    }

    fn is_election_open(&self, proposal: &Proposal<Self::Api>, now: u64) -> bool {
        proposal.election_triggered
            && !proposal.is_resolved()
            && now < self.election_end(proposal)
    }

    fn require_election_open(&self, proposal: &Proposal<Self::Api>, now: u64) {
        require!(proposal.election_triggered, ERR_NOT_YET_ELECTION);
        require!(self.is_election_open(proposal, now), ERR_ELECTION_CLOSED);
    }

    /// Opaque destination no account controls: keccak of the deployment
    /// salt, the proposal id and the side tag.
    fn derive_sink(&self, proposal_id: u64, side: VoteSide) -> ManagedAddress {
        let mut preimage = self.sink_salt().get();
        preimage.append_bytes(&proposal_id.to_be_bytes()[..]);
        preimage.append_bytes(side.tag());
        let hash = self.crypto().keccak256(&preimage);
        ManagedAddress::new_from_bytes(&hash.to_byte_array())
    }

    fn support_threshold_reached(&self, support_total: &BigUint, total_vested: &BigUint) -> bool {
        if *total_vested == 0u64 {
            return false;
        }
        let threshold_bp = self.config().get().support_threshold_bp;
        support_total * BPS_DENOMINATOR >= total_vested * threshold_bp
    }

    /// Pending -> Election, if support is at or above the threshold. The
    /// treasury lock happens in the same transition and aborts it on failure.
    fn try_trigger_election(&self, proposal: &mut Proposal<Self::Api>, now: u64) -> bool {
        if proposal.election_triggered || proposal.is_resolved() {
            return false;
        }
        let total_vested = self.total_vested_supply();
        if !self.support_threshold_reached(&proposal.support_total, &total_vested) {
            return false;
        }

        if let Some((token, amount)) = proposal.committed_funds() {
            self.lock_funds(token, amount);
        }

        // Membership sent to a sink before it was registered is stranded there.
        let yes_sink = self.derive_sink(proposal.id, VoteSide::Yes);
        let no_sink = self.derive_sink(proposal.id, VoteSide::No);
        let stranded = self.burn_all(MEMBERSHIP_ASSET, &yes_sink)
            + self.burn_all(MEMBERSHIP_ASSET, &no_sink);
        let snapshot = if stranded > 0u64 {
            self.total_vested_supply()
        } else {
            total_vested
        };

        let voting_asset = self.allocate_voting_asset();
        self.vote_sink(&yes_sink).set(VoteSink {
            proposal_id: proposal.id,
            side: VoteSide::Yes,
        });
        self.vote_sink(&no_sink).set(VoteSink {
            proposal_id: proposal.id,
            side: VoteSide::No,
        });
        self.voting_asset_proposal(voting_asset).set(proposal.id);

        proposal.election_triggered = true;
        proposal.election_start = now;
        proposal.voting_asset = voting_asset;
        proposal.yes_sink = yes_sink;
        proposal.no_sink = no_sink;
        proposal.snapshot_total_votes = snapshot;

        self.election_triggered_event(
            proposal.id,
            voting_asset,
            now,
            &proposal.snapshot_total_votes,
        );
        true
    }

    fn vote_tally(&self, proposal: &Proposal<Self::Api>) -> (BigUint, BigUint) {
        if !proposal.election_triggered {
            return (BigUint::zero(), BigUint::zero());
        }
        let yes = self.balance(&proposal.yes_sink, proposal.voting_asset).get();
        let no = self.balance(&proposal.no_sink, proposal.voting_asset).get();
        (yes, no)
    }

    /// Locks in whatever terminal state is due at `now`. Returns true when
    /// the proposal changed.
    fn settle(&self, proposal: &mut Proposal<Self::Api>, now: u64) -> bool {
        if proposal.is_resolved() {
            return false;
        }

        if !proposal.election_triggered {
            if self.is_expired(proposal, now) {
                self.finalize(proposal, Resolution::Expired, false, now);
                return true;
            }
            return false;
        }

        if now < self.election_end(proposal) {
            return false;
        }

        let (yes, no) = self.vote_tally(proposal);
        let quorum_bp = self.config().get().quorum_bp;
        let quorum = (&proposal.snapshot_total_votes * quorum_bp) / BPS_DENOMINATOR;
        let participation = &yes + &no;
        let resolution = if participation >= quorum && yes > no {
            Resolution::Passed
        } else {
            Resolution::Failed
        };
        self.finalize(proposal, resolution, false, now);
        true
    }

    /// Re-evaluated after every vote transfer: a side holding more than half
    /// of the snapshot decides the election on the spot.
    fn check_early_termination(&self, proposal: &mut Proposal<Self::Api>, now: u64) {
        if proposal.is_resolved() {
            return;
        }
        let (yes, no) = self.vote_tally(proposal);
        let half = proposal.snapshot_total_votes.clone() / 2u64;
        if yes > half {
            self.finalize(proposal, Resolution::Passed, true, now);
        } else if no > half {
            self.finalize(proposal, Resolution::Failed, true, now);
        }
    }

    fn finalize(
        &self,
        proposal: &mut Proposal<Self::Api>,
        resolution: Resolution,
        early: bool,
        now: u64,
    ) {
        proposal.resolution = resolution;
        proposal.resolved_early = early;
        proposal.resolved_at = now;

        if resolution != Resolution::Passed && proposal.election_triggered {
            if let Some((token, amount)) = proposal.committed_funds() {
                self.unlock_funds(token, amount);
            }
        }

        self.proposals(proposal.id).set(&*proposal);
        self.proposal_resolved_event(proposal.id, resolution, early, now);
    }

    fn proposal_status(&self, proposal: &Proposal<Self::Api>, now: u64) -> ProposalStatus {
        if proposal.executed {
            return ProposalStatus::Executed;
        }
        match proposal.resolution {
            Resolution::Passed => ProposalStatus::Passed,
            Resolution::Failed => ProposalStatus::Failed,
            Resolution::Expired => ProposalStatus::Expired,
            Resolution::Unresolved => {
                if !proposal.election_triggered {
                    if self.is_expired(proposal, now) {
                        ProposalStatus::Expired
                    } else {
                        ProposalStatus::Pending
                    }
                } else if now < self.election_end(proposal) {
                    ProposalStatus::Election
                } else {
                    ProposalStatus::Ended
                }
            }
        }
    }

    /// Held across vote hooks and payload dispatch
    fn enter_guard(&self) {
        require!(!self.reentrancy_guard().get(), ERR_REENTRANT);
        self.reentrancy_guard().set(true);
    }

    fn exit_guard(&self) {
        self.reentrancy_guard().set(false);
    }

    #[view(getProposalCount)]
    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[view(getSupport)]
    #[storage_mapper("support")]
    fn support(&self, proposal_id: u64, supporter: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("claimed")]
    fn claimed(&self, proposal_id: u64) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("voteSink")]
    fn vote_sink(&self, sink: &ManagedAddress) -> SingleValueMapper<VoteSink>;

    #[storage_mapper("votingAssetProposal")]
    fn voting_asset_proposal(&self, asset_id: u64) -> SingleValueMapper<u64>;

    #[storage_mapper("reentrancyGuard")]
    fn reentrancy_guard(&self) -> SingleValueMapper<bool>;
}
