#![no_std]

multiversx_sc::imports!();

pub mod config;
pub mod election;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod treasury;
pub mod types;
pub mod vesting;

use errors::*;
use types::{
    GovernanceConfig, Proposal, ProposalAction, ProposalStatus, Resolution, VoteSink,
    MEMBERSHIP_ASSET,
};

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait ElectionDao:
    config::ConfigModule
    + events::EventsModule
    + ledger::LedgerModule
    + vesting::VestingModule
    + treasury::TreasuryModule
    + election::ElectionModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    /// `initial_supply` goes to the deployer fully vested. `reserve_supply`
    /// is held by the contract and sold when `mint_on_purchase` is off.
    #[init]
    fn init(
        &self,
        config: GovernanceConfig<Self::Api>,
        initial_supply: BigUint,
        reserve_supply: BigUint,
    ) {
        self.validate_config(&config);
        self.config().set(&config);
        self.next_asset_id().set(MEMBERSHIP_ASSET + 1);
        self.total_unvested_supply().set(BigUint::zero());
        self.proposal_count().set(0u64);

        let sc_address = self.blockchain().get_sc_address();
        let mut seed = ManagedBuffer::new();
        seed.append(sc_address.as_managed_buffer());
        seed.append(self.blockchain().get_block_random_seed().as_managed_buffer());
        let salt = self.crypto().keccak256(&seed);
        self.sink_salt().set(salt.as_managed_buffer());

        if initial_supply > 0u64 {
            let deployer = self.blockchain().get_caller();
            self.mint(MEMBERSHIP_ASSET, &deployer, &initial_supply);
        }
        if reserve_supply > 0u64 {
            self.mint(MEMBERSHIP_ASSET, &sc_address, &reserve_supply);
        }
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: purchase
    // Membership bought at `token_price`, vested after `vesting_period`.
    // ========================================================

    #[endpoint(purchase)]
    #[payable("EGLD")]
    fn purchase(&self, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        let payment = self.call_value().egld_value().clone_value();
        let config = self.config().get();

        require!(config.token_price > 0u64, ERR_PURCHASES_DISABLED);
        require!(amount > 0u64, ERR_INVALID_AMOUNT);
        require!(payment == &amount * &config.token_price, ERR_WRONG_PAYMENT);
        if config.restrict_purchases_to_holders {
            require!(
                self.balance(&caller, MEMBERSHIP_ASSET).get() > 0u64,
                ERR_NOT_HOLDER
            );
        }

        let now = self.current_height();
        let unlock_height = now + config.vesting_period;
        if config.vesting_period > 0 {
            self.add_vesting_schedule(&caller, &amount, unlock_height);
        }

        if config.mint_on_purchase {
            self.mint(MEMBERSHIP_ASSET, &caller, &amount);
        } else {
            let sc_address = self.blockchain().get_sc_address();
            require!(
                self.balance(&sc_address, MEMBERSHIP_ASSET).get() >= amount,
                ERR_RESERVE_EXHAUSTED
            );
            self.move_balance(&sc_address, &caller, MEMBERSHIP_ASSET, &amount);
        }

        self.purchase_event(&caller, unlock_height, &amount);
    }

    // ========================================================
    // ENDPOINT: transfer
    // Plain transfers for every asset. A voting asset sent to its
    // election's yes/no sink is a vote and may end the election.
    // ========================================================

    #[endpoint(transfer)]
    fn transfer(&self, to: ManagedAddress, asset_id: u64, amount: BigUint) {
        self.enter_guard();

        let caller = self.blockchain().get_caller();
        require!(self.vote_sink(&caller).is_empty(), ERR_SINK_CALLER);
        require!(self.asset_exists(asset_id), ERR_UNKNOWN_ASSET);
        require!(amount > 0u64, ERR_INVALID_AMOUNT);

        let now = self.current_height();
        let sink_mapper = self.vote_sink(&to);

        if asset_id == MEMBERSHIP_ASSET {
            require!(sink_mapper.is_empty(), ERR_MEMBERSHIP_TO_SINK);
            let vested = self.vested_balance(&caller, now);
            require!(amount <= vested, ERR_INSUFFICIENT_VESTED);
            self.move_balance(&caller, &to, asset_id, &amount);
        } else if !sink_mapper.is_empty() {
            let sink = sink_mapper.get();
            let owner = self.voting_asset_proposal(asset_id).get();
            require!(sink.proposal_id == owner, ERR_WRONG_SINK);

            let mut proposal = self.load_proposal(owner);
            self.require_election_open(&proposal, now);

            self.move_balance(&caller, &to, asset_id, &amount);
            self.vote_cast_event(owner, &caller, sink.side, &amount);
            self.check_early_termination(&mut proposal, now);
        } else {
            self.move_balance(&caller, &to, asset_id, &amount);
        }

        self.exit_guard();
    }

    // ========================================================
    // ENDPOINT: createProposal
    // Any holder with vested membership can propose.
    // ========================================================

    #[endpoint(createProposal)]
    fn create_proposal(
        &self,
        description: ManagedBuffer,
        action: ProposalAction<Self::Api>,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        let now = self.current_height();
        require!(self.vested_balance(&caller, now) > 0u64, ERR_NOT_MEMBER);
        require!(!description.is_empty(), ERR_EMPTY_DESCRIPTION);
        self.validate_action(&action);

        let proposal_id = self.proposal_count().get() + 1u64;
        let proposal = Proposal {
            id: proposal_id,
            proposer: caller.clone(),
            description,
            action,
            created_at: now,
            support_total: BigUint::zero(),
            election_triggered: false,
            election_start: 0u64,
            voting_asset: 0u64,
            yes_sink: ManagedAddress::zero(),
            no_sink: ManagedAddress::zero(),
            snapshot_total_votes: BigUint::zero(),
            resolution: Resolution::Unresolved,
            resolved_early: false,
            resolved_at: 0u64,
            executed: false,
        };

        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);

        self.proposal_created_event(proposal_id, &caller, now);

        proposal_id
    }

    // ========================================================
    // ENDPOINT: addSupport / removeSupport
    // Pre-election only. Reaching the threshold triggers the election
    // within the same call.
    // ========================================================

    #[endpoint(addSupport)]
    fn add_support(&self, proposal_id: u64, amount: BigUint) {
        require!(amount > 0u64, ERR_INVALID_AMOUNT);
        let caller = self.blockchain().get_caller();
        let now = self.current_height();
        let mut proposal = self.load_pending(proposal_id, now);

        let given = self.support(proposal_id, &caller).get();
        let vested = self.vested_balance(&caller, now);
        require!(&given + &amount <= vested, ERR_INSUFFICIENT_VESTED);

        self.support(proposal_id, &caller).set(&given + &amount);
        proposal.support_total += &amount;

        self.try_trigger_election(&mut proposal, now);
        self.proposals(proposal_id).set(&proposal);

        self.support_changed_event(proposal_id, &caller, &proposal.support_total);
    }

    #[endpoint(removeSupport)]
    fn remove_support(&self, proposal_id: u64, amount: BigUint) {
        require!(amount > 0u64, ERR_INVALID_AMOUNT);
        let caller = self.blockchain().get_caller();
        let now = self.current_height();
        let mut proposal = self.load_pending(proposal_id, now);

        let given = self.support(proposal_id, &caller).get();
        require!(given >= amount, ERR_INSUFFICIENT_SUPPORT);

        self.support(proposal_id, &caller).set(&given - &amount);
        proposal.support_total -= &amount;
        self.proposals(proposal_id).set(&proposal);

        self.support_changed_event(proposal_id, &caller, &proposal.support_total);
    }

    /// Re-checks the threshold, e.g. after a trigger was aborted for lack of
    /// treasury funds. Returns whether the election started in this call.
    #[endpoint(triggerElection)]
    fn trigger_election(&self, proposal_id: u64) -> bool {
        let now = self.current_height();
        let mut proposal = self.load_proposal(proposal_id);
        if proposal.election_triggered {
            return false;
        }
        require!(
            proposal.resolution != Resolution::Expired && !self.is_expired(&proposal, now),
            ERR_PROPOSAL_EXPIRED
        );

        let triggered = self.try_trigger_election(&mut proposal, now);
        if triggered {
            self.proposals(proposal_id).set(&proposal);
        }
        triggered
    }

    // ========================================================
    // ENDPOINT: claimVotingTokens
    // One claim per holder per election, minted lazily.
    // ========================================================

    #[endpoint(claimVotingTokens)]
    fn claim_voting_tokens(&self, proposal_id: u64) -> BigUint {
        let caller = self.blockchain().get_caller();
        let now = self.current_height();
        let proposal = self.load_proposal(proposal_id);
        self.require_election_open(&proposal, now);
        require!(
            !self.claimed(proposal_id).contains(&caller),
            ERR_ALREADY_CLAIMED
        );

        let eligible = self.vested_balance_at_start(&caller, proposal.election_start, now);
        let issued = self.total_supply(proposal.voting_asset).get();
        let remaining = if proposal.snapshot_total_votes > issued {
            &proposal.snapshot_total_votes - &issued
        } else {
            BigUint::zero()
        };
        let amount = if eligible < remaining { eligible } else { remaining };
        require!(amount > 0u64, ERR_NOTHING_TO_CLAIM);

        self.claimed(proposal_id).insert(caller.clone());
        self.mint(proposal.voting_asset, &caller, &amount);

        self.voting_tokens_claimed_event(proposal_id, &caller, &amount);
        amount
    }

    // ========================================================
    // ENDPOINT: resolve
    // Locks in an expiry or the natural end of an election.
    // ========================================================

    #[endpoint(resolve)]
    fn resolve(&self, proposal_id: u64) -> Resolution {
        let now = self.current_height();
        let mut proposal = self.load_proposal(proposal_id);
        self.settle(&mut proposal, now);

        if !proposal.is_resolved() {
            require!(proposal.election_triggered, ERR_NOT_YET_ELECTION);
            sc_panic!(ERR_ELECTION_IN_PROGRESS);
        }
        proposal.resolution
    }

    // ========================================================
    // ENDPOINT: execute
    // Anyone, once, after the proposal passed.
    // ========================================================

    #[endpoint(execute)]
    fn execute(&self, proposal_id: u64) {
        self.enter_guard();

        let caller = self.blockchain().get_caller();
        let now = self.current_height();
        let mut proposal = self.load_proposal(proposal_id);
        self.settle(&mut proposal, now);

        require!(proposal.resolution == Resolution::Passed, ERR_NOT_PASSED);
        require!(!proposal.executed, ERR_ALREADY_EXECUTED);

        proposal.executed = true;
        self.proposals(proposal_id).set(&proposal);

        match &proposal.action {
            ProposalAction::Signal => {}
            ProposalAction::TransferFunds {
                token,
                amount,
                recipient,
            } => {
                self.debit_and_unlock(token, amount, recipient);
            }
            ProposalAction::MintMembership { recipient, amount } => {
                require!(self.config().get().allow_minting, ERR_MINTING_DISABLED);
                self.mint(MEMBERSHIP_ASSET, recipient, amount);
            }
            ProposalAction::UpdateParameter { parameter, value } => {
                self.apply_parameter(*parameter, value);
            }
        }

        self.exit_guard();
        self.proposal_executed_event(proposal_id, &caller, now);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn load_pending(&self, proposal_id: u64, now: u64) -> Proposal<Self::Api> {
        let proposal = self.load_proposal(proposal_id);
        require!(
            proposal.resolution != Resolution::Expired && !self.is_expired(&proposal, now),
            ERR_PROPOSAL_EXPIRED
        );
        require!(!proposal.election_triggered, ERR_SUPPORT_FROZEN);
        proposal
    }

    fn validate_action(&self, action: &ProposalAction<Self::Api>) {
        match action {
            ProposalAction::Signal | ProposalAction::UpdateParameter { .. } => {}
            ProposalAction::TransferFunds { amount, .. } => {
                require!(*amount > 0u64, ERR_INVALID_AMOUNT);
            }
            ProposalAction::MintMembership { amount, .. } => {
                require!(*amount > 0u64, ERR_INVALID_AMOUNT);
                require!(self.config().get().allow_minting, ERR_MINTING_DISABLED);
            }
        }
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getProposal)]
    fn get_proposal(&self, id: u64) -> Proposal<Self::Api> {
        self.load_proposal(id)
    }

    #[view(getProposalStatus)]
    fn get_proposal_status(&self, id: u64) -> ProposalStatus {
        let proposal = self.load_proposal(id);
        self.proposal_status(&proposal, self.current_height())
    }

    #[view(getVoteTally)]
    fn get_vote_tally(&self, id: u64) -> MultiValue2<BigUint, BigUint> {
        let proposal = self.load_proposal(id);
        self.vote_tally(&proposal).into()
    }

    #[view(hasClaimed)]
    fn has_claimed(&self, id: u64, holder: &ManagedAddress) -> bool {
        self.claimed(id).contains(holder)
    }

    #[view(getSinkInfo)]
    fn get_sink_info(&self, sink: &ManagedAddress) -> OptionalValue<VoteSink> {
        let mapper = self.vote_sink(sink);
        if mapper.is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(mapper.get())
        }
    }
}
