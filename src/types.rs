multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Asset id of the permanent membership token. Every id above it is the
/// ephemeral voting asset of exactly one election.
pub const MEMBERSHIP_ASSET: u64 = 0;

/// Basis points denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum concurrent vesting schedules per holder
pub const MAX_VESTING_SCHEDULES: usize = 10;

/// Upper bound for every block-interval knob. Keeps `height + interval`
/// far from u64 overflow.
pub const MAX_BLOCK_INTERVAL: u64 = 100_000_000;

// ============================================================
// Governance configuration
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct GovernanceConfig<M: ManagedTypeApi> {
    /// Support (of total vested supply) needed to trigger an election
    pub support_threshold_bp: u64,
    /// Participation (of the snapshot) needed for a valid natural end
    pub quorum_bp: u64,
    /// Blocks a proposal may wait for its election before expiring
    pub max_proposal_age: u64,
    /// Blocks an election stays open
    pub election_duration: u64,
    /// Blocks before purchased membership becomes vested
    pub vesting_period: u64,
    /// EGLD per membership unit. Zero disables purchases.
    pub token_price: BigUint<M>,
    pub allow_minting: bool,
    pub restrict_purchases_to_holders: bool,
    /// When false, purchases are served from the contract's reserve
    pub mint_on_purchase: bool,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum GovernanceParameter {
    SupportThreshold,
    Quorum,
    MaxProposalAge,
    ElectionDuration,
    VestingPeriod,
    TokenPrice,
}

// ============================================================
// Vesting
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct VestingSchedule<M: ManagedTypeApi> {
    pub amount: BigUint<M>,
    pub unlock_height: u64,
}

/// Running record of recently matured schedules. Lets a claim tell whether
/// part of a holder's vested balance matured after an election started.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct VestingRelease<M: ManagedTypeApi> {
    /// Latest unlock height folded into `amount`
    pub unlock_height: u64,
    pub amount: BigUint<M>,
}

// ============================================================
// Proposal payload
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum ProposalAction<M: ManagedTypeApi> {
    /// Text-only decision, nothing is dispatched.
    Signal,
    /// Pays treasury funds out. Locked at election trigger.
    TransferFunds {
        token: EgldOrEsdtTokenIdentifier<M>,
        amount: BigUint<M>,
        recipient: ManagedAddress<M>,
    },
    /// Mints fully vested membership. Needs `allow_minting`.
    MintMembership {
        recipient: ManagedAddress<M>,
        amount: BigUint<M>,
    },
    UpdateParameter {
        parameter: GovernanceParameter,
        value: BigUint<M>,
    },
}

// ============================================================
// Proposal record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum Resolution {
    Unresolved,
    Passed,
    Failed,
    Expired,
}

/// Lifecycle state as seen by a caller at the current block, including
/// transitions that are due but not yet persisted.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum ProposalStatus {
    /// Gathering support.
    Pending,
    /// Exceeded `max_proposal_age` without an election. Terminal.
    Expired,
    /// Election open, voting tokens claimable.
    Election,
    /// Election window is over but the tally has not been locked in.
    Ended,
    Passed,
    Failed,
    /// Payload dispatched. Terminal.
    Executed,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub proposer: ManagedAddress<M>,
    pub description: ManagedBuffer<M>,
    pub action: ProposalAction<M>,
    pub created_at: u64,
    /// Frozen once the election is triggered
    pub support_total: BigUint<M>,
    pub election_triggered: bool,
    pub election_start: u64,
    /// 0 until the election is triggered
    pub voting_asset: u64,
    pub yes_sink: ManagedAddress<M>,
    pub no_sink: ManagedAddress<M>,
    /// Total vested supply at trigger time
    pub snapshot_total_votes: BigUint<M>,
    pub resolution: Resolution,
    /// Set when the result was locked in by a majority before the window closed
    pub resolved_early: bool,
    pub resolved_at: u64,
    pub executed: bool,
}

impl<M: ManagedTypeApi> Proposal<M> {
    pub fn is_resolved(&self) -> bool {
        self.resolution != Resolution::Unresolved
    }

    /// Treasury funds reserved while the election runs, if any
    pub fn committed_funds(&self) -> Option<(&EgldOrEsdtTokenIdentifier<M>, &BigUint<M>)> {
        match &self.action {
            ProposalAction::TransferFunds { token, amount, .. } => Some((token, amount)),
            _ => None,
        }
    }
}

// ============================================================
// Vote sinks
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum VoteSide {
    Yes,
    No,
}

impl VoteSide {
    pub fn tag(&self) -> &'static [u8] {
        match self {
            VoteSide::Yes => b"vote-yes",
            VoteSide::No => b"vote-no",
        }
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub struct VoteSink {
    pub proposal_id: u64,
    pub side: VoteSide,
}
