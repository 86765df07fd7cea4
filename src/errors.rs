// Every message starts with its error kind so callers can match on the prefix.

pub const ERR_INVALID_AMOUNT: &str = "ValidationError: amount must be positive";
pub const ERR_INVALID_BPS: &str = "ValidationError: basis points must be within 1..=10000";
pub const ERR_INVALID_DURATION: &str = "ValidationError: election duration must be positive";
pub const ERR_INVALID_INTERVAL: &str = "ValidationError: block interval exceeds the allowed maximum";
pub const ERR_EMPTY_DESCRIPTION: &str = "ValidationError: description is empty";
pub const ERR_UNKNOWN_ASSET: &str = "ValidationError: unknown asset";
pub const ERR_UNKNOWN_PROPOSAL: &str = "ValidationError: proposal does not exist";
pub const ERR_MEMBERSHIP_TO_SINK: &str = "ValidationError: membership tokens cannot be voted";
pub const ERR_WRONG_SINK: &str = "ValidationError: asset does not belong to this election";
pub const ERR_SUPPORT_FROZEN: &str = "ValidationError: support is frozen once the election is triggered";
pub const ERR_WRONG_PAYMENT: &str = "ValidationError: payment does not match amount times price";
pub const ERR_INVALID_PARAMETER: &str = "ValidationError: invalid parameter value";

pub const ERR_INSUFFICIENT_BALANCE: &str = "InsufficientBalance: balance too low";
pub const ERR_INSUFFICIENT_SUPPORT: &str = "InsufficientBalance: support to remove exceeds support given";
pub const ERR_RESERVE_EXHAUSTED: &str = "InsufficientBalance: membership reserve exhausted";
pub const ERR_INSUFFICIENT_VESTED: &str = "InsufficientVestedBalance: vested balance too low";
pub const ERR_NOTHING_TO_CLAIM: &str = "InsufficientVestedBalance: no voting power to claim";

pub const ERR_NOT_MEMBER: &str = "Unauthorized: caller holds no vested membership";
pub const ERR_PURCHASES_DISABLED: &str = "Unauthorized: purchases are disabled";
pub const ERR_NOT_HOLDER: &str = "Unauthorized: purchases are restricted to existing holders";
pub const ERR_MINTING_DISABLED: &str = "Unauthorized: minting is disabled";
pub const ERR_SINK_CALLER: &str = "Unauthorized: vote sinks cannot transfer";

pub const ERR_TOO_MANY_SCHEDULES: &str = "TooManySchedules: vesting schedule limit reached";
pub const ERR_ALREADY_CLAIMED: &str = "AlreadyClaimed: voting tokens already claimed";
pub const ERR_NOT_YET_ELECTION: &str = "NotYetElection: election has not been triggered";
pub const ERR_ELECTION_CLOSED: &str = "ElectionClosed: election is no longer accepting votes";
pub const ERR_ELECTION_IN_PROGRESS: &str = "ElectionInProgress: election is still open";
pub const ERR_PROPOSAL_EXPIRED: &str = "ProposalExpired: proposal exceeded its maximum age";
pub const ERR_FUNDS_UNAVAILABLE: &str = "FundsUnavailable: requested amount exceeds available treasury funds";
pub const ERR_LOCK_UNDERFLOW: &str = "FundsUnavailable: unlock exceeds locked amount";

pub const ERR_NOT_PASSED: &str = "ExecutionFailed: proposal has not passed";
pub const ERR_ALREADY_EXECUTED: &str = "ExecutionFailed: proposal already executed";

pub const ERR_REENTRANT: &str = "Reentrancy: another transfer or execution is in progress";
