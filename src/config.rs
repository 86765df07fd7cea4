multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{GovernanceConfig, GovernanceParameter, BPS_DENOMINATOR, MAX_BLOCK_INTERVAL};

#[multiversx_sc::module]
pub trait ConfigModule {
    fn validate_config(&self, config: &GovernanceConfig<Self::Api>) {
        require!(
            is_valid_bps(config.support_threshold_bp) && is_valid_bps(config.quorum_bp),
            ERR_INVALID_BPS
        );
        require!(config.election_duration > 0, ERR_INVALID_DURATION);
        require!(
            config.max_proposal_age <= MAX_BLOCK_INTERVAL
                && config.election_duration <= MAX_BLOCK_INTERVAL
                && config.vesting_period <= MAX_BLOCK_INTERVAL,
            ERR_INVALID_INTERVAL
        );
    }

    /// Applies an executed `UpdateParameter` proposal. The resulting
    /// configuration must still pass init-time validation.
    fn apply_parameter(&self, parameter: GovernanceParameter, value: &BigUint) {
        let mut config = self.config().get();
        if parameter == GovernanceParameter::TokenPrice {
            config.token_price = value.clone();
        } else {
            let value = match value.to_u64() {
                Some(v) => v,
                None => sc_panic!(ERR_INVALID_PARAMETER),
            };
            match parameter {
                GovernanceParameter::SupportThreshold => config.support_threshold_bp = value,
                GovernanceParameter::Quorum => config.quorum_bp = value,
                GovernanceParameter::MaxProposalAge => config.max_proposal_age = value,
                GovernanceParameter::ElectionDuration => config.election_duration = value,
                GovernanceParameter::VestingPeriod => config.vesting_period = value,
                GovernanceParameter::TokenPrice => {}
            }
        }
        self.validate_config(&config);
        self.config().set(&config);
    }

    fn current_height(&self) -> u64 {
        self.blockchain().get_block_nonce()
    }

    #[view(getConfig)]
    #[storage_mapper("config")]
    fn config(&self) -> SingleValueMapper<GovernanceConfig<Self::Api>>;

    /// Deployment salt for vote sink derivation
    #[storage_mapper("sinkSalt")]
    fn sink_salt(&self) -> SingleValueMapper<ManagedBuffer>;
}

fn is_valid_bps(bps: u64) -> bool {
    bps > 0 && bps <= BPS_DENOMINATOR
}
