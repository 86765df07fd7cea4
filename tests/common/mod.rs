// Shared whitebox setup for the DAO tests.
#![allow(dead_code)]

use election_dao::election::ElectionModule;
use election_dao::types::{GovernanceConfig, ProposalAction};
use election_dao::ElectionDao;
use multiversx_sc::types::{Address, EgldOrEsdtTokenIdentifier};
use multiversx_sc_scenario::api::DebugApi;
use multiversx_sc_scenario::{
    managed_address, managed_biguint, managed_buffer, rust_biguint, whitebox_legacy::*,
};

pub const WASM_PATH: &str = "output/election-dao.wasm";
pub const USER_EGLD: u64 = 1_000_000;

pub type DaoContract = election_dao::ContractObj<DebugApi>;

pub struct DaoParams {
    pub support_threshold_bp: u64,
    pub quorum_bp: u64,
    pub max_proposal_age: u64,
    pub election_duration: u64,
    pub vesting_period: u64,
    pub token_price: u64,
    pub allow_minting: bool,
    pub restrict_purchases_to_holders: bool,
    pub mint_on_purchase: bool,
    pub initial_supply: u64,
    pub reserve_supply: u64,
}

impl Default for DaoParams {
    fn default() -> Self {
        DaoParams {
            support_threshold_bp: 2_000,
            quorum_bp: 3_000,
            max_proposal_age: 100,
            election_duration: 50,
            vesting_period: 100,
            token_price: 10,
            allow_minting: true,
            restrict_purchases_to_holders: false,
            mint_on_purchase: true,
            initial_supply: 100,
            reserve_supply: 0,
        }
    }
}

pub struct DaoSetup<ObjBuilder>
where
    ObjBuilder: 'static + Copy + Fn() -> DaoContract,
{
    pub b_mock: BlockchainStateWrapper,
    pub owner: Address,
    pub alice: Address,
    pub bob: Address,
    pub carol: Address,
    pub sc_wrapper: ContractObjWrapper<DaoContract, ObjBuilder>,
}

pub struct ElectionInfo {
    pub voting_asset: u64,
    pub yes_sink: Address,
    pub no_sink: Address,
}

/// Must be called inside a tx or query closure.
pub fn governance_config(params: &DaoParams) -> GovernanceConfig<DebugApi> {
    GovernanceConfig {
        support_threshold_bp: params.support_threshold_bp,
        quorum_bp: params.quorum_bp,
        max_proposal_age: params.max_proposal_age,
        election_duration: params.election_duration,
        vesting_period: params.vesting_period,
        token_price: managed_biguint!(params.token_price),
        allow_minting: params.allow_minting,
        restrict_purchases_to_holders: params.restrict_purchases_to_holders,
        mint_on_purchase: params.mint_on_purchase,
    }
}

pub fn setup_dao<ObjBuilder>(builder: ObjBuilder, params: DaoParams) -> DaoSetup<ObjBuilder>
where
    ObjBuilder: 'static + Copy + Fn() -> DaoContract,
{
    let mut b_mock = BlockchainStateWrapper::new();
    let owner = b_mock.create_user_account(&rust_biguint!(USER_EGLD));
    let alice = b_mock.create_user_account(&rust_biguint!(USER_EGLD));
    let bob = b_mock.create_user_account(&rust_biguint!(USER_EGLD));
    let carol = b_mock.create_user_account(&rust_biguint!(USER_EGLD));
    let sc_wrapper =
        b_mock.create_sc_account(&rust_biguint!(0), Some(&owner), builder, WASM_PATH);

    b_mock
        .execute_tx(&owner, &sc_wrapper, &rust_biguint!(0), |sc| {
            sc.init(
                governance_config(&params),
                managed_biguint!(params.initial_supply),
                managed_biguint!(params.reserve_supply),
            );
        })
        .assert_ok();

    DaoSetup {
        b_mock,
        owner,
        alice,
        bob,
        carol,
        sc_wrapper,
    }
}

impl<ObjBuilder> DaoSetup<ObjBuilder>
where
    ObjBuilder: 'static + Copy + Fn() -> DaoContract,
{
    /// Hands out vested membership from the deployer.
    pub fn give_membership(&mut self, to: &Address, amount: u64) {
        let to = to.clone();
        self.b_mock
            .execute_tx(&self.owner, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.transfer(managed_address!(&to), 0, managed_biguint!(amount));
            })
            .assert_ok();
    }

    pub fn purchase(&mut self, buyer: &Address, amount: u64, price: u64) -> TxResult {
        self.b_mock.execute_tx(
            buyer,
            &self.sc_wrapper,
            &rust_biguint!(amount * price),
            |sc| {
                sc.purchase(managed_biguint!(amount));
            },
        )
    }

    pub fn create_signal(&mut self, proposer: &Address) -> u64 {
        let mut proposal_id = 0u64;
        self.b_mock
            .execute_tx(proposer, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                proposal_id =
                    sc.create_proposal(managed_buffer!(b"signal"), ProposalAction::Signal);
            })
            .assert_ok();
        proposal_id
    }

    pub fn create_egld_transfer(&mut self, proposer: &Address, amount: u64, recipient: &Address) -> u64 {
        let recipient = recipient.clone();
        let mut proposal_id = 0u64;
        self.b_mock
            .execute_tx(proposer, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                proposal_id = sc.create_proposal(
                    managed_buffer!(b"grant"),
                    ProposalAction::TransferFunds {
                        token: EgldOrEsdtTokenIdentifier::egld(),
                        amount: managed_biguint!(amount),
                        recipient: managed_address!(&recipient),
                    },
                );
            })
            .assert_ok();
        proposal_id
    }

    pub fn add_support(&mut self, supporter: &Address, proposal_id: u64, amount: u64) -> TxResult {
        self.b_mock
            .execute_tx(supporter, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.add_support(proposal_id, managed_biguint!(amount));
            })
    }

    pub fn claim(&mut self, holder: &Address, proposal_id: u64) -> TxResult {
        self.b_mock
            .execute_tx(holder, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.claim_voting_tokens(proposal_id);
            })
    }

    pub fn send(&mut self, from: &Address, to: &Address, asset_id: u64, amount: u64) -> TxResult {
        let to = to.clone();
        self.b_mock
            .execute_tx(from, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.transfer(managed_address!(&to), asset_id, managed_biguint!(amount));
            })
    }

    pub fn resolve(&mut self, proposal_id: u64) -> TxResult {
        self.b_mock
            .execute_tx(&self.alice, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.resolve(proposal_id);
            })
    }

    pub fn execute(&mut self, proposal_id: u64) -> TxResult {
        self.b_mock
            .execute_tx(&self.carol, &self.sc_wrapper, &rust_biguint!(0), |sc| {
                sc.execute(proposal_id);
            })
    }

    pub fn election_info(&mut self, proposal_id: u64) -> ElectionInfo {
        let mut info = ElectionInfo {
            voting_asset: 0,
            yes_sink: Address::zero(),
            no_sink: Address::zero(),
        };
        self.b_mock
            .execute_query(&self.sc_wrapper, |sc| {
                let proposal = sc.proposals(proposal_id).get();
                assert!(proposal.election_triggered);
                info.voting_asset = proposal.voting_asset;
                info.yes_sink = proposal.yes_sink.to_address();
                info.no_sink = proposal.no_sink.to_address();
            })
            .assert_ok();
        info
    }

    pub fn set_block(&mut self, height: u64) {
        self.b_mock.set_block_nonce(height);
    }
}
