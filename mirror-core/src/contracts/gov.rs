//! Mirror Gov contract: polls, voting and MIR staking for voting power.

use serde::Serialize;
use serde_json::json;

use super::cw20_send;
use crate::error::Result;
use crate::msg::{encode_base64, ExecuteMsg, QueryRequest};
use crate::types::{AccAddress, Decimal, PollStatus, Uint128, VoteOption};

/// Gov contract facade.
#[derive(Debug, Clone)]
pub struct Gov {
    contract: AccAddress,
}

/// Fields of `update_config`; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GovConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<AccAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_delay: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_period: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_deposit: Option<Uint128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quorum: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_period: Option<u64>,
}

/// Message a passed poll executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollExecuteMsg {
    pub contract: AccAddress,
    /// Base64 of the raw message text.
    pub msg: String,
}

impl PollExecuteMsg {
    /// Wrap a raw message for `contract`; the text is base64-encoded verbatim.
    pub fn new(contract: AccAddress, raw_msg: &str) -> Self {
        Self {
            contract,
            msg: encode_base64(raw_msg),
        }
    }
}

/// Content of a new poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPoll {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execute_msg: Option<PollExecuteMsg>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Execute<'a> {
    UpdateConfig(&'a GovConfigUpdate),
    CastVote {
        poll_id: u64,
        vote: VoteOption,
        amount: Uint128,
    },
    ExecutePoll {
        poll_id: u64,
    },
    EndPoll {
        poll_id: u64,
    },
    ExpirePoll {
        poll_id: u64,
    },
    WithdrawVotingTokens {
        #[serde(skip_serializing_if = "Option::is_none")]
        amount: Option<Uint128>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Query<'a> {
    Config {},
    State {},
    Staker {
        address: &'a AccAddress,
    },
    Poll {
        poll_id: u64,
    },
    Polls {
        #[serde(skip_serializing_if = "Option::is_none")]
        filter: Option<PollStatus>,
        #[serde(skip_serializing_if = "Option::is_none")]
        start_after: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    },
    Voters {
        poll_id: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        start_after: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    },
}

impl Gov {
    pub fn new(contract: AccAddress) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> &AccAddress {
        &self.contract
    }

    fn execute(&self, msg: Execute<'_>) -> Result<ExecuteMsg> {
        Ok(ExecuteMsg::new(self.contract.clone(), serde_json::to_value(msg)?))
    }

    fn query(&self, msg: Query<'_>) -> Result<QueryRequest> {
        Ok(QueryRequest::new(self.contract.clone(), serde_json::to_value(msg)?))
    }

    pub fn update_config(&self, update: &GovConfigUpdate) -> Result<ExecuteMsg> {
        self.execute(Execute::UpdateConfig(update))
    }

    pub fn cast_vote(&self, poll_id: u64, vote: VoteOption, amount: Uint128) -> Result<ExecuteMsg> {
        self.execute(Execute::CastVote {
            poll_id,
            vote,
            amount,
        })
    }

    /// Create a poll by sending the deposit from `mirror_token` to gov.
    pub fn create_poll(
        &self,
        mirror_token: &AccAddress,
        deposit: Uint128,
        poll: NewPoll,
    ) -> Result<ExecuteMsg> {
        cw20_send(
            mirror_token,
            &self.contract,
            deposit,
            &json!({ "create_poll": poll }),
        )
    }

    pub fn execute_poll(&self, poll_id: u64) -> Result<ExecuteMsg> {
        self.execute(Execute::ExecutePoll { poll_id })
    }

    pub fn end_poll(&self, poll_id: u64) -> Result<ExecuteMsg> {
        self.execute(Execute::EndPoll { poll_id })
    }

    pub fn expire_poll(&self, poll_id: u64) -> Result<ExecuteMsg> {
        self.execute(Execute::ExpirePoll { poll_id })
    }

    /// Stake MIR for voting power by sending it to gov.
    pub fn stake_voting_tokens(&self, mirror_token: &AccAddress, amount: Uint128) -> Result<ExecuteMsg> {
        cw20_send(
            mirror_token,
            &self.contract,
            amount,
            &json!({ "stake_voting_tokens": {} }),
        )
    }

    /// Withdraw staked MIR; `None` withdraws everything.
    pub fn withdraw_voting_tokens(&self, amount: Option<Uint128>) -> Result<ExecuteMsg> {
        self.execute(Execute::WithdrawVotingTokens { amount })
    }

    pub fn get_config(&self) -> Result<QueryRequest> {
        self.query(Query::Config {})
    }

    pub fn get_state(&self) -> Result<QueryRequest> {
        self.query(Query::State {})
    }

    pub fn get_staker(&self, address: &AccAddress) -> Result<QueryRequest> {
        self.query(Query::Staker { address })
    }

    pub fn get_poll(&self, poll_id: u64) -> Result<QueryRequest> {
        self.query(Query::Poll { poll_id })
    }

    pub fn get_polls(
        &self,
        filter: Option<PollStatus>,
        start_after: Option<u64>,
        limit: Option<u32>,
    ) -> Result<QueryRequest> {
        self.query(Query::Polls {
            filter,
            start_after,
            limit,
        })
    }

    pub fn get_voters(
        &self,
        poll_id: u64,
        start_after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<QueryRequest> {
        self.query(Query::Voters {
            poll_id,
            start_after,
            limit,
        })
    }
}
