//! Contract-interaction surface.
//!
//! [`Mirror`] is the handle every command handler receives. It hands out one
//! facade per contract; each facade method maps 1:1 to a CLI sub-command and
//! returns a call description without performing it.

pub mod factory;
pub mod gov;
pub mod mint;
pub mod oracle;
pub mod staking;
pub mod token;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MirrorError, Result};
use crate::msg::{to_binary, ExecuteMsg};
use crate::types::{AccAddress, Uint128};

pub use factory::Factory;
pub use gov::Gov;
pub use mint::Mint;
pub use oracle::Oracle;
pub use staking::Staking;
pub use token::Token;

/// Well-known contract addresses, as loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractAddresses {
    #[serde(default)]
    pub gov: Option<AccAddress>,
    #[serde(default)]
    pub mirror_token: Option<AccAddress>,
    #[serde(default)]
    pub staking: Option<AccAddress>,
    #[serde(default)]
    pub oracle: Option<AccAddress>,
    #[serde(default)]
    pub factory: Option<AccAddress>,
    #[serde(default)]
    pub mint: Option<AccAddress>,
}

/// Resolved contract-interaction handle.
#[derive(Debug, Clone, Default)]
pub struct Mirror {
    addresses: ContractAddresses,
}

impl Mirror {
    pub fn new(addresses: ContractAddresses) -> Self {
        Self { addresses }
    }

    pub fn addresses(&self) -> &ContractAddresses {
        &self.addresses
    }

    /// Address of the MIR token contract.
    pub fn mirror_token(&self) -> Result<&AccAddress> {
        require(&self.addresses.mirror_token, "mirror_token")
    }

    pub fn gov(&self) -> Result<Gov> {
        require(&self.addresses.gov, "gov").map(|a| Gov::new(a.clone()))
    }

    pub fn staking(&self) -> Result<Staking> {
        require(&self.addresses.staking, "staking").map(|a| Staking::new(a.clone()))
    }

    pub fn oracle(&self) -> Result<Oracle> {
        require(&self.addresses.oracle, "oracle").map(|a| Oracle::new(a.clone()))
    }

    pub fn factory(&self) -> Result<Factory> {
        require(&self.addresses.factory, "factory").map(|a| Factory::new(a.clone()))
    }

    pub fn mint(&self) -> Result<Mint> {
        require(&self.addresses.mint, "mint").map(|a| Mint::new(a.clone()))
    }

    /// Facade for an arbitrary CW20 token.
    pub fn token(&self, address: AccAddress) -> Token {
        Token::new(address)
    }
}

fn require<'a>(addr: &'a Option<AccAddress>, name: &'static str) -> Result<&'a AccAddress> {
    addr.as_ref().ok_or(MirrorError::MissingContract(name))
}

/// CW20 `send`: move `amount` of `token` to `contract` and invoke its
/// receive hook with `hook`.
pub(crate) fn cw20_send(
    token: &AccAddress,
    contract: &AccAddress,
    amount: Uint128,
    hook: &Value,
) -> Result<ExecuteMsg> {
    #[derive(Serialize)]
    struct Send<'a> {
        contract: &'a AccAddress,
        amount: Uint128,
        msg: String,
    }
    #[derive(Serialize)]
    struct Wrapper<'a> {
        send: Send<'a>,
    }

    let msg = Wrapper {
        send: Send {
            contract,
            amount,
            msg: to_binary(hook)?,
        },
    };
    Ok(ExecuteMsg::new(token.clone(), serde_json::to_value(msg)?))
}
