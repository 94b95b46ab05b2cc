//! Mirror Mint contract: collateralized debt positions for mAssets.
//!
//! Collateral can be a native coin or a CW20 token. Native collateral is
//! attached to the call as coins; token collateral goes through a CW20
//! `send` to the mint contract with the matching receive hook.

use serde::Serialize;
use serde_json::json;

use super::cw20_send;
use crate::error::{MirrorError, Result};
use crate::msg::{ExecuteMsg, QueryRequest};
use crate::types::{AccAddress, Asset, AssetInfo, Coin, Decimal, OrderBy, Uint128};

#[derive(Debug, Clone)]
pub struct Mint {
    contract: AccAddress,
}

/// Fields of `update_config`; `None` leaves the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MintConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<AccAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle: Option<AccAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector: Option<AccAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_code_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_fee_rate: Option<Decimal>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Execute<'a> {
    UpdateConfig(&'a MintConfigUpdate),
    UpdateAsset {
        asset_token: &'a AccAddress,
        #[serde(skip_serializing_if = "Option::is_none")]
        auction_discount: Option<Decimal>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_collateral_ratio: Option<Decimal>,
    },
    RegisterAsset {
        asset_token: &'a AccAddress,
        auction_discount: Decimal,
        min_collateral_ratio: Decimal,
    },
    OpenPosition {
        collateral: &'a Asset,
        asset_info: &'a AssetInfo,
        collateral_ratio: Decimal,
    },
    Deposit {
        position_idx: Uint128,
        collateral: &'a Asset,
    },
    Withdraw {
        position_idx: Uint128,
        collateral: &'a Asset,
    },
    Mint {
        position_idx: Uint128,
        asset: &'a Asset,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Query<'a> {
    Config {},
    AssetConfig {
        asset_token: &'a AccAddress,
    },
    Position {
        position_idx: Uint128,
    },
    Positions {
        #[serde(skip_serializing_if = "Option::is_none")]
        owner_addr: Option<&'a AccAddress>,
        #[serde(skip_serializing_if = "Option::is_none")]
        asset_token: Option<&'a AccAddress>,
        #[serde(skip_serializing_if = "Option::is_none")]
        start_after: Option<Uint128>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        order_by: Option<OrderBy>,
    },
}

impl Mint {
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

    /// Execute with native `collateral` attached as coins.
    fn execute_with(&self, msg: Execute<'_>, collateral: &Asset) -> Result<ExecuteMsg> {
        let mut call = self.execute(msg)?;
        if let AssetInfo::NativeToken { denom } = &collateral.info {
            call.coins.push(Coin::new(collateral.amount.u128(), denom.clone()));
        }
        Ok(call)
    }

    pub fn update_config(&self, update: &MintConfigUpdate) -> Result<ExecuteMsg> {
        self.execute(Execute::UpdateConfig(update))
    }

    pub fn update_asset(
        &self,
        asset_token: &AccAddress,
        auction_discount: Option<Decimal>,
        min_collateral_ratio: Option<Decimal>,
    ) -> Result<ExecuteMsg> {
        self.execute(Execute::UpdateAsset {
            asset_token,
            auction_discount,
            min_collateral_ratio,
        })
    }

    pub fn register_asset(
        &self,
        asset_token: &AccAddress,
        auction_discount: Decimal,
        min_collateral_ratio: Decimal,
    ) -> Result<ExecuteMsg> {
        self.execute(Execute::RegisterAsset {
            asset_token,
            auction_discount,
            min_collateral_ratio,
        })
    }

    /// Open a position minting `asset_info` against `collateral`.
    pub fn open_position(
        &self,
        collateral: &Asset,
        asset_info: &AssetInfo,
        collateral_ratio: Decimal,
    ) -> Result<ExecuteMsg> {
        match &collateral.info {
            AssetInfo::Token { contract_addr } => cw20_send(
                contract_addr,
                &self.contract,
                collateral.amount,
                &json!({
                    "open_position": {
                        "asset_info": asset_info,
                        "collateral_ratio": collateral_ratio,
                    }
                }),
            ),
            AssetInfo::NativeToken { .. } => self.execute_with(
                Execute::OpenPosition {
                    collateral,
                    asset_info,
                    collateral_ratio,
                },
                collateral,
            ),
        }
    }

    pub fn deposit(&self, position_idx: Uint128, collateral: &Asset) -> Result<ExecuteMsg> {
        match &collateral.info {
            AssetInfo::Token { contract_addr } => cw20_send(
                contract_addr,
                &self.contract,
                collateral.amount,
                &json!({ "deposit": { "position_idx": position_idx } }),
            ),
            AssetInfo::NativeToken { .. } => self.execute_with(
                Execute::Deposit {
                    position_idx,
                    collateral,
                },
                collateral,
            ),
        }
    }

    pub fn withdraw(&self, position_idx: Uint128, collateral: &Asset) -> Result<ExecuteMsg> {
        self.execute(Execute::Withdraw {
            position_idx,
            collateral,
        })
    }

    pub fn mint(&self, position_idx: Uint128, asset: &Asset) -> Result<ExecuteMsg> {
        self.execute(Execute::Mint {
            position_idx,
            asset,
        })
    }

    /// Burn minted mAssets to pay back a position's debt.
    pub fn burn(&self, position_idx: Uint128, asset: &Asset) -> Result<ExecuteMsg> {
        self.send_hook(asset, json!({ "burn": { "position_idx": position_idx } }))
    }

    /// Liquidate an undercollateralized position by paying in its mAsset.
    pub fn auction(&self, position_idx: Uint128, asset: &Asset) -> Result<ExecuteMsg> {
        self.send_hook(asset, json!({ "auction": { "position_idx": position_idx } }))
    }

    fn send_hook(&self, asset: &Asset, hook: serde_json::Value) -> Result<ExecuteMsg> {
        match &asset.info {
            AssetInfo::Token { contract_addr } => {
                cw20_send(contract_addr, &self.contract, asset.amount, &hook)
            }
            AssetInfo::NativeToken { .. } => Err(MirrorError::InvalidAsset(asset.to_string())),
        }
    }

    pub fn get_config(&self) -> Result<QueryRequest> {
        self.query(Query::Config {})
    }

    pub fn get_asset_config(&self, asset_token: &AccAddress) -> Result<QueryRequest> {
        self.query(Query::AssetConfig { asset_token })
    }

    pub fn get_position(&self, position_idx: Uint128) -> Result<QueryRequest> {
        self.query(Query::Position { position_idx })
    }

    pub fn get_positions(
        &self,
        owner_addr: Option<&AccAddress>,
        asset_token: Option<&AccAddress>,
        start_after: Option<Uint128>,
        limit: Option<u32>,
        order_by: Option<OrderBy>,
    ) -> Result<QueryRequest> {
        self.query(Query::Positions {
            owner_addr,
            asset_token,
            start_after,
            limit,
            order_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::to_binary;

    const MINT: &str = "terra1pqyqszqgpqyqszqgpqyqszqgpqyqszqg600wxc";
    const ASSET: &str = "terra1qcrqvpsxqcrqvpsxqcrqvpsxqcrqvpsx58umgq";

    fn mint() -> Mint {
        Mint::new(AccAddress::new(MINT).unwrap())
    }

    #[test]
    fn test_native_deposit_attaches_coins() {
        let collateral: Asset = "500uusd".parse().unwrap();
        let msg = mint().deposit(Uint128(3), &collateral).unwrap();

        assert_eq!(msg.contract.as_str(), MINT);
        assert_eq!(msg.coins, vec![Coin::new(500, "uusd")]);
        assert_eq!(
            msg.msg,
            json!({
                "deposit": {
                    "position_idx": "3",
                    "collateral": { "info": { "native_token": { "denom": "uusd" } }, "amount": "500" }
                }
            })
        );
    }

    #[test]
    fn test_token_deposit_is_a_cw20_send() {
        let collateral: Asset = format!("7{}", ASSET).parse().unwrap();
        let msg = mint().deposit(Uint128(3), &collateral).unwrap();

        assert_eq!(msg.contract.as_str(), ASSET);
        assert!(msg.coins.is_empty());
        let hook = to_binary(&json!({ "deposit": { "position_idx": "3" } })).unwrap();
        assert_eq!(
            msg.msg,
            json!({ "send": { "contract": MINT, "amount": "7", "msg": hook } })
        );
    }

    #[test]
    fn test_burn_requires_token_asset() {
        let native: Asset = "1uusd".parse().unwrap();
        assert_eq!(
            mint().burn(Uint128(1), &native),
            Err(MirrorError::InvalidAsset("1uusd".into()))
        );
    }

    #[test]
    fn test_positions_query_omits_absent_filters() {
        let query = mint()
            .get_positions(None, None, Some(Uint128(10)), Some(5), None)
            .unwrap();
        assert_eq!(query.msg, json!({ "positions": { "start_after": "10", "limit": 5 } }));
    }
}
