//! Mirror Oracle contract: price feeds for mirrored assets.

use serde::Serialize;

use crate::error::Result;
use crate::msg::{ExecuteMsg, QueryRequest};
use crate::types::{AccAddress, Decimal, OrderBy};

#[derive(Debug, Clone)]
pub struct Oracle {
    contract: AccAddress,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Execute<'a> {
    UpdateConfig {
        #[serde(skip_serializing_if = "Option::is_none")]
        owner: Option<&'a AccAddress>,
    },
    RegisterAsset {
        asset_token: &'a AccAddress,
        feeder: &'a AccAddress,
    },
    FeedPrice {
        prices: &'a [(AccAddress, Decimal)],
    },
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Query<'a> {
    Config {},
    Feeder {
        asset_token: &'a AccAddress,
    },
    Price {
        base_asset: &'a str,
        quote_asset: &'a str,
    },
    Prices {
        #[serde(skip_serializing_if = "Option::is_none")]
        start_after: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        order_by: Option<OrderBy>,
    },
}

impl Oracle {
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

    pub fn update_config(&self, owner: Option<&AccAddress>) -> Result<ExecuteMsg> {
        self.execute(Execute::UpdateConfig { owner })
    }

    pub fn register_asset(&self, asset_token: &AccAddress, feeder: &AccAddress) -> Result<ExecuteMsg> {
        self.execute(Execute::RegisterAsset {
            asset_token,
            feeder,
        })
    }

    /// Feed `(asset, price)` pairs; only the registered feeder may call this.
    pub fn feed_price(&self, prices: &[(AccAddress, Decimal)]) -> Result<ExecuteMsg> {
        self.execute(Execute::FeedPrice { prices })
    }

    pub fn get_config(&self) -> Result<QueryRequest> {
        self.query(Query::Config {})
    }

    pub fn get_feeder(&self, asset_token: &AccAddress) -> Result<QueryRequest> {
        self.query(Query::Feeder { asset_token })
    }

    pub fn get_price(&self, base_asset: &str, quote_asset: &str) -> Result<QueryRequest> {
        self.query(Query::Price {
            base_asset,
            quote_asset,
        })
    }

    pub fn get_prices(
        &self,
        start_after: Option<&str>,
        limit: Option<u32>,
        order_by: Option<OrderBy>,
    ) -> Result<QueryRequest> {
        self.query(Query::Prices {
            start_after,
            limit,
            order_by,
        })
    }
}
