//! Message vectors for every contract facade, built through the public API.
//!
//! The expected JSON follows the Mirror v1 contract schema.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mirror_core::contracts::factory::AssetParams;
use mirror_core::contracts::gov::{NewPoll, PollExecuteMsg};
use mirror_core::{
    parse, AccAddress, Coin, ContractAddresses, Mirror, MirrorError, OrderBy, Uint128,
};
use serde_json::{json, Value};

const GOV: &str = "terra1qyqszqgpqyqszqgpqyqszqgpqyqszqgp5hm70u";
const MIR: &str = "terra1qgpqyqszqgpqyqszqgpqyqszqgpqyqsz9namy2";
const STAKING: &str = "terra1qvpsxqcrqvpsxqcrqvpsxqcrqvpsxqcryru6wt";
const ORACLE: &str = "terra1qszqgpqyqszqgpqyqszqgpqyqszqgpqyynmlfh";
const ASSET: &str = "terra1qcrqvpsxqcrqvpsxqcrqvpsxqcrqvpsx58umgq";
const LP: &str = "terra1qurswpc8qurswpc8qurswpc8qurswpc84ha6zp";
const MINT: &str = "terra1pqyqszqgpqyqszqgpqyqszqgpqyqszqg600wxc";
const FACTORY: &str = "terra1pyysjzgfpyysjzgfpyysjzgfpyysjzgfmlw0ve";

fn addr(raw: &str) -> AccAddress {
    AccAddress::new(raw).unwrap()
}

fn mirror() -> Mirror {
    Mirror::new(ContractAddresses {
        gov: Some(addr(GOV)),
        mirror_token: Some(addr(MIR)),
        staking: Some(addr(STAKING)),
        oracle: Some(addr(ORACLE)),
        factory: Some(addr(FACTORY)),
        mint: Some(addr(MINT)),
    })
}

/// Decode the base64 hook of a CW20 `send`.
fn send_hook(msg: &Value) -> Value {
    let encoded = msg["send"]["msg"].as_str().unwrap();
    serde_json::from_slice(&STANDARD.decode(encoded).unwrap()).unwrap()
}

#[test]
fn test_stake_voting_tokens_vector() {
    let m = mirror();
    let amount = parse::uint128("1000000").unwrap();
    let msg = m.gov().unwrap().stake_voting_tokens(m.mirror_token().unwrap(), amount).unwrap();

    assert_eq!(msg.contract.as_str(), MIR);
    assert!(msg.coins.is_empty());
    assert_eq!(msg.msg["send"]["contract"], GOV);
    assert_eq!(msg.msg["send"]["amount"], "1000000");
    assert_eq!(
        msg.msg["send"]["msg"],
        "eyJzdGFrZV92b3RpbmdfdG9rZW5zIjp7fX0="
    );
}

#[test]
fn test_create_poll_hook_carries_execute_message() {
    let m = mirror();
    let poll = NewPoll {
        title: "Register mAAPL".into(),
        description: "Whitelist a new asset".into(),
        link: Some("https://example.com".into()),
        execute_msg: Some(PollExecuteMsg::new(addr(ASSET), r#"{"foo":"bar"}"#)),
    };
    let msg = m
        .gov()
        .unwrap()
        .create_poll(m.mirror_token().unwrap(), Uint128(100), poll)
        .unwrap();

    assert_eq!(
        send_hook(&msg.msg),
        json!({
            "create_poll": {
                "title": "Register mAAPL",
                "description": "Whitelist a new asset",
                "link": "https://example.com",
                "execute_msg": { "contract": ASSET, "msg": "eyJmb28iOiJiYXIifQ==" }
            }
        })
    );
}

#[test]
fn test_staking_bond_is_sent_from_lp_token() {
    let m = mirror();
    let msg = m
        .staking()
        .unwrap()
        .bond(&addr(LP), &addr(ASSET), Uint128(5))
        .unwrap();

    assert_eq!(msg.contract.as_str(), LP);
    assert_eq!(msg.msg["send"]["contract"], STAKING);
    assert_eq!(send_hook(&msg.msg), json!({ "bond": { "asset_token": ASSET } }));
}

#[test]
fn test_staking_withdraw_all_pools() {
    let msg = mirror().staking().unwrap().withdraw(None).unwrap();
    assert_eq!(msg.msg, json!({ "withdraw": {} }));
}

#[test]
fn test_oracle_messages() {
    let oracle = mirror().oracle().unwrap();

    let feed = oracle
        .feed_price(&[(addr(ASSET), parse::dec("152.37").unwrap())])
        .unwrap();
    assert_eq!(feed.contract.as_str(), ORACLE);
    assert_eq!(feed.msg, json!({ "feed_price": { "prices": [[ASSET, "152.37"]] } }));

    let prices = oracle.get_prices(None, Some(10), Some(OrderBy::Desc)).unwrap();
    assert_eq!(prices.msg, json!({ "prices": { "limit": 10, "order_by": "desc" } }));
}

#[test]
fn test_create_poll_hook_encodes_non_json_message_verbatim() {
    let m = mirror();
    let poll = NewPoll {
        title: "t".into(),
        description: "d".into(),
        link: None,
        execute_msg: Some(PollExecuteMsg::new(addr(ASSET), "hello")),
    };
    let msg = m
        .gov()
        .unwrap()
        .create_poll(m.mirror_token().unwrap(), Uint128(1), poll)
        .unwrap();

    let hook = send_hook(&msg.msg);
    assert_eq!(hook["create_poll"]["execute_msg"]["msg"], "aGVsbG8=");
}

#[test]
fn test_factory_messages() {
    let factory = mirror().factory().unwrap();

    let weight = factory.update_weight(&addr(ASSET), 300).unwrap();
    assert_eq!(weight.contract.as_str(), FACTORY);
    assert_eq!(
        weight.msg,
        json!({ "update_weight": { "asset_token": ASSET, "weight": 300 } })
    );

    let params = AssetParams {
        auction_discount: parse::dec("0.2").unwrap(),
        min_collateral_ratio: parse::dec("1.5").unwrap(),
        weight: Some(100),
        mint_period: None,
    };
    let whitelist = factory
        .whitelist("Mirror Apple", "mAAPL", &addr(ORACLE), &params)
        .unwrap();
    assert_eq!(
        whitelist.msg["whitelist"]["params"],
        json!({ "auction_discount": "0.2", "min_collateral_ratio": "1.5", "weight": 100 })
    );

    let pass = factory.pass_command(&addr(MINT), r#"{"foo":"bar"}"#).unwrap();
    assert_eq!(
        pass.msg,
        json!({ "pass_command": { "contract_addr": MINT, "msg": "eyJmb28iOiJiYXIifQ==" } })
    );

    let migrate = factory
        .migrate_asset("Mirror Apple", "mAAPL", &addr(ASSET), parse::dec("152.5").unwrap())
        .unwrap();
    assert_eq!(migrate.msg["migrate_asset"]["end_price"], "152.5");

    let info = factory.get_distribution_info().unwrap();
    assert_eq!(info.msg, json!({ "distribution_info": {} }));
}

#[test]
fn test_mint_open_position_with_native_collateral() {
    let mint = mirror().mint().unwrap();
    let collateral = parse::asset("1000000uusd").unwrap();
    let asset_info = parse::asset_info(ASSET).unwrap();
    let msg = mint
        .open_position(&collateral, &asset_info, parse::dec("2").unwrap())
        .unwrap();

    assert_eq!(msg.contract.as_str(), MINT);
    assert_eq!(msg.coins, vec![Coin::new(1_000_000, "uusd")]);
    assert_eq!(
        msg.msg,
        json!({
            "open_position": {
                "collateral": {
                    "info": { "native_token": { "denom": "uusd" } },
                    "amount": "1000000"
                },
                "asset_info": { "token": { "contract_addr": ASSET } },
                "collateral_ratio": "2"
            }
        })
    );
}

#[test]
fn test_mint_open_position_with_token_collateral() {
    let mint = mirror().mint().unwrap();
    let collateral = parse::asset(&format!("500{}", LP)).unwrap();
    let asset_info = parse::asset_info(ASSET).unwrap();
    let msg = mint
        .open_position(&collateral, &asset_info, parse::dec("1.5").unwrap())
        .unwrap();

    assert_eq!(msg.contract.as_str(), LP);
    assert!(msg.coins.is_empty());
    assert_eq!(msg.msg["send"]["contract"], MINT);
    assert_eq!(msg.msg["send"]["amount"], "500");
    assert_eq!(
        send_hook(&msg.msg),
        json!({
            "open_position": {
                "asset_info": { "token": { "contract_addr": ASSET } },
                "collateral_ratio": "1.5"
            }
        })
    );
}

#[test]
fn test_mint_burn_and_position_query() {
    let mint = mirror().mint().unwrap();
    let asset = parse::asset(&format!("10{}", ASSET)).unwrap();

    let burn = mint.burn(Uint128(4), &asset).unwrap();
    assert_eq!(burn.contract.as_str(), ASSET);
    assert_eq!(send_hook(&burn.msg), json!({ "burn": { "position_idx": "4" } }));

    let minted = mint.mint(Uint128(4), &asset).unwrap();
    assert_eq!(minted.msg["mint"]["asset"]["amount"], "10");

    let position = mint.get_position(Uint128(4)).unwrap();
    assert_eq!(position.msg, json!({ "position": { "position_idx": "4" } }));
}

#[test]
fn test_token_facade_needs_no_configuration() {
    let token = Mirror::default().token(addr(MIR));
    let info = token.get_token_info().unwrap();
    assert_eq!(info.contract.as_str(), MIR);
    assert_eq!(info.msg, json!({ "token_info": {} }));
}

#[test]
fn test_unconfigured_facades_fail() {
    let m = Mirror::default();
    assert_eq!(m.staking().unwrap_err(), MirrorError::MissingContract("staking"));
    assert_eq!(m.oracle().unwrap_err(), MirrorError::MissingContract("oracle"));
    assert_eq!(m.factory().unwrap_err(), MirrorError::MissingContract("factory"));
    assert_eq!(m.mint().unwrap_err(), MirrorError::MissingContract("mint"));
}
