//! `mirrorcli mint` commands.
//!
//! Assets are written as `<amount><denom>` for native coins (`1000000uusd`)
//! or `<amount><token address>` for CW20 tokens.

use mirror_core::contracts::mint::MintConfigUpdate;
use mirror_core::{parse, OrderBy};

use super::CommandTable;
use crate::menu::{create_exec_menu, create_query_menu, MenuError};

pub fn register(table: &mut CommandTable) -> Result<(), MenuError> {
    let mut exec = create_exec_menu("mint", "Mirror Mint contract functions");

    exec.command("update-config")
        .description("Update Mirror Mint config")
        .option("--owner <AccAddress>", "New owner address")
        .option("--oracle <AccAddress>", "New oracle contract")
        .option("--collector <AccAddress>", "New fee collector contract")
        .option("--token-code-id <int>", "New code ID for mAsset token contracts")
        .option("--protocol-fee-rate <dec>", "New protocol fee rate")
        .action(|args, mirror| {
            let update = MintConfigUpdate {
                owner: parse::optional(args.get("owner"), parse::acc_address)?,
                oracle: parse::optional(args.get("oracle"), parse::acc_address)?,
                collector: parse::optional(args.get("collector"), parse::acc_address)?,
                token_code_id: parse::optional(args.get("token-code-id"), parse::int)?,
                protocol_fee_rate: parse::optional(args.get("protocol-fee-rate"), parse::dec)?,
            };
            Ok(mirror.mint()?.update_config(&update)?)
        })?;

    exec.command("update-asset <asset-token>")
        .description("Update mint parameters of an mAsset")
        .describe_arg("asset-token", "(AccAddress) mAsset token")
        .option("--auction-discount <dec>", "New liquidation auction discount")
        .option("--min-collateral-ratio <dec>", "New minimum collateral ratio")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            let auction_discount = parse::optional(args.get("auction-discount"), parse::dec)?;
            let min_collateral_ratio =
                parse::optional(args.get("min-collateral-ratio"), parse::dec)?;
            Ok(mirror
                .mint()?
                .update_asset(&asset_token, auction_discount, min_collateral_ratio)?)
        })?;

    exec.command("register-asset <asset-token>")
        .description("Register an mAsset for minting")
        .describe_arg("asset-token", "(AccAddress) mAsset token")
        .required_option("--auction-discount <dec>", "*Liquidation auction discount")
        .required_option("--min-collateral-ratio <dec>", "*Minimum collateral ratio")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            let auction_discount = parse::dec(args.required("auction-discount")?)?;
            let min_collateral_ratio = parse::dec(args.required("min-collateral-ratio")?)?;
            Ok(mirror
                .mint()?
                .register_asset(&asset_token, auction_discount, min_collateral_ratio)?)
        })?;

    exec.command("open-position <collateral> <asset-info> <collateral-ratio>")
        .description("Open a new collateralized position")
        .describe_arg("collateral", "(Asset) collateral to lock, e.g. 1000000uusd")
        .describe_arg("asset-info", "(AccAddress) mAsset token to mint")
        .describe_arg("collateral-ratio", "(dec) collateral ratio to open at")
        .action(|args, mirror| {
            let collateral = parse::asset(args.required("collateral")?)?;
            let asset_info = parse::asset_info(args.required("asset-info")?)?;
            let ratio = parse::dec(args.required("collateral-ratio")?)?;
            Ok(mirror.mint()?.open_position(&collateral, &asset_info, ratio)?)
        })?;

    exec.command("deposit <position-idx> <collateral>")
        .description("Deposit collateral into a position")
        .describe_arg("position-idx", "(Uint128) position index")
        .describe_arg("collateral", "(Asset) collateral to deposit")
        .action(|args, mirror| {
            let position_idx = parse::uint128(args.required("position-idx")?)?;
            let collateral = parse::asset(args.required("collateral")?)?;
            Ok(mirror.mint()?.deposit(position_idx, &collateral)?)
        })?;

    exec.command("withdraw <position-idx> <collateral>")
        .description("Withdraw collateral from a position")
        .describe_arg("position-idx", "(Uint128) position index")
        .describe_arg("collateral", "(Asset) collateral to withdraw")
        .action(|args, mirror| {
            let position_idx = parse::uint128(args.required("position-idx")?)?;
            let collateral = parse::asset(args.required("collateral")?)?;
            Ok(mirror.mint()?.withdraw(position_idx, &collateral)?)
        })?;

    exec.command("mint <position-idx> <asset>")
        .description("Mint more mAssets against a position")
        .describe_arg("position-idx", "(Uint128) position index")
        .describe_arg("asset", "(Asset) mAsset amount to mint")
        .action(|args, mirror| {
            let position_idx = parse::uint128(args.required("position-idx")?)?;
            let asset = parse::asset(args.required("asset")?)?;
            Ok(mirror.mint()?.mint(position_idx, &asset)?)
        })?;

    exec.command("burn <position-idx> <asset>")
        .description("Burn mAssets to repay a position")
        .describe_arg("position-idx", "(Uint128) position index")
        .describe_arg("asset", "(Asset) mAsset amount to burn")
        .action(|args, mirror| {
            let position_idx = parse::uint128(args.required("position-idx")?)?;
            let asset = parse::asset(args.required("asset")?)?;
            Ok(mirror.mint()?.burn(position_idx, &asset)?)
        })?;

    exec.command("auction <position-idx> <asset>")
        .description("Liquidate an undercollateralized position")
        .describe_arg("position-idx", "(Uint128) position index")
        .describe_arg("asset", "(Asset) mAsset amount to pay in")
        .action(|args, mirror| {
            let position_idx = parse::uint128(args.required("position-idx")?)?;
            let asset = parse::asset(args.required("asset")?)?;
            Ok(mirror.mint()?.auction(position_idx, &asset)?)
        })?;

    let mut query = create_query_menu("mint", "Mirror Mint contract queries");

    query
        .command("config")
        .description("Query Mirror Mint contract config")
        .action(|_, mirror| Ok(mirror.mint()?.get_config()?))?;

    query
        .command("asset-config <asset-token>")
        .description("Query mint parameters of an mAsset")
        .describe_arg("asset-token", "(AccAddress) mAsset token")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            Ok(mirror.mint()?.get_asset_config(&asset_token)?)
        })?;

    query
        .command("position <position-idx>")
        .description("Query a position")
        .describe_arg("position-idx", "(Uint128) position index")
        .action(|args, mirror| {
            let position_idx = parse::uint128(args.required("position-idx")?)?;
            Ok(mirror.mint()?.get_position(position_idx)?)
        })?;

    query
        .command("positions")
        .description("Query positions")
        .option("--owner <AccAddress>", "only positions owned by this account")
        .option("--asset-token <AccAddress>", "only positions minting this mAsset")
        .option("--start-after <Uint128>", "position index to start after")
        .option("--limit <int>", "max results")
        .option("--order-by <string>", "'asc' or 'desc'")
        .action(|args, mirror| {
            let owner = parse::optional(args.get("owner"), parse::acc_address)?;
            let asset_token = parse::optional(args.get("asset-token"), parse::acc_address)?;
            let start_after = parse::optional(args.get("start-after"), parse::uint128)?;
            let limit = parse::optional(args.get("limit"), parse::int)?;
            let order_by = parse::optional(args.get("order-by"), str::parse::<OrderBy>)?;
            Ok(mirror.mint()?.get_positions(
                owner.as_ref(),
                asset_token.as_ref(),
                start_after,
                limit,
                order_by,
            )?)
        })?;

    table.register(exec, query)
}
