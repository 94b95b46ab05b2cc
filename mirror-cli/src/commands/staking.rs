//! `mirrorcli staking` commands.

use mirror_core::parse;

use super::CommandTable;
use crate::menu::{create_exec_menu, create_query_menu, MenuError};

pub fn register(table: &mut CommandTable) -> Result<(), MenuError> {
    let mut exec = create_exec_menu("staking", "Mirror Staking contract functions");

    exec.command("update-config")
        .description("Update Mirror Staking config")
        .option("--owner <AccAddress>", "New owner address")
        .action(|args, mirror| {
            let owner = parse::optional(args.get("owner"), parse::acc_address)?;
            Ok(mirror.staking()?.update_config(owner.as_ref())?)
        })?;

    exec.command("register-asset <asset-token> <staking-token>")
        .description("Register a new staking pool")
        .describe_arg("asset-token", "(AccAddress) asset token of the pool")
        .describe_arg("staking-token", "(AccAddress) LP token staked in the pool")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            let staking_token = parse::acc_address(args.required("staking-token")?)?;
            Ok(mirror.staking()?.register_asset(&asset_token, &staking_token)?)
        })?;

    exec.command("bond <asset-token> <amount>")
        .description("Bond LP tokens to a staking pool")
        .describe_arg("asset-token", "(AccAddress) asset token of the pool")
        .describe_arg("amount", "(Uint128) amount of LP tokens to bond")
        .required_option("--lp-token <AccAddress>", "*LP token contract of the pool")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            let amount = parse::uint128(args.required("amount")?)?;
            let lp_token = parse::acc_address(args.required("lp-token")?)?;
            Ok(mirror.staking()?.bond(&lp_token, &asset_token, amount)?)
        })?;

    exec.command("unbond <asset-token> <amount>")
        .description("Unbond LP tokens from a staking pool")
        .describe_arg("asset-token", "(AccAddress) asset token of the pool")
        .describe_arg("amount", "(Uint128) amount of LP tokens to unbond")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            let amount = parse::uint128(args.required("amount")?)?;
            Ok(mirror.staking()?.unbond(&asset_token, amount)?)
        })?;

    exec.command("withdraw [asset-token]")
        .description("Withdraw MIR rewards")
        .describe_arg("asset-token", "(AccAddress) pool to withdraw from; all pools if omitted")
        .action(|args, mirror| {
            let asset_token = parse::optional(args.get("asset-token"), parse::acc_address)?;
            Ok(mirror.staking()?.withdraw(asset_token.as_ref())?)
        })?;

    let mut query = create_query_menu("staking", "Mirror Staking contract queries");

    query
        .command("config")
        .description("Query Mirror Staking contract config")
        .action(|_, mirror| Ok(mirror.staking()?.get_config()?))?;

    query
        .command("pool-info <asset-token>")
        .description("Query staking pool info")
        .describe_arg("asset-token", "(AccAddress) asset token of the pool")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            Ok(mirror.staking()?.get_pool_info(&asset_token)?)
        })?;

    query
        .command("reward-info <staker>")
        .description("Query staker reward info")
        .describe_arg("staker", "(AccAddress) staker address to query")
        .option("--asset-token <AccAddress>", "restrict to one pool")
        .action(|args, mirror| {
            let staker = parse::acc_address(args.required("staker")?)?;
            let asset_token = parse::optional(args.get("asset-token"), parse::acc_address)?;
            Ok(mirror.staking()?.get_reward_info(&staker, asset_token.as_ref())?)
        })?;

    table.register(exec, query)
}
