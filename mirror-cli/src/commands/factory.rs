//! `mirrorcli factory` commands.

use mirror_core::contracts::factory::AssetParams;
use mirror_core::parse;

use super::CommandTable;
use crate::menu::{create_exec_menu, create_query_menu, MenuError};

pub fn register(table: &mut CommandTable) -> Result<(), MenuError> {
    let mut exec = create_exec_menu("factory", "Mirror Factory contract functions");

    exec.command("update-config")
        .description("Update Mirror Factory config")
        .option("--owner <AccAddress>", "New owner address")
        .option("--token-code-id <int>", "New code ID for mAsset token contracts")
        .action(|args, mirror| {
            let owner = parse::optional(args.get("owner"), parse::acc_address)?;
            let token_code_id = parse::optional(args.get("token-code-id"), parse::int)?;
            Ok(mirror.factory()?.update_config(owner.as_ref(), token_code_id)?)
        })?;

    exec.command("update-weight <asset-token> <weight>")
        .description("Update the MIR reward weight of an mAsset")
        .describe_arg("asset-token", "(AccAddress) mAsset token")
        .describe_arg("weight", "(int) new reward weight")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            let weight = parse::int(args.required("weight")?)?;
            Ok(mirror.factory()?.update_weight(&asset_token, weight)?)
        })?;

    exec.command("whitelist")
        .description("Whitelist a new mAsset")
        .required_option("--name <string>", "*Name of the asset")
        .required_option("--symbol <string>", "*Token symbol")
        .required_option("--oracle-feeder <AccAddress>", "*Price feeder for the asset")
        .required_option("--auction-discount <dec>", "*Liquidation auction discount")
        .required_option("--min-collateral-ratio <dec>", "*Minimum collateral ratio")
        .option("--weight <int>", "MIR reward weight")
        .option("--mint-period <int>", "Pre-IPO mint period (sec)")
        .action(|args, mirror| {
            let oracle_feeder = parse::acc_address(args.required("oracle-feeder")?)?;
            let params = AssetParams {
                auction_discount: parse::dec(args.required("auction-discount")?)?,
                min_collateral_ratio: parse::dec(args.required("min-collateral-ratio")?)?,
                weight: parse::optional(args.get("weight"), parse::int)?,
                mint_period: parse::optional(args.get("mint-period"), parse::int)?,
            };
            Ok(mirror.factory()?.whitelist(
                args.required("name")?,
                args.required("symbol")?,
                &oracle_feeder,
                &params,
            )?)
        })?;

    exec.command("pass-command <contract> <msg>")
        .description("Execute a message as the factory owner")
        .describe_arg("contract", "(AccAddress) contract to execute on")
        .describe_arg("msg", "(string) message, base64-encoded as given")
        .action(|args, mirror| {
            let contract = parse::acc_address(args.required("contract")?)?;
            Ok(mirror.factory()?.pass_command(&contract, args.required("msg")?)?)
        })?;

    exec.command("distribute")
        .description("Distribute MIR rewards to the staking pools")
        .action(|_, mirror| Ok(mirror.factory()?.distribute()?))?;

    exec.command("migrate-asset <from-token>")
        .description("Migrate an mAsset to a new token")
        .describe_arg("from-token", "(AccAddress) mAsset being replaced")
        .required_option("--name <string>", "*Name of the new asset")
        .required_option("--symbol <string>", "*Symbol of the new asset")
        .required_option("--end-price <dec>", "*Final oracle price of the old asset")
        .action(|args, mirror| {
            let from_token = parse::acc_address(args.required("from-token")?)?;
            let end_price = parse::dec(args.required("end-price")?)?;
            Ok(mirror.factory()?.migrate_asset(
                args.required("name")?,
                args.required("symbol")?,
                &from_token,
                end_price,
            )?)
        })?;

    let mut query = create_query_menu("factory", "Mirror Factory contract queries");

    query
        .command("config")
        .description("Query Mirror Factory contract config")
        .action(|_, mirror| Ok(mirror.factory()?.get_config()?))?;

    query
        .command("distribution-info")
        .description("Query MIR reward weights")
        .action(|_, mirror| Ok(mirror.factory()?.get_distribution_info()?))?;

    table.register(exec, query)
}
