//! `mirrorcli oracle` commands.

use mirror_core::{parse, OrderBy};

use super::CommandTable;
use crate::menu::{create_exec_menu, create_query_menu, MenuError};

pub fn register(table: &mut CommandTable) -> Result<(), MenuError> {
    let mut exec = create_exec_menu("oracle", "Mirror Oracle contract functions");

    exec.command("update-config")
        .description("Update Mirror Oracle config")
        .option("--owner <AccAddress>", "New owner address")
        .action(|args, mirror| {
            let owner = parse::optional(args.get("owner"), parse::acc_address)?;
            Ok(mirror.oracle()?.update_config(owner.as_ref())?)
        })?;

    exec.command("register-asset <asset-token> <feeder>")
        .description("Register an asset and its price feeder")
        .describe_arg("asset-token", "(AccAddress) asset token")
        .describe_arg("feeder", "(AccAddress) account allowed to feed prices")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            let feeder = parse::acc_address(args.required("feeder")?)?;
            Ok(mirror.oracle()?.register_asset(&asset_token, &feeder)?)
        })?;

    exec.command("feed-price <asset-token> <price>")
        .description("Feed a new price for an asset")
        .describe_arg("asset-token", "(AccAddress) asset token")
        .describe_arg("price", "(dec) price in the base denomination")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            let price = parse::dec(args.required("price")?)?;
            Ok(mirror.oracle()?.feed_price(&[(asset_token, price)])?)
        })?;

    let mut query = create_query_menu("oracle", "Mirror Oracle contract queries");

    query
        .command("config")
        .description("Query Mirror Oracle contract config")
        .action(|_, mirror| Ok(mirror.oracle()?.get_config()?))?;

    query
        .command("feeder <asset-token>")
        .description("Query the feeder of an asset")
        .describe_arg("asset-token", "(AccAddress) asset token")
        .action(|args, mirror| {
            let asset_token = parse::acc_address(args.required("asset-token")?)?;
            Ok(mirror.oracle()?.get_feeder(&asset_token)?)
        })?;

    query
        .command("price <base-asset> <quote-asset>")
        .description("Query the price of one asset in another")
        .describe_arg("base-asset", "(string) base asset token or denom")
        .describe_arg("quote-asset", "(string) quote asset token or denom")
        .action(|args, mirror| {
            Ok(mirror
                .oracle()?
                .get_price(args.required("base-asset")?, args.required("quote-asset")?)?)
        })?;

    query
        .command("prices")
        .description("Query all prices")
        .option("--start-after <string>", "asset token to start query from")
        .option("--limit <int>", "max results to return")
        .option("--order-by <string>", "result order ('asc', 'desc')")
        .action(|args, mirror| {
            let limit = parse::optional(args.get("limit"), parse::int)?;
            let order_by = parse::optional(args.get("order-by"), str::parse::<OrderBy>)?;
            Ok(mirror.oracle()?.get_prices(args.get("start-after"), limit, order_by)?)
        })?;

    table.register(exec, query)
}
