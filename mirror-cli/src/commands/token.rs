//! `mirrorcli token` commands for any CW20 token.

use mirror_core::parse;

use super::CommandTable;
use crate::menu::{create_exec_menu, create_query_menu, MenuError};

pub fn register(table: &mut CommandTable) -> Result<(), MenuError> {
    let mut exec = create_exec_menu("token", "CW20 token functions");

    exec.command("transfer <token> <recipient> <amount>")
        .description("Transfer tokens")
        .describe_arg("token", "(AccAddress) token contract")
        .describe_arg("recipient", "(AccAddress) receiving account")
        .describe_arg("amount", "(Uint128) amount to transfer")
        .action(|args, mirror| {
            let token = parse::acc_address(args.required("token")?)?;
            let recipient = parse::acc_address(args.required("recipient")?)?;
            let amount = parse::uint128(args.required("amount")?)?;
            Ok(mirror.token(token).transfer(&recipient, amount)?)
        })?;

    exec.command("burn <token> <amount>")
        .description("Burn tokens")
        .describe_arg("token", "(AccAddress) token contract")
        .describe_arg("amount", "(Uint128) amount to burn")
        .action(|args, mirror| {
            let token = parse::acc_address(args.required("token")?)?;
            let amount = parse::uint128(args.required("amount")?)?;
            Ok(mirror.token(token).burn(amount)?)
        })?;

    exec.command("send <token> <contract> <amount>")
        .description("Send tokens to a contract and invoke its receive hook")
        .describe_arg("token", "(AccAddress) token contract")
        .describe_arg("contract", "(AccAddress) receiving contract")
        .describe_arg("amount", "(Uint128) amount to send")
        .required_option("--msg <json>", "*hook message passed to the receiving contract")
        .action(|args, mirror| {
            let token = parse::acc_address(args.required("token")?)?;
            let contract = parse::acc_address(args.required("contract")?)?;
            let amount = parse::uint128(args.required("amount")?)?;
            let hook = parse::json(args.required("msg")?)?;
            Ok(mirror.token(token).send(&contract, amount, &hook)?)
        })?;

    let mut query = create_query_menu("token", "CW20 token queries");

    query
        .command("balance <token> <address>")
        .description("Query an account's token balance")
        .describe_arg("token", "(AccAddress) token contract")
        .describe_arg("address", "(AccAddress) account to query")
        .action(|args, mirror| {
            let token = parse::acc_address(args.required("token")?)?;
            let address = parse::acc_address(args.required("address")?)?;
            Ok(mirror.token(token).get_balance(&address)?)
        })?;

    query
        .command("info <token>")
        .description("Query token metadata")
        .describe_arg("token", "(AccAddress) token contract")
        .action(|args, mirror| {
            let token = parse::acc_address(args.required("token")?)?;
            Ok(mirror.token(token).get_token_info()?)
        })?;

    table.register(exec, query)
}
