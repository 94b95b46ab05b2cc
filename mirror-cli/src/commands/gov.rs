//! `mirrorcli gov` commands.

use mirror_core::contracts::gov::{GovConfigUpdate, NewPoll, PollExecuteMsg};
use mirror_core::{parse, PollStatus, VoteOption};

use super::CommandTable;
use crate::menu::{create_exec_menu, create_query_menu, MenuError};

pub fn register(table: &mut CommandTable) -> Result<(), MenuError> {
    let mut exec = create_exec_menu("gov", "Mirror Gov contract functions");

    exec.command("update-config")
        .description("Update Mirror Gov config")
        .option("--owner <AccAddress>", "New owner address")
        .option("--effective-delay <int>", "New effective delay")
        .option("--expiration-period <int>", "New expiration period")
        .option("--proposal-deposit <Uint128>", "New min proposal deposit")
        .option("--quorum <dec>", "New quorum %")
        .option("--threshold <dec>", "New threshold %")
        .option("--voting-period <int>", "New voting period (sec)")
        .action(|args, mirror| {
            let update = GovConfigUpdate {
                owner: parse::optional(args.get("owner"), parse::acc_address)?,
                effective_delay: parse::optional(args.get("effective-delay"), parse::int)?,
                expiration_period: parse::optional(args.get("expiration-period"), parse::int)?,
                proposal_deposit: parse::optional(args.get("proposal-deposit"), parse::uint128)?,
                quorum: parse::optional(args.get("quorum"), parse::dec)?,
                threshold: parse::optional(args.get("threshold"), parse::dec)?,
                voting_period: parse::optional(args.get("voting-period"), parse::int)?,
            };
            Ok(mirror.gov()?.update_config(&update)?)
        })?;

    exec.command("cast-vote <poll-id> <vote-option> <amount>")
        .description("Vote in an active poll")
        .describe_arg("poll-id", "(int) Poll ID")
        .describe_arg("vote-option", "(string) 'yes' or 'no'")
        .describe_arg("amount", "(Uint128) amount of staked MIR voting power to allocate")
        .action(|args, mirror| {
            let vote: VoteOption = args.required("vote-option")?.parse()?;
            let poll_id = parse::int(args.required("poll-id")?)?;
            let amount = parse::uint128(args.required("amount")?)?;
            Ok(mirror.gov()?.cast_vote(poll_id, vote, amount)?)
        })?;

    exec.command("create-poll")
        .description("Create a new poll")
        .required_option("--title <string>", "*Title of poll")
        .required_option("--desc <string>", "*Poll description")
        .required_option("--deposit <Uint128>", "*deposit amount of MIR tokens")
        .option("--link <url>", "URL with more information")
        .option(
            "--execute-to <AccAddress>",
            "contract to execute on (specify message with --execute-msg)",
        )
        .option("--execute-msg <string>", "message to execute, base64-encoded as given")
        .paired_options("execute-to", "execute-msg")
        .action(|args, mirror| {
            let execute_msg = match (args.get("execute-to"), args.get("execute-msg")) {
                (Some(to), Some(msg)) => {
                    Some(PollExecuteMsg::new(parse::acc_address(to)?, msg))
                }
                _ => None,
            };
            let deposit = parse::uint128(args.required("deposit")?)?;
            let poll = NewPoll {
                title: args.required("title")?.to_string(),
                description: args.required("desc")?.to_string(),
                link: args.get("link").map(str::to_string),
                execute_msg,
            };
            Ok(mirror.gov()?.create_poll(mirror.mirror_token()?, deposit, poll)?)
        })?;

    exec.command("execute-poll <poll-id>")
        .description("Executes the poll")
        .describe_arg("poll-id", "(int) poll id")
        .action(|args, mirror| {
            let poll_id = parse::int(args.required("poll-id")?)?;
            Ok(mirror.gov()?.execute_poll(poll_id)?)
        })?;

    exec.command("end-poll <poll-id>")
        .description("Ends a poll")
        .describe_arg("poll-id", "(int) poll id")
        .action(|args, mirror| {
            let poll_id = parse::int(args.required("poll-id")?)?;
            Ok(mirror.gov()?.end_poll(poll_id)?)
        })?;

    exec.command("expire-poll <poll-id>")
        .description("Expires a poll")
        .describe_arg("poll-id", "(int) poll id")
        .action(|args, mirror| {
            let poll_id = parse::int(args.required("poll-id")?)?;
            Ok(mirror.gov()?.expire_poll(poll_id)?)
        })?;

    exec.command("stake <amount>")
        .description("Stake MIR tokens in governance")
        .describe_arg("amount", "(Uint128) amount of MIR tokens to stake")
        .action(|args, mirror| {
            let amount = parse::uint128(args.required("amount")?)?;
            Ok(mirror.gov()?.stake_voting_tokens(mirror.mirror_token()?, amount)?)
        })?;

    exec.command("unstake [amount]")
        .description("Unstake MIR tokens in governance")
        .describe_arg("amount", "(Uint128) amount of MIR tokens to unstake; all if omitted")
        .action(|args, mirror| {
            let amount = parse::optional(args.get("amount"), parse::uint128)?;
            Ok(mirror.gov()?.withdraw_voting_tokens(amount)?)
        })?;

    let mut query = create_query_menu("gov", "Mirror Gov contract queries");

    query
        .command("config")
        .description("Query Mirror Gov contract config")
        .action(|_, mirror| Ok(mirror.gov()?.get_config()?))?;

    query
        .command("poll <poll-id>")
        .description("Query poll")
        .describe_arg("poll-id", "(int) poll id")
        .action(|args, mirror| {
            let poll_id = parse::int(args.required("poll-id")?)?;
            Ok(mirror.gov()?.get_poll(poll_id)?)
        })?;

    query
        .command("polls")
        .description("Query all polls")
        .option(
            "--filter <string>",
            "poll state to filter ('in_progress', 'passed', 'rejected', 'executed')",
        )
        .option("--start-after <int>", "poll ID to start query from")
        .option("--limit <int>", "max results to return")
        .action(|args, mirror| {
            let filter = parse::optional(args.get("filter"), PollStatus::parse_filter)?;
            let start_after = parse::optional(args.get("start-after"), parse::int)?;
            let limit = parse::optional(args.get("limit"), parse::int)?;
            Ok(mirror.gov()?.get_polls(filter, start_after, limit)?)
        })?;

    query
        .command("staker <address>")
        .description("Query MIR staker")
        .describe_arg("address", "(AccAddress) staker address to query")
        .action(|args, mirror| {
            let address = parse::acc_address(args.required("address")?)?;
            Ok(mirror.gov()?.get_staker(&address)?)
        })?;

    query
        .command("state")
        .description("Query Mirror Gov state")
        .action(|_, mirror| Ok(mirror.gov()?.get_state()?))?;

    query
        .command("voters <poll-id>")
        .description("Query voters for a poll")
        .describe_arg("poll-id", "(int) poll id")
        .option("--start-after <string>", "voter address to start query from")
        .option("--limit <int>", "max results to return")
        .action(|args, mirror| {
            let poll_id = parse::int(args.required("poll-id")?)?;
            let limit = parse::optional(args.get("limit"), parse::int)?;
            Ok(mirror.gov()?.get_voters(poll_id, args.get("start-after"), limit)?)
        })?;

    table.register(exec, query)
}
