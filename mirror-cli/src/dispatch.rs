//! Command dispatch.
//!
//! The dispatcher is the only place that talks to the transport, prints
//! results and decides the exit code. Handlers only build call descriptions.

use clap::ArgMatches;
use mirror_client::{LcdClient, Transport, TxOutcome, TxRequest};
use mirror_core::{ExecuteMsg, Mirror, QueryRequest};
use serde_json::Value;
use tracing::{debug, info};

use crate::commands::{CommandTable, Invocation};
use crate::context::{ExecutionContext, GlobalOptions};
use crate::error::{CliError, Result};
use crate::menu::{ExecMenu, QueryMenu};
use crate::output::{self, OutputFormat};

/// Runs one command against a transport.
pub struct Dispatcher<T> {
    context: ExecutionContext,
    transport: T,
    format: OutputFormat,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(context: ExecutionContext, transport: T, format: OutputFormat) -> Self {
        Self {
            context,
            transport,
            format,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn dispatch(&self, invocation: Invocation<'_>) -> i32 {
        match invocation {
            Invocation::Exec { menu, spec, args } => {
                self.handle_exec_command(menu, |mirror| spec.invoke(&args, mirror))
                    .await
            }
            Invocation::Query { menu, spec, args } => {
                self.handle_query_command(menu, |mirror| spec.invoke(&args, mirror))
                    .await
            }
        }
    }

    /// Build, submit and report a transaction. Returns the exit code.
    ///
    /// The callback is synchronous: it only builds the call description, and
    /// the single await happens here, at the transport.
    pub async fn handle_exec_command<F>(&self, menu: &ExecMenu, callback: F) -> i32
    where
        F: FnOnce(&Mirror) -> Result<ExecuteMsg>,
    {
        let result = match self.execute(callback).await {
            Ok(outcome) => self.print_outcome(&outcome),
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => 0,
            Err(e) => report(menu.name(), &e),
        }
    }

    /// Run and print a query. Returns the exit code.
    ///
    /// As with exec commands, the callback builds the request without awaiting.
    pub async fn handle_query_command<F>(&self, menu: &QueryMenu, callback: F) -> i32
    where
        F: FnOnce(&Mirror) -> Result<QueryRequest>,
    {
        let result = match self.query(callback).await {
            Ok(payload) => output::payload(&payload, self.format),
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => 0,
            Err(e) => report(menu.name(), &e),
        }
    }

    pub(crate) async fn execute<F>(&self, callback: F) -> Result<TxOutcome>
    where
        F: FnOnce(&Mirror) -> Result<ExecuteMsg>,
    {
        let sender = self.context.signing_sender()?.clone();
        let msg = callback(&self.context.mirror)?;
        info!(
            contract = %msg.contract,
            sender = %sender,
            generate_only = self.context.generate_only,
            "submitting transaction"
        );

        let request = TxRequest {
            sender,
            msgs: vec![msg],
            memo: self.context.memo.clone(),
            generate_only: self.context.generate_only,
        };
        Ok(self.transport.execute(&request).await?)
    }

    pub(crate) async fn query<F>(&self, callback: F) -> Result<Value>
    where
        F: FnOnce(&Mirror) -> Result<QueryRequest>,
    {
        let request = callback(&self.context.mirror)?;
        debug!(contract = %request.contract, "querying");
        Ok(self.transport.query(&request).await?)
    }

    fn print_outcome(&self, outcome: &TxOutcome) -> Result<()> {
        match outcome {
            TxOutcome::Confirmed(receipt) => {
                output::success(&format!(
                    "Transaction {} included at height {}",
                    receipt.txhash, receipt.height
                ));
                output::payload(receipt, self.format)
            }
            TxOutcome::Unsigned(tx) => {
                output::info("Unsigned transaction, not broadcast");
                output::payload(tx, self.format)
            }
        }
    }
}

/// Render `err` once and return the failure exit code.
pub fn report(scope: &str, err: &CliError) -> i32 {
    debug!(kind = ?err.kind(), "command failed");
    output::error(&format!("{}: {}", scope, err));
    if let Some(hint) = err.hint() {
        output::hint(hint);
    }
    1
}

/// Resolve the parsed command line and run it against the configured LCD.
pub async fn run(table: &CommandTable, matches: &ArgMatches, globals: &GlobalOptions) -> i32 {
    let invocation = match table.resolve(matches) {
        Ok(invocation) => invocation,
        Err(e) => return report("mirrorcli", &CliError::from(e)),
    };
    let context = match ExecutionContext::resolve(globals) {
        Ok(context) => context,
        Err(e) => return report("mirrorcli", &e),
    };

    let client = match LcdClient::new(context.lcd.clone()) {
        Ok(client) => client,
        Err(e) => return report("mirrorcli", &CliError::from(e)),
    };
    let client = match &context.signer {
        Some(signer) => client.with_signer(signer.clone()),
        None => client,
    };

    Dispatcher::new(context, client, globals.output)
        .dispatch(invocation)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::gov;
    use crate::menu::Args;
    use async_trait::async_trait;
    use mirror_client::{ClientError, KeySigner, LcdConfig, TxReceipt};
    use mirror_core::msg::to_binary;
    use mirror_core::{AccAddress, ContractAddresses, MirrorError};
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    const GOV: &str = "terra1qyqszqgpqyqszqgpqyqszqgpqyqszqgp5hm70u";
    const MIR: &str = "terra1qgpqyqszqgpqyqszqgpqyqszqgpqyqsz9namy2";
    const SENDER: &str = "terra1q5zs2pg9q5zs2pg9q5zs2pg9q5zs2pg99r67rk";
    const TARGET: &str = "terra1pv9skzctpv9skzctpv9skzctpv9skzctttftdw";

    /// Records every call and answers with canned data.
    #[derive(Default)]
    struct MockTransport {
        queries: Mutex<Vec<QueryRequest>>,
        txs: Mutex<Vec<TxRequest>>,
        response: Value,
    }

    impl MockTransport {
        fn calls(&self) -> usize {
            self.queries.lock().unwrap().len() + self.txs.lock().unwrap().len()
        }

        fn last_tx(&self) -> TxRequest {
            self.txs.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn query(&self, request: &QueryRequest) -> std::result::Result<Value, ClientError> {
            self.queries.lock().unwrap().push(request.clone());
            Ok(self.response.clone())
        }

        async fn execute(&self, request: &TxRequest) -> std::result::Result<TxOutcome, ClientError> {
            self.txs.lock().unwrap().push(request.clone());
            Ok(TxOutcome::Confirmed(TxReceipt {
                txhash: "ABC".into(),
                height: 10,
                gas_wanted: 1,
                gas_used: 1,
                raw_log: String::new(),
                logs: Value::Null,
            }))
        }
    }

    fn context() -> ExecutionContext {
        ExecutionContext {
            lcd: LcdConfig {
                url: "http://localhost:1317".into(),
                chain_id: "localterra".into(),
                gas: 200_000,
                gas_price: "0.15uusd".parse().unwrap(),
                timeout: Duration::from_secs(5),
            },
            sender: Some(AccAddress::new(SENDER).unwrap()),
            signer: Some(KeySigner::from_hex(&"01".repeat(32)).unwrap()),
            mirror: Mirror::new(ContractAddresses {
                gov: Some(AccAddress::new(GOV).unwrap()),
                mirror_token: Some(AccAddress::new(MIR).unwrap()),
                ..Default::default()
            }),
            memo: String::new(),
            generate_only: false,
        }
    }

    fn dispatcher(response: Value) -> Dispatcher<MockTransport> {
        let transport = MockTransport {
            response,
            ..Default::default()
        };
        Dispatcher::new(context(), transport, OutputFormat::Json)
    }

    fn gov_table() -> CommandTable {
        let mut table = CommandTable::default();
        gov::register(&mut table).unwrap();
        table
    }

    async fn exec(d: &Dispatcher<MockTransport>, command: &str, args: Args) -> Result<TxOutcome> {
        let table = gov_table();
        let spec = table.find("gov").unwrap().exec.find(command).unwrap();
        d.execute(|mirror| spec.invoke(&args, mirror)).await
    }

    async fn query(d: &Dispatcher<MockTransport>, command: &str, args: Args) -> Result<Value> {
        let table = gov_table();
        let spec = table.find("gov").unwrap().query.find(command).unwrap();
        d.query(|mirror| spec.invoke(&args, mirror)).await
    }

    #[tokio::test]
    async fn test_invalid_vote_option_makes_no_call() {
        let d = dispatcher(Value::Null);
        let err = exec(
            &d,
            "cast-vote",
            Args::from_pairs(&[("poll-id", "1"), ("vote-option", "maybe"), ("amount", "10")]),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid vote option 'maybe'; MUST be one of: 'yes', 'no'"
        );
        assert_eq!(d.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_poll_filter_makes_no_call() {
        let d = dispatcher(Value::Null);
        let err = query(&d, "polls", Args::from_pairs(&[("filter", "expired")]))
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Input(MirrorError::InvalidChoice { .. })));
        assert_eq!(d.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_create_poll_with_one_of_pair_fails() {
        let d = dispatcher(Value::Null);
        let args = Args::from_pairs(&[
            ("title", "t"),
            ("desc", "d"),
            ("deposit", "100"),
            ("execute-msg", "{}"),
        ]);
        let err = exec(&d, "create-poll", args).await.unwrap_err();

        assert!(matches!(err, CliError::Input(ref e) if e.is_precondition()));
        assert_eq!(
            err.to_string(),
            "both --execute-to and --execute-msg must be supplied if either is"
        );
        assert_eq!(d.transport().calls(), 0);
    }

    fn create_poll_hook(tx: &TxRequest) -> Value {
        let send = &tx.msgs[0].msg["send"];
        let encoded = send["msg"].as_str().unwrap();
        let expected_contract = json!(GOV);
        assert_eq!(send["contract"], expected_contract);
        serde_json::from_slice(&base64_decode(encoded)).unwrap()
    }

    fn base64_decode(s: &str) -> Vec<u8> {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.decode(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_poll_with_execute_message() {
        let d = dispatcher(Value::Null);
        let args = Args::from_pairs(&[
            ("title", "t"),
            ("desc", "d"),
            ("deposit", "100"),
            ("execute-to", TARGET),
            ("execute-msg", r#"{"foo":"bar"}"#),
        ]);
        exec(&d, "create-poll", args).await.unwrap();

        let tx = d.transport().last_tx();
        assert_eq!(tx.msgs[0].contract.as_str(), MIR);
        let hook = create_poll_hook(&tx);
        assert_eq!(hook["create_poll"]["execute_msg"]["contract"], TARGET);
        assert_eq!(hook["create_poll"]["execute_msg"]["msg"], "eyJmb28iOiJiYXIifQ==");
    }

    #[tokio::test]
    async fn test_create_poll_encodes_raw_execute_message_verbatim() {
        let d = dispatcher(Value::Null);
        let upper = TARGET.to_ascii_uppercase();
        let args = Args::from_pairs(&[
            ("title", "t"),
            ("desc", "d"),
            ("deposit", "100"),
            ("execute-to", upper.as_str()),
            ("execute-msg", "hello"),
        ]);
        exec(&d, "create-poll", args).await.unwrap();

        let hook = create_poll_hook(&d.transport().last_tx());
        assert_eq!(hook["create_poll"]["execute_msg"]["contract"], upper.as_str());
        assert_eq!(hook["create_poll"]["execute_msg"]["msg"], "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_create_poll_without_execute_message() {
        let d = dispatcher(Value::Null);
        let args = Args::from_pairs(&[("title", "t"), ("desc", "d"), ("deposit", "100")]);
        exec(&d, "create-poll", args).await.unwrap();

        let hook = create_poll_hook(&d.transport().last_tx());
        assert!(hook["create_poll"].get("execute_msg").is_none());
        assert!(hook["create_poll"].get("link").is_none());
    }

    #[tokio::test]
    async fn test_stake_sends_exact_amount_to_gov() {
        let d = dispatcher(Value::Null);
        exec(&d, "stake", Args::from_pairs(&[("amount", "1000000")]))
            .await
            .unwrap();

        let tx = d.transport().last_tx();
        assert_eq!(tx.sender.as_str(), SENDER);
        assert_eq!(tx.msgs[0].contract.as_str(), MIR);
        assert_eq!(
            tx.msgs[0].msg,
            json!({
                "send": {
                    "contract": GOV,
                    "amount": "1000000",
                    "msg": to_binary(&json!({ "stake_voting_tokens": {} })).unwrap(),
                }
            })
        );
    }

    #[tokio::test]
    async fn test_stake_rejects_non_numeric_amount() {
        let d = dispatcher(Value::Null);
        let err = exec(&d, "stake", Args::from_pairs(&[("amount", "abc")]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CliError::Input(MirrorError::InvalidAmount(ref raw)) if raw == "abc"
        ));
        assert_eq!(d.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_poll_query_returns_payload_unmodified() {
        let payload = json!({ "id": 5, "status": "in_progress", "extra": [1, 2, { "x": null }] });
        let d = dispatcher(payload.clone());
        let result = query(&d, "poll", Args::from_pairs(&[("poll-id", "5")]))
            .await
            .unwrap();

        assert_eq!(result, payload);
        let queries = d.transport().queries.lock().unwrap();
        assert_eq!(queries[0].contract.as_str(), GOV);
        assert_eq!(queries[0].msg, json!({ "poll": { "poll_id": 5 } }));
    }

    #[tokio::test]
    async fn test_missing_contract_fails_before_transport() {
        let mut ctx = context();
        ctx.mirror = Mirror::default();
        let d = Dispatcher::new(ctx, MockTransport::default(), OutputFormat::Json);
        let err = query(&d, "state", Args::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "no address configured for the 'gov' contract");
        assert_eq!(d.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_handler() {
        let mut ctx = context();
        ctx.signer = None;
        let d = Dispatcher::new(ctx, MockTransport::default(), OutputFormat::Json);
        let err = exec(&d, "end-poll", Args::from_pairs(&[("poll-id", "1")]))
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Remote(ClientError::MissingSigner)));
        assert_eq!(d.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_exit_codes() {
        let d = dispatcher(json!({}));
        let table = gov_table();
        let menus = table.find("gov").unwrap();

        let code = d
            .handle_query_command(&menus.query, |mirror| Ok(mirror.gov()?.get_state()?))
            .await;
        assert_eq!(code, 0);

        let code = d
            .handle_exec_command(&menus.exec, |_| {
                Err(MirrorError::InvalidInteger("x".into()).into())
            })
            .await;
        assert_eq!(code, 1);
    }
}
