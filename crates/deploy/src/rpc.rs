//! JSON-RPC transport to the remote home objects.
//!
//! Every remote method call is delivered through a single `home_deliver`
//! request whose params are `[target, method, args]`.

use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    Amount, Board, BoardId, Bundle, ContractHost, Faucet, Home, InstallationHandle, Payment,
    Purse, RemoteRef, Wallet,
};

/// JSON-RPC method used to deliver a call to a remote presence.
pub const DELIVER_METHOD: &str = "home_deliver";

/// Create an HTTP client configured for JSON-RPC requests.
///
/// Without a `timeout`, requests wait for as long as the remote side takes.
pub fn create_client(timeout: Option<Duration>) -> Result<reqwest::Client, anyhow::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().context("Failed to create HTTP client")
}

/// Make a JSON-RPC call and deserialize the result.
///
/// # Arguments
/// * `client` - The HTTP client to use
/// * `url` - The RPC endpoint URL
/// * `method` - The RPC method name
/// * `params` - The method parameters
///
/// # Returns
/// The deserialized result, or an error if the request failed or returned an error response.
pub async fn json_rpc_call<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    method: &str,
    params: Vec<Value>,
) -> Result<T, anyhow::Error> {
    let response = client
        .post(url)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        }))
        .send()
        .await
        .with_context(|| format!("Failed to send {} request", method))?;

    let result: Value = response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response", method))?;

    extract_result(result).with_context(|| format!("{} call failed", method))
}

/// Pull the `result` member out of a JSON-RPC response.
fn extract_result<T: DeserializeOwned>(response: Value) -> Result<T, anyhow::Error> {
    if let Some(error) = response.get("error").filter(|error| !error.is_null()) {
        anyhow::bail!(
            "RPC error: {}",
            error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown")
        );
    }

    let result_value = response
        .get("result")
        .context("No result in response")?
        .clone();

    serde_json::from_value(result_value).context("Failed to deserialize result")
}

/// A remote presence reachable through the home endpoint.
#[derive(Debug, Clone)]
pub struct RemoteObject {
    client: reqwest::Client,
    url: String,
    target: RemoteRef,
}

impl RemoteObject {
    pub fn new(client: reqwest::Client, url: impl Into<String>, target: RemoteRef) -> Self {
        Self {
            client,
            url: url.into(),
            target,
        }
    }

    pub fn target(&self) -> &RemoteRef {
        &self.target
    }

    /// Another presence reachable through the same endpoint.
    fn sibling(&self, target: RemoteRef) -> Self {
        Self::new(self.client.clone(), self.url.clone(), target)
    }

    /// Deliver `method(args)` to this presence.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        args: Vec<Value>,
    ) -> Result<T, anyhow::Error> {
        tracing::debug!(presence = %self.target, method, "Delivering remote call");

        json_rpc_call(
            &self.client,
            &self.url,
            DELIVER_METHOD,
            vec![
                serde_json::json!(self.target),
                serde_json::json!(method),
                Value::Array(args),
            ],
        )
        .await
        .with_context(|| format!("Remote call {}.{} failed", self.target, method))
    }
}

/// The contract-hosting service behind the home endpoint.
#[derive(Debug, Clone)]
pub struct RemoteZoe(RemoteObject);

impl ContractHost for RemoteZoe {
    async fn install(&self, bundle: &Bundle) -> anyhow::Result<InstallationHandle> {
        let bundle = serde_json::to_value(bundle).context("Failed to serialize bundle")?;
        self.0.call("install", vec![bundle]).await
    }
}

#[derive(Debug, Clone)]
pub struct RemoteBoard(RemoteObject);

impl Board for RemoteBoard {
    async fn get_id(&self, value: &RemoteRef) -> anyhow::Result<BoardId> {
        self.0.call("getId", vec![serde_json::json!(value)]).await
    }
}

#[derive(Debug, Clone)]
pub struct RemotePurse(RemoteObject);

impl Purse for RemotePurse {
    async fn get_current_amount(&self) -> anyhow::Result<Amount> {
        self.0.call("getCurrentAmount", vec![]).await
    }

    async fn withdraw(&self, amount: &Amount) -> anyhow::Result<Payment> {
        let amount = serde_json::to_value(amount).context("Failed to serialize amount")?;
        self.0.call("withdraw", vec![amount]).await
    }

    async fn deposit(&self, payment: Payment) -> anyhow::Result<Amount> {
        self.0.call("deposit", vec![serde_json::json!(payment)]).await
    }
}

#[derive(Debug, Clone)]
pub struct RemoteWallet(RemoteObject);

impl Wallet for RemoteWallet {
    type Purse = RemotePurse;

    async fn get_purse(&self, petname: &str) -> anyhow::Result<RemotePurse> {
        let purse: RemoteRef = self.0.call("getPurse", vec![serde_json::json!(petname)]).await?;
        Ok(RemotePurse(self.0.sibling(purse)))
    }
}

#[derive(Debug, Clone)]
pub struct RemoteFaucet(RemoteObject);

impl Faucet for RemoteFaucet {
    type Purse = RemotePurse;

    async fn get_fee_purse(&self) -> anyhow::Result<RemotePurse> {
        let purse: RemoteRef = self.0.call("getFeePurse", vec![]).await?;
        Ok(RemotePurse(self.0.sibling(purse)))
    }
}

/// Home whose presences live behind a JSON-RPC endpoint.
pub type RemoteHome = Home<RemoteZoe, RemoteBoard, RemoteWallet, RemoteFaucet>;

/// Bind the well-known home presences served at `url`.
///
/// No request is made until the first remote call.
pub fn connect_home(url: &str, timeout: Option<Duration>) -> Result<RemoteHome, anyhow::Error> {
    let client = create_client(timeout)?;
    let object = |target: &str| RemoteObject::new(client.clone(), url, RemoteRef::from(target));

    Ok(Home {
        zoe: RemoteZoe(object("zoe")),
        board: RemoteBoard(object("board")),
        wallet: RemoteWallet(object("wallet")),
        faucet: RemoteFaucet(object("faucet")),
    })
}
