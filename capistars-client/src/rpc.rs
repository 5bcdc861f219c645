//! tRPC-over-HTTP adapter
//!
//! Queries are `GET <base>/api/trpc/<procedure>?input=<encoded JSON>`,
//! mutations are `POST <base>/api/trpc/<procedure>` with a JSON body. Both
//! answer with a `{ "result": { "data": ... } }` envelope.
//!
//! The adapter never retries and never recovers; every failure is returned
//! to the caller.

use std::str::FromStr;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::rpc::RpcEnvelope;

use crate::{ClientConfig, ClientError, ClientResult};

/// Path prefix shared by every procedure
pub const TRPC_PATH: &str = "api/trpc";

/// Read or write call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Query,
    Mutation,
}

/// How inputs are framed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputEncoding {
    /// Input sent verbatim
    #[default]
    Plain,
    /// Input wrapped as `{ "json": <input> }` for backends with a data transformer
    Transformer,
}

impl InputEncoding {
    /// Frame an input value for the wire
    pub fn frame(self, input: Value) -> Value {
        match self {
            Self::Plain => input,
            Self::Transformer => serde_json::json!({ "json": input }),
        }
    }
}

impl FromStr for InputEncoding {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "plain" => Ok(Self::Plain),
            "transformer" | "superjson" => Ok(Self::Transformer),
            other => Err(ClientError::Config(format!("unknown input encoding: {other}"))),
        }
    }
}

/// Check that `procedure` is a dot-delimited path of identifier segments.
pub fn validate_procedure(procedure: &str) -> ClientResult<()> {
    let valid = !procedure.is_empty()
        && procedure.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if valid {
        Ok(())
    } else {
        Err(ClientError::InvalidProcedure(procedure.to_string()))
    }
}

/// Percent-encode `text` the way `encodeURIComponent` does.
pub fn encode_uri_component(text: &str) -> String {
    // `urlencoding` escapes these marks, `encodeURIComponent` keeps them
    urlencoding::encode(text)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Build the URL of a procedure call, with the encoded query input if any.
pub fn procedure_url(base_url: &str, procedure: &str, input: Option<&Value>) -> String {
    let mut url = format!("{}/{}/{}", base_url.trim_end_matches('/'), TRPC_PATH, procedure);
    if let Some(input) = input {
        url.push_str("?input=");
        url.push_str(&encode_uri_component(&input.to_string()));
    }
    url
}

/// Transport for tRPC procedure calls.
///
/// Implementors only provide [`RpcTransport::call_raw`]; the typed helpers
/// encode inputs and decode the `data` payload on top of it.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Invoke `procedure` and return the unwrapped envelope `data`
    async fn call_raw(
        &self,
        procedure: &str,
        input: Option<Value>,
        kind: CallKind,
    ) -> ClientResult<Value>;

    /// Invoke `procedure` and decode `data` as `T`.
    ///
    /// The shape is trusted: no validation beyond deserialization.
    async fn call<T, I>(&self, procedure: &str, input: Option<&I>, kind: CallKind) -> ClientResult<T>
    where
        T: DeserializeOwned + Send,
        I: Serialize + Sync + ?Sized,
    {
        let input = input.map(serde_json::to_value).transpose()?;
        let data = self.call_raw(procedure, input, kind).await?;
        serde_json::from_value(data)
            .map_err(|e| ClientError::InvalidResponse(format!("{procedure}: {e}")))
    }

    /// Read call
    async fn query<T, I>(&self, procedure: &str, input: Option<&I>) -> ClientResult<T>
    where
        T: DeserializeOwned + Send,
        I: Serialize + Sync + ?Sized,
    {
        self.call(procedure, input, CallKind::Query).await
    }

    /// Write call
    async fn mutate<T, I>(&self, procedure: &str, input: &I) -> ClientResult<T>
    where
        T: DeserializeOwned + Send,
        I: Serialize + Sync + ?Sized,
    {
        self.call(procedure, Some(input), CallKind::Mutation).await
    }
}

/// Network tRPC client
#[derive(Debug, Clone)]
pub struct NetworkRpcClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    encoding: InputEncoding,
}

impl NetworkRpcClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            encoding: config.input_encoding,
        })
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace or clear the session token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send(
        &self,
        procedure: &str,
        input: Option<Value>,
        kind: CallKind,
    ) -> ClientResult<Value> {
        validate_procedure(procedure)?;
        let input = input.map(|value| self.encoding.frame(value));

        let mut req = match kind {
            CallKind::Query => self
                .client
                .get(procedure_url(&self.base_url, procedure, input.as_ref())),
            CallKind::Mutation => {
                let req = self.client.post(procedure_url(&self.base_url, procedure, None));
                match &input {
                    Some(body) => req.json(body),
                    None => req,
                }
            }
        };
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        tracing::debug!(procedure, ?kind, "Dispatching tRPC call");
        let response = req.send().await?;
        Self::handle_response(procedure, response).await
    }

    async fn handle_response(procedure: &str, response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                _ => Err(ClientError::Status {
                    status: status.as_u16(),
                    body: text,
                }),
            };
        }

        // Void procedures omit `data`
        serde_json::from_str::<RpcEnvelope<Option<Value>>>(&text)
            .map(|envelope| envelope.into_data().unwrap_or(Value::Null))
            .map_err(|e| ClientError::InvalidResponse(format!("{procedure}: {e}")))
    }
}

#[async_trait]
impl RpcTransport for NetworkRpcClient {
    async fn call_raw(
        &self,
        procedure: &str,
        input: Option<Value>,
        kind: CallKind,
    ) -> ClientResult<Value> {
        self.send(procedure, input, kind).await.inspect_err(|e| {
            tracing::debug!(procedure, error = %e, "tRPC call failed");
        })
    }
}
