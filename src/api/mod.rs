//! Thin wrappers over the REST endpoints.
//!
//! The HTTP side is supplied by the caller through [`Transport`]; these
//! wrappers only build request bodies and map decoded responses.

pub mod income;
pub mod receipt;
pub mod tax;
pub mod user;

pub use income::IncomeApi;
pub use receipt::ReceiptApi;
pub use tax::TaxApi;
pub use user::UserApi;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::{Clock, SystemClock};
use serde_json::Value;

/// Decoded JSON body of an API response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    body: Value,
}

impl Response {
    pub fn new(body: Value) -> Self {
        Response { body }
    }

    pub fn json(&self) -> &Value {
        &self.body
    }

    pub fn into_json(self) -> Value {
        self.body
    }
}

impl From<Value> for Response {
    fn from(body: Value) -> Self {
        Response::new(body)
    }
}

/// Authenticated HTTP access to the API, relative to its base URL
pub trait Transport {
    fn get(&self, path: &str) -> anyhow::Result<Response>;
    fn post(&self, path: &str, body: &Value) -> anyhow::Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, path: &str) -> anyhow::Result<Response> {
        (**self).get(path)
    }

    fn post(&self, path: &str, body: &Value) -> anyhow::Result<Response> {
        (**self).post(path, body)
    }
}

/// Entry point bundling a transport, configuration and clock
pub struct Client<T, C = SystemClock> {
    transport: T,
    config: ClientConfig,
    clock: C,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Client {
            transport,
            config,
            clock: SystemClock,
        }
    }
}

impl<T: Transport, C: Clock> Client<T, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Client<T, C2> {
        Client {
            transport: self.transport,
            config: self.config,
            clock,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn income(&self) -> IncomeApi<'_, T> {
        IncomeApi::new(&self.transport, &self.clock)
    }

    pub fn receipt(&self) -> ReceiptApi<'_, T> {
        ReceiptApi::new(&self.transport, &self.config)
    }

    pub fn tax(&self) -> TaxApi<'_, T> {
        TaxApi::new(&self.transport)
    }

    pub fn user(&self) -> UserApi<'_, T> {
        UserApi::new(&self.transport)
    }
}

/// Deserialize a response body, naming the endpoint on failure
fn decode<D: serde::de::DeserializeOwned>(path: &str, response: Response) -> anyhow::Result<D> {
    serde_json::from_value(response.into_json()).map_err(|err| {
        ApiError::UnexpectedResponse {
            path: path.to_string(),
            reason: err.to_string(),
        }
        .into()
    })
}
