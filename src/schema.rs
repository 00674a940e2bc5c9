//! JSON Schema documents for the request bodies

use crate::model::{CancelRequest, IncomeRequest};
use schemars::schema::RootSchema;
use schemars::schema_for;

pub fn income_request_schema() -> RootSchema {
    schema_for!(IncomeRequest)
}

pub fn cancel_request_schema() -> RootSchema {
    schema_for!(CancelRequest)
}

pub fn to_pretty_json(schema: &RootSchema) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(schema)?)
}
