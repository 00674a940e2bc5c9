use super::{decode, Transport};
use crate::model::{HistoryRecords, PaymentRecords, Tax};
use log::debug;
use serde_json::json;

const TAXES_PATH: &str = "/taxes";
const HISTORY_PATH: &str = "/taxes/history";
const PAYMENTS_PATH: &str = "/taxes/payments";

/// Tax state, history and payments. `oktmo` narrows results to one
/// municipal territory.
pub struct TaxApi<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> TaxApi<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        TaxApi { transport }
    }

    pub fn get(&self) -> anyhow::Result<Tax> {
        debug!("GET {TAXES_PATH}");
        let response = self.transport.get(TAXES_PATH)?;
        decode(TAXES_PATH, response)
    }

    pub fn history(&self, oktmo: Option<&str>) -> anyhow::Result<HistoryRecords> {
        debug!("POST {HISTORY_PATH} oktmo={oktmo:?}");
        let body = json!({ "oktmo": oktmo });
        let response = self.transport.post(HISTORY_PATH, &body)?;
        decode(HISTORY_PATH, response)
    }

    pub fn payments(&self, oktmo: Option<&str>, only_paid: bool) -> anyhow::Result<PaymentRecords> {
        debug!("POST {PAYMENTS_PATH} oktmo={oktmo:?} only_paid={only_paid}");
        let body = json!({
            "oktmo": oktmo,
            "onlyPaid": only_paid,
        });
        let response = self.transport.post(PAYMENTS_PATH, &body)?;
        decode(PAYMENTS_PATH, response)
    }
}
