use super::Transport;
use crate::error::ApiError;
use crate::model::{
    CancelReason, CancelRequest, ClientInfo, Clock, IncomeRequest, IncomeType, ServiceItem,
    Timestamp,
};
use log::{debug, trace};
use rust_decimal::Decimal;
use serde_json::Value;

const INCOME_PATH: &str = "/income";
const CANCEL_PATH: &str = "/cancel";

/// Receipt issuing and cancellation
pub struct IncomeApi<'a, T> {
    transport: &'a T,
    clock: &'a dyn Clock,
}

impl<'a, T: Transport> IncomeApi<'a, T> {
    pub fn new(transport: &'a T, clock: &'a dyn Clock) -> Self {
        IncomeApi { transport, clock }
    }

    /// Issue a receipt for a single service, returning its UUID
    pub fn create(
        &self,
        name: &str,
        amount: Decimal,
        quantity: Decimal,
        operation_time: Option<Timestamp>,
        client: Option<ClientInfo>,
    ) -> anyhow::Result<String> {
        let item = ServiceItem::new(name, amount, quantity)?;
        self.create_multiple_items(vec![item], operation_time, client)
    }

    /// Issue a receipt for several services, returning its UUID.
    ///
    /// The declared total is the exact sum of the line totals. A legal
    /// entity client must carry both an INN and a display name.
    pub fn create_multiple_items(
        &self,
        services: Vec<ServiceItem>,
        operation_time: Option<Timestamp>,
        client: Option<ClientInfo>,
    ) -> anyhow::Result<String> {
        let client = client.unwrap_or_default();
        if client.income_type() == IncomeType::FromLegalEntity
            && (client.inn().is_none() || client.display_name().is_none())
        {
            return Err(ApiError::LegalEntityIncomplete.into());
        }

        let total_amount = ServiceItem::total_of(&services)?;
        let mut builder = IncomeRequest::builder(services, total_amount.to_string()).client(client);
        if let Some(time) = operation_time {
            builder = builder.operation_time(time);
        }
        let request = builder.build_with_clock(self.clock)?;

        debug!(
            "creating receipt with {} service(s), total {}",
            request.services().len(),
            request.total_amount()
        );
        let response = self.post(INCOME_PATH, &request.to_wire())?;

        response
            .get("approvedReceiptUuid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ApiError::UnexpectedResponse {
                    path: INCOME_PATH.to_string(),
                    reason: "missing approvedReceiptUuid".to_string(),
                }
                .into()
            })
    }

    /// Cancel a receipt, returning the updated income info
    pub fn cancel(
        &self,
        receipt_uuid: &str,
        reason: CancelReason,
        operation_time: Option<Timestamp>,
        partner_code: Option<&str>,
    ) -> anyhow::Result<Value> {
        let request_time = self.clock.now();
        let operation_time = operation_time.unwrap_or(request_time);
        let mut request = CancelRequest::new_at(reason, receipt_uuid, operation_time, request_time)?;
        if let Some(code) = partner_code {
            request = request.with_partner_code(code);
        }

        debug!("cancelling receipt {} ({})", request.receipt_uuid(), reason);
        let mut response = self.post(CANCEL_PATH, &request.to_wire())?;

        response
            .get_mut("incomeInfo")
            .map(Value::take)
            .ok_or_else(|| {
                ApiError::UnexpectedResponse {
                    path: CANCEL_PATH.to_string(),
                    reason: "missing incomeInfo".to_string(),
                }
                .into()
            })
    }

    fn post(&self, path: &str, body: &Value) -> anyhow::Result<Value> {
        trace!("POST {path} {body}");
        Ok(self.transport.post(path, body)?.into_json())
    }
}
