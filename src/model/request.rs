use super::client::ClientInfo;
use super::enums::{CancelReason, PaymentType};
use super::service::ServiceItem;
use super::timestamp::{Clock, SystemClock, Timestamp};
use crate::error::ValidationError;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// Body of a receipt creation call (`POST /income`).
///
/// `total_amount` is declared by the caller and sent verbatim. It is not
/// recomputed from the services, mirroring the upstream API which keeps the
/// declared total separate from the line items.
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct IncomeRequest {
    #[schemars(with = "String")]
    operation_time: Timestamp,
    #[schemars(with = "String")]
    request_time: Timestamp,
    services: Vec<ServiceItem>,
    /// Declared receipt total as a decimal string
    total_amount: String,
    client: ClientInfo,
    payment_type: PaymentType,
    ignore_max_total_income_restriction: bool,
}

impl IncomeRequest {
    /// Request with default client, cash payment and both timestamps set to now
    pub fn new(
        services: Vec<ServiceItem>,
        total_amount: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::builder(services, total_amount).build()
    }

    pub fn builder(
        services: Vec<ServiceItem>,
        total_amount: impl Into<String>,
    ) -> IncomeRequestBuilder {
        IncomeRequestBuilder {
            services,
            total_amount: total_amount.into(),
            operation_time: None,
            request_time: None,
            client: ClientInfo::default(),
            payment_type: PaymentType::default(),
            ignore_max_total_income_restriction: false,
        }
    }

    pub fn operation_time(&self) -> Timestamp {
        self.operation_time
    }

    pub fn request_time(&self) -> Timestamp {
        self.request_time
    }

    pub fn services(&self) -> &[ServiceItem] {
        &self.services
    }

    pub fn total_amount(&self) -> &str {
        &self.total_amount
    }

    pub fn client(&self) -> &ClientInfo {
        &self.client
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    pub fn ignore_max_total_income_restriction(&self) -> bool {
        self.ignore_max_total_income_restriction
    }

    pub fn to_wire(&self) -> Value {
        let services: Vec<Value> = self.services.iter().map(ServiceItem::to_wire).collect();
        json!({
            "operationTime": self.operation_time.to_wire(),
            "requestTime": self.request_time.to_wire(),
            "services": services,
            "totalAmount": self.total_amount,
            "client": self.client.to_wire(),
            "paymentType": self.payment_type.as_str(),
            "ignoreMaxTotalIncomeRestriction": self.ignore_max_total_income_restriction,
        })
    }
}

/// Optional parts of an [`IncomeRequest`]; validation runs in `build`
#[derive(Debug, Clone)]
pub struct IncomeRequestBuilder {
    services: Vec<ServiceItem>,
    total_amount: String,
    operation_time: Option<Timestamp>,
    request_time: Option<Timestamp>,
    client: ClientInfo,
    payment_type: PaymentType,
    ignore_max_total_income_restriction: bool,
}

impl IncomeRequestBuilder {
    pub fn operation_time(mut self, time: Timestamp) -> Self {
        self.operation_time = Some(time);
        self
    }

    pub fn request_time(mut self, time: Timestamp) -> Self {
        self.request_time = Some(time);
        self
    }

    pub fn client(mut self, client: ClientInfo) -> Self {
        self.client = client;
        self
    }

    pub fn payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = payment_type;
        self
    }

    pub fn ignore_max_total_income_restriction(mut self, ignore: bool) -> Self {
        self.ignore_max_total_income_restriction = ignore;
        self
    }

    pub fn build(self) -> Result<IncomeRequest, ValidationError> {
        self.build_with_clock(&SystemClock)
    }

    /// Build, filling unset timestamps from `clock`. Each unset field reads
    /// the clock separately.
    pub fn build_with_clock<C: Clock + ?Sized>(
        self,
        clock: &C,
    ) -> Result<IncomeRequest, ValidationError> {
        if self.services.is_empty() {
            return Err(ValidationError::EmptyCollection { field: "services" });
        }

        Ok(IncomeRequest {
            operation_time: self.operation_time.unwrap_or_else(|| clock.now()),
            request_time: self.request_time.unwrap_or_else(|| clock.now()),
            services: self.services,
            total_amount: self.total_amount,
            client: self.client,
            payment_type: self.payment_type,
            ignore_max_total_income_restriction: self.ignore_max_total_income_restriction,
        })
    }
}

impl Serialize for IncomeRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireIncomeRequest {
    #[serde(default)]
    operation_time: Option<Timestamp>,
    #[serde(default)]
    request_time: Option<Timestamp>,
    services: Vec<ServiceItem>,
    total_amount: String,
    #[serde(default)]
    client: ClientInfo,
    #[serde(default)]
    payment_type: PaymentType,
    #[serde(default)]
    ignore_max_total_income_restriction: bool,
}

impl<'de> Deserialize<'de> for IncomeRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireIncomeRequest::deserialize(deserializer)?;
        let mut builder = IncomeRequest::builder(wire.services, wire.total_amount)
            .client(wire.client)
            .payment_type(wire.payment_type)
            .ignore_max_total_income_restriction(wire.ignore_max_total_income_restriction);
        if let Some(time) = wire.operation_time {
            builder = builder.operation_time(time);
        }
        if let Some(time) = wire.request_time {
            builder = builder.request_time(time);
        }
        builder.build().map_err(serde::de::Error::custom)
    }
}

/// Body of a receipt cancellation call (`POST /cancel`)
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct CancelRequest {
    #[schemars(with = "String")]
    operation_time: Timestamp,
    #[schemars(with = "String")]
    request_time: Timestamp,
    #[schemars(rename = "comment")]
    reason: CancelReason,
    receipt_uuid: String,
    partner_code: Option<String>,
}

impl CancelRequest {
    /// Cancellation stamped with the current time
    pub fn new(reason: CancelReason, receipt_uuid: &str) -> Result<Self, ValidationError> {
        Self::new_with_clock(reason, receipt_uuid, &SystemClock)
    }

    pub fn new_with_clock<C: Clock + ?Sized>(
        reason: CancelReason,
        receipt_uuid: &str,
        clock: &C,
    ) -> Result<Self, ValidationError> {
        let operation_time = clock.now();
        let request_time = clock.now();
        Self::new_at(reason, receipt_uuid, operation_time, request_time)
    }

    pub fn new_at(
        reason: CancelReason,
        receipt_uuid: &str,
        operation_time: Timestamp,
        request_time: Timestamp,
    ) -> Result<Self, ValidationError> {
        let receipt_uuid = receipt_uuid.trim();
        if receipt_uuid.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "receipt_uuid",
            });
        }

        Ok(CancelRequest {
            operation_time,
            request_time,
            reason,
            receipt_uuid: receipt_uuid.to_string(),
            partner_code: None,
        })
    }

    pub fn with_partner_code(mut self, partner_code: impl Into<String>) -> Self {
        self.partner_code = Some(partner_code.into());
        self
    }

    pub fn operation_time(&self) -> Timestamp {
        self.operation_time
    }

    pub fn request_time(&self) -> Timestamp {
        self.request_time
    }

    pub fn reason(&self) -> CancelReason {
        self.reason
    }

    pub fn receipt_uuid(&self) -> &str {
        &self.receipt_uuid
    }

    pub fn partner_code(&self) -> Option<&str> {
        self.partner_code.as_deref()
    }

    pub fn to_wire(&self) -> Value {
        json!({
            "operationTime": self.operation_time.to_wire(),
            "requestTime": self.request_time.to_wire(),
            "comment": self.reason.as_str(),
            "receiptUuid": self.receipt_uuid,
            "partnerCode": self.partner_code,
        })
    }
}

impl Serialize for CancelRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCancelRequest {
    #[serde(default)]
    operation_time: Option<Timestamp>,
    #[serde(default)]
    request_time: Option<Timestamp>,
    comment: CancelReason,
    receipt_uuid: String,
    #[serde(default)]
    partner_code: Option<String>,
}

impl<'de> Deserialize<'de> for CancelRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireCancelRequest::deserialize(deserializer)?;
        let operation_time = wire.operation_time.unwrap_or_else(Timestamp::now);
        let request_time = wire.request_time.unwrap_or_else(Timestamp::now);
        let request = CancelRequest::new_at(
            wire.comment,
            &wire.receipt_uuid,
            operation_time,
            request_time,
        )
        .map_err(serde::de::Error::custom)?;

        Ok(match wire.partner_code {
            Some(code) => request.with_partner_code(code),
            None => request,
        })
    }
}
