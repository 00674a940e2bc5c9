//! Drives the REST wrappers through an in-memory transport

use nalog::{
    ApiError, CancelReason, Client, ClientConfig, ClientInfo, FixedClock, IncomeType, Response,
    ServiceItem, Timestamp, Transport, ValidationError, ValidationErrorKind,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Get(String),
    Post(String, Value),
}

/// Replays canned responses and records every call
#[derive(Default)]
struct RecordingTransport {
    responses: RefCell<VecDeque<Value>>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingTransport {
    fn replying(responses: impl IntoIterator<Item = Value>) -> Self {
        RecordingTransport {
            responses: RefCell::new(responses.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn next(&self) -> anyhow::Result<Response> {
        self.responses
            .borrow_mut()
            .pop_front()
            .map(Response::new)
            .ok_or_else(|| anyhow::anyhow!("no response queued"))
    }
}

impl Transport for RecordingTransport {
    fn get(&self, path: &str) -> anyhow::Result<Response> {
        self.calls.borrow_mut().push(Call::Get(path.to_string()));
        self.next()
    }

    fn post(&self, path: &str, body: &Value) -> anyhow::Result<Response> {
        self.calls
            .borrow_mut()
            .push(Call::Post(path.to_string(), body.clone()));
        self.next()
    }
}

fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

fn now() -> Timestamp {
    "2024-04-01T12:00:00+03:00".parse().unwrap()
}

fn client(transport: &RecordingTransport) -> Client<&RecordingTransport, FixedClock> {
    Client::new(transport, ClientConfig::new("123456789012")).with_clock(FixedClock(now()))
}

fn posted_body(transport: &RecordingTransport, index: usize) -> Value {
    match &transport.calls()[index] {
        Call::Post(_, body) => body.clone(),
        other => panic!("expected POST, got {other:?}"),
    }
}

#[test]
fn create_posts_single_item_receipt() {
    init_logger();
    let transport = RecordingTransport::replying([json!({"approvedReceiptUuid": "200abc"})]);

    let uuid = client(&transport)
        .income()
        .create("Consulting", dec!(5000.00), dec!(1), None, None)
        .unwrap();
    assert_eq!(uuid, "200abc");

    let body = posted_body(&transport, 0);
    assert_eq!(
        body,
        json!({
            "operationTime": "2024-04-01T09:00:00Z",
            "requestTime": "2024-04-01T09:00:00Z",
            "services": [{"name": "Consulting", "amount": "5000.00", "quantity": "1"}],
            "totalAmount": "5000.00",
            "client": {"contactPhone": null, "displayName": null, "incomeType": "FROM_INDIVIDUAL", "inn": null},
            "paymentType": "CASH",
            "ignoreMaxTotalIncomeRestriction": false
        })
    );
    assert!(matches!(&transport.calls()[0], Call::Post(path, _) if path == "/income"));
}

#[test]
fn create_multiple_items_sums_line_totals() {
    init_logger();
    let transport = RecordingTransport::replying([json!({"approvedReceiptUuid": "r-2"})]);
    let services = vec![
        ServiceItem::new("Site development", dec!(25000.00), dec!(1)).unwrap(),
        ServiceItem::new("Support", dec!(5000.00), dec!(3)).unwrap(),
    ];
    let legal = ClientInfo::builder()
        .with_display_name("ООО Демо")
        .with_income_type(IncomeType::FromLegalEntity)
        .with_inn("1234567890")
        .with_phone("+79001234567")
        .build()
        .unwrap();
    let operation_time: Timestamp = "2024-03-30T10:00:00Z".parse().unwrap();

    client(&transport)
        .income()
        .create_multiple_items(services, Some(operation_time), Some(legal))
        .unwrap();

    let body = posted_body(&transport, 0);
    assert_eq!(body["totalAmount"], "40000.00");
    assert_eq!(body["operationTime"], "2024-03-30T10:00:00Z");
    assert_eq!(body["requestTime"], "2024-04-01T09:00:00Z");
    assert_eq!(body["services"][1]["name"], "Support");
    assert_eq!(body["client"]["incomeType"], "FROM_LEGAL_ENTITY");
}

#[test]
fn legal_entity_requires_name_and_inn() {
    let transport = RecordingTransport::default();
    let services = vec![ServiceItem::new("Audit", dec!(100), dec!(1)).unwrap()];
    let nameless = ClientInfo::builder()
        .with_income_type(IncomeType::FromLegalEntity)
        .with_inn("1234567890")
        .build()
        .unwrap();

    let err = client(&transport)
        .income()
        .create_multiple_items(services, None, Some(nameless))
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ApiError>(),
        Some(&ApiError::LegalEntityIncomplete)
    );
    assert!(transport.calls().is_empty());
}

#[test]
fn empty_services_never_reach_the_transport() {
    let transport = RecordingTransport::default();
    let err = client(&transport)
        .income()
        .create_multiple_items(vec![], None, None)
        .unwrap_err();
    let validation = err.downcast_ref::<ValidationError>().unwrap();
    assert_eq!(validation.kind(), ValidationErrorKind::EmptyCollection);
    assert!(transport.calls().is_empty());
}

#[test]
fn invalid_item_is_a_validation_error() {
    let transport = RecordingTransport::default();
    let err = client(&transport)
        .income()
        .create(" ", dec!(100), dec!(1), None, None)
        .unwrap_err();
    let validation = err.downcast_ref::<ValidationError>().unwrap();
    assert_eq!(validation.kind(), ValidationErrorKind::EmptyField);
}

#[test]
fn unrepresentable_total_never_reaches_the_transport() {
    let transport = RecordingTransport::default();
    let err = client(&transport)
        .income()
        .create("Big", rust_decimal::Decimal::MAX, dec!(2), None, None)
        .unwrap_err();
    let validation = err.downcast_ref::<ValidationError>().unwrap();
    assert_eq!(validation.kind(), ValidationErrorKind::OutOfRange);
    assert!(transport.calls().is_empty());
}

#[test]
fn missing_receipt_uuid_in_response() {
    let transport = RecordingTransport::replying([json!({"status": "ok"})]);
    let err = client(&transport)
        .income()
        .create("Audit", dec!(100), dec!(1), None, None)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::UnexpectedResponse { path, .. }) if path == "/income"
    ));
}

#[test]
fn transport_errors_propagate() {
    let transport = RecordingTransport::default();
    let err = client(&transport).tax().get().unwrap_err();
    assert!(err.to_string().contains("no response queued"));
}

#[test]
fn cancel_posts_reason_sentence() {
    init_logger();
    let income_info = json!({"approvedReceiptUuid": "r-1", "cancellationInfo": {"comment": "Возврат средств"}});
    let transport = RecordingTransport::replying([json!({"incomeInfo": income_info.clone()})]);

    let info = client(&transport)
        .income()
        .cancel("r-1", CancelReason::Refund, None, Some("partner-7"))
        .unwrap();
    assert_eq!(info, income_info);

    assert_eq!(
        transport.calls()[0],
        Call::Post(
            "/cancel".to_string(),
            json!({
                "operationTime": "2024-04-01T09:00:00Z",
                "requestTime": "2024-04-01T09:00:00Z",
                "comment": "Возврат средств",
                "receiptUuid": "r-1",
                "partnerCode": "partner-7"
            })
        )
    );
}

#[test]
fn cancel_rejects_blank_uuid() {
    let transport = RecordingTransport::default();
    let err = client(&transport)
        .income()
        .cancel("  ", CancelReason::IssuedByMistake, None, None)
        .unwrap_err();
    assert!(err.downcast_ref::<ValidationError>().is_some());
    assert!(transport.calls().is_empty());
}

#[test]
fn tax_history_and_payments() {
    init_logger();
    let transport = RecordingTransport::replying([
        json!({"totalForPayment": 1200, "penaltyAmount": 0}),
        json!({"records": [{"krsbTaxChargeId": 1}, {"krsbTaxChargeId": 2}]}),
        json!({"records": []}),
    ]);
    let client = client(&transport);
    let tax = client.tax();

    let current = tax.get().unwrap();
    assert_eq!(current.get("totalForPayment"), Some(&json!(1200)));

    let history = tax.history(Some("45000000")).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].get("krsbTaxChargeId"), Some(&json!(2)));

    let payments = tax.payments(None, true).unwrap();
    assert!(payments.is_empty());

    assert_eq!(
        transport.calls(),
        vec![
            Call::Get("/taxes".to_string()),
            Call::Post("/taxes/history".to_string(), json!({"oktmo": "45000000"})),
            Call::Post(
                "/taxes/payments".to_string(),
                json!({"oktmo": null, "onlyPaid": true})
            ),
        ]
    );
}

#[test]
fn malformed_records_are_unexpected_response() {
    let transport = RecordingTransport::replying([json!({"records": "nope"})]);
    let err = client(&transport).tax().history(None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::UnexpectedResponse { path, .. }) if path == "/taxes/history"
    ));
}

#[test]
fn receipt_urls_use_own_inn() {
    let transport = RecordingTransport::replying([json!({"totalAmount": "5000.00"})]);
    let config = ClientConfig::new("123456789012").with_base_url("https://lknpd.example/api/v1/");
    let client = Client::new(&transport, config);
    let receipt = client.receipt();

    assert_eq!(
        receipt.print_url("r-1").unwrap(),
        "https://lknpd.example/api/v1/receipt/123456789012/r-1/print"
    );
    assert!(receipt.print_url("").is_err());

    let json = receipt.json("r-1").unwrap();
    assert_eq!(json["totalAmount"], "5000.00");
    assert_eq!(
        transport.calls(),
        vec![Call::Get("/receipt/123456789012/r-1/json".to_string())]
    );
}

#[test]
fn user_profile() {
    let transport = RecordingTransport::replying([json!({
        "id": 7,
        "displayName": "Иван Иванов",
        "phone": "79001234567",
        "inn": "123456789012",
        "avatarExists": false,
        "registrationDate": "2021-05-01T00:00:00Z",
        "hideCancelledReceipt": false,
        "registerAvailable": null,
        "restrictedMode": false
    })]);

    let user = client(&transport).user().get().unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.display_name, "Иван Иванов");
    assert!(user.registration_date.is_some());
    assert_eq!(transport.calls(), vec![Call::Get("/user".to_string())]);
}
