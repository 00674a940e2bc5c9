//! Client-side data model for the "Moy Nalog" self-employed tax API.
//!
//! Value objects ([`ServiceItem`], [`ClientInfo`], [`Timestamp`]) validate at
//! construction and render the exact JSON the service expects. Request
//! bodies ([`IncomeRequest`], [`CancelRequest`]) aggregate them, and the
//! [`api`] wrappers pass those bodies to a caller-supplied [`Transport`].
//!
//! ```
//! use nalog::{ClientInfo, IncomeRequest, ServiceItem};
//! use rust_decimal::Decimal;
//!
//! let item = ServiceItem::new("Consulting", Decimal::new(500000, 2), Decimal::ONE)?;
//! let client = ClientInfo::builder().with_inn("1234567890").build()?;
//! let request = IncomeRequest::builder(vec![item], "5000.00").client(client).build()?;
//! assert_eq!(request.to_wire()["services"][0]["amount"], "5000.00");
//! # Ok::<(), nalog::ValidationError>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod schema;

pub use api::{Client, Response, Transport};
pub use config::ClientConfig;
pub use error::{ApiError, ValidationError, ValidationErrorKind};
pub use model::{
    CancelReason, CancelRequest, ClientInfo, Clock, DeviceInfo, FixedClock, History,
    HistoryRecords, IncomeRequest, IncomeType, Payment, PaymentRecords, PaymentType, Records,
    ServiceItem, SystemClock, Tax, Timestamp, UserProfile,
};
