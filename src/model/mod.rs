pub mod client;
pub mod device;
pub mod enums;
pub mod records;
pub mod request;
pub mod service;
pub mod timestamp;
pub mod user;

// Flat public surface for the wire data model.
pub use client::{ClientInfo, ClientInfoBuilder};
pub use device::DeviceInfo;
pub use enums::{CancelReason, IncomeType, PaymentType};
pub use records::{History, HistoryRecords, Payment, PaymentRecords, Records, Tax};
pub use request::{CancelRequest, IncomeRequest, IncomeRequestBuilder};
pub use service::ServiceItem;
pub use timestamp::{Clock, FixedClock, SystemClock, Timestamp};
pub use user::{RegisterAvailable, UserProfile};
