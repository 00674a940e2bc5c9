use super::Transport;
use crate::config::ClientConfig;
use crate::error::ValidationError;
use log::debug;
use serde_json::Value;

/// Access to issued receipts of the configured taxpayer
pub struct ReceiptApi<'a, T> {
    transport: &'a T,
    config: &'a ClientConfig,
}

impl<'a, T: Transport> ReceiptApi<'a, T> {
    pub fn new(transport: &'a T, config: &'a ClientConfig) -> Self {
        ReceiptApi { transport, config }
    }

    /// Absolute URL of the printable receipt
    pub fn print_url(&self, receipt_uuid: &str) -> Result<String, ValidationError> {
        let path = self.receipt_path(receipt_uuid)?;
        Ok(format!("{}{path}/print", self.config.base_url))
    }

    /// Receipt contents as returned by the service
    pub fn json(&self, receipt_uuid: &str) -> anyhow::Result<Value> {
        let path = format!("{}/json", self.receipt_path(receipt_uuid)?);
        debug!("GET {path}");
        Ok(self.transport.get(&path)?.into_json())
    }

    fn receipt_path(&self, receipt_uuid: &str) -> Result<String, ValidationError> {
        let receipt_uuid = receipt_uuid.trim();
        if receipt_uuid.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "receipt_uuid",
            });
        }
        Ok(format!("/receipt/{}/{receipt_uuid}", self.config.inn))
    }
}
