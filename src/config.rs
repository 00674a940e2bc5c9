use crate::error::ValidationError;
use crate::model::DeviceInfo;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://lknpd.nalog.ru/api/v1";

/// Settings shared by the REST wrappers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// The authenticated taxpayer's own INN, used in receipt URLs
    pub inn: String,
    pub device_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            inn: String::new(),
            device_id: None,
        }
    }
}

impl ClientConfig {
    pub fn new(inn: impl Into<String>) -> Self {
        ClientConfig {
            inn: inn.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalized()
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn device_info(&self) -> Result<DeviceInfo, ValidationError> {
        DeviceInfo::new(self.device_id.as_deref().unwrap_or_default())
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        self.base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }
}
