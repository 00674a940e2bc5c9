use crate::error::ValidationError;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// Client device descriptor sent with authentication calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    source_type: String,
    source_device_id: String,
    app_version: String,
    user_agent: String,
}

impl DeviceInfo {
    pub const SOURCE_TYPE_WEB: &'static str = "WEB";
    pub const APP_VERSION: &'static str = "1.0.0";
    pub const USER_AGENT: &'static str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 11_2_2) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.192 Safari/537.36";

    /// Web device with the default app version and user agent
    pub fn new(source_device_id: &str) -> Result<Self, ValidationError> {
        let source_device_id = source_device_id.trim();
        if source_device_id.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "source_device_id",
            });
        }

        Ok(DeviceInfo {
            source_type: Self::SOURCE_TYPE_WEB.to_string(),
            source_device_id: source_device_id.to_string(),
            app_version: Self::APP_VERSION.to_string(),
            user_agent: Self::USER_AGENT.to_string(),
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn source_device_id(&self) -> &str {
        &self.source_device_id
    }

    pub fn to_wire(&self) -> Value {
        json!({
            "sourceType": self.source_type,
            "sourceDeviceId": self.source_device_id,
            "appVersion": self.app_version,
            "metaDetails": {
                "userAgent": self.user_agent,
            },
        })
    }
}

impl Serialize for DeviceInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}
