use super::enums::IncomeType;
use crate::error::ValidationError;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// Counter-party named on a receipt.
///
/// Only the INN is checked here. Whether a legal entity must also carry a
/// display name is a business rule enforced by the income API wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[schemars(rename_all = "camelCase")]
pub struct ClientInfo {
    contact_phone: Option<String>,
    display_name: Option<String>,
    income_type: IncomeType,
    /// Taxpayer number, 10 digits for organisations and 12 for individuals
    inn: Option<String>,
}

impl ClientInfo {
    pub fn new(
        contact_phone: Option<&str>,
        display_name: Option<&str>,
        income_type: IncomeType,
        inn: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(ClientInfo {
            contact_phone: non_blank(contact_phone),
            display_name: non_blank(display_name),
            income_type,
            inn: validate_inn(inn)?,
        })
    }

    pub fn builder() -> ClientInfoBuilder {
        ClientInfoBuilder::default()
    }

    pub fn contact_phone(&self) -> Option<&str> {
        self.contact_phone.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn income_type(&self) -> IncomeType {
        self.income_type
    }

    pub fn inn(&self) -> Option<&str> {
        self.inn.as_deref()
    }

    /// All four keys are always present, absent values as null.
    pub fn to_wire(&self) -> Value {
        json!({
            "contactPhone": self.contact_phone,
            "displayName": self.display_name,
            "incomeType": self.income_type.as_str(),
            "inn": self.inn,
        })
    }
}

/// Collects optional client fields before a single validated build
#[derive(Debug, Clone, Default)]
pub struct ClientInfoBuilder {
    contact_phone: Option<String>,
    display_name: Option<String>,
    income_type: IncomeType,
    inn: Option<String>,
}

impl ClientInfoBuilder {
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_income_type(mut self, income_type: IncomeType) -> Self {
        self.income_type = income_type;
        self
    }

    pub fn with_inn(mut self, inn: impl Into<String>) -> Self {
        self.inn = Some(inn.into());
        self
    }

    pub fn build(self) -> Result<ClientInfo, ValidationError> {
        ClientInfo::new(
            self.contact_phone.as_deref(),
            self.display_name.as_deref(),
            self.income_type,
            self.inn.as_deref(),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn validate_inn(inn: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(inn) = non_blank(inn) else {
        return Ok(None);
    };

    if !inn.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "inn",
            value: inn,
        });
    }
    if inn.len() != 10 && inn.len() != 12 {
        return Err(ValidationError::InvalidLength {
            field: "inn",
            len: inn.len(),
        });
    }

    Ok(Some(inn))
}

impl Serialize for ClientInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireClientInfo {
    #[serde(default)]
    contact_phone: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    income_type: IncomeType,
    #[serde(default)]
    inn: Option<String>,
}

impl<'de> Deserialize<'de> for ClientInfo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireClientInfo::deserialize(deserializer)?;
        ClientInfo::new(
            wire.contact_phone.as_deref(),
            wire.display_name.as_deref(),
            wire.income_type,
            wire.inn.as_deref(),
        )
        .map_err(serde::de::Error::custom)
    }
}
