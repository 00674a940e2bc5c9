use crate::error::ValidationError;
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Implements string conversion, serde and schema support for a closed set
/// of wire constants. The variant tag and its wire string stay separate.
macro_rules! wire_enum {
    ($name:ident, $type_name:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Exact string sent over the wire
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ValidationError::InvalidEnumValue {
                        type_name: $type_name,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }

        impl JsonSchema for $name {
            fn schema_name() -> String {
                stringify!($name).to_string()
            }

            fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
                SchemaObject {
                    instance_type: Some(InstanceType::String.into()),
                    enum_values: Some($name::ALL.iter().map(|v| v.as_str().into()).collect()),
                    ..Default::default()
                }
                .into()
            }
        }
    };
}

/// Who paid for the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IncomeType {
    #[default]
    FromIndividual,
    FromLegalEntity,
    FromForeignAgency,
}

wire_enum!(IncomeType, "income type", {
    FromIndividual => "FROM_INDIVIDUAL",
    FromLegalEntity => "FROM_LEGAL_ENTITY",
    FromForeignAgency => "FROM_FOREIGN_AGENCY",
});

/// How the client settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentType {
    #[default]
    Cash,
    Account,
}

wire_enum!(PaymentType, "payment type", {
    Cash => "CASH",
    Account => "ACCOUNT",
});

/// Reason a receipt is cancelled.
///
/// The upstream API takes the human-readable sentence itself as the value,
/// so there is no short code on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    IssuedByMistake,
    Refund,
}

wire_enum!(CancelReason, "cancel reason", {
    IssuedByMistake => "Чек сформирован ошибочно",
    Refund => "Возврат средств",
});
