use crate::error::ValidationError;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// One billable line of a receipt
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ServiceItem {
    /// Service name as printed on the receipt
    name: String,
    /// Price per unit
    #[schemars(with = "String")]
    amount: Decimal,
    #[schemars(with = "String")]
    quantity: Decimal,
}

impl ServiceItem {
    /// Build a line item. The name is trimmed; amount and quantity must be
    /// strictly positive.
    pub fn new(
        name: impl AsRef<str>,
        amount: Decimal,
        quantity: Decimal,
    ) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        ensure_positive("amount", amount)?;
        ensure_positive("quantity", quantity)?;

        Ok(ServiceItem {
            name: name.to_string(),
            amount,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Line total, amount × quantity. Fails instead of rounding when the
    /// product does not fit a `Decimal` exactly.
    pub fn total(&self) -> Result<Decimal, ValidationError> {
        let total = self
            .amount
            .checked_mul(self.quantity)
            .ok_or_else(|| out_of_range(format!("{} × {} overflows", self.amount, self.quantity)))?;

        if total.scale() < product_scale(self.amount, self.quantity) {
            return Err(out_of_range(format!(
                "{} × {} needs more than {} decimal places",
                self.amount,
                self.quantity,
                total.scale()
            )));
        }
        Ok(total)
    }

    /// Sum of the line totals of `items`
    pub fn total_of<'a>(
        items: impl IntoIterator<Item = &'a ServiceItem>,
    ) -> Result<Decimal, ValidationError> {
        items.into_iter().try_fold(Decimal::ZERO, |sum, item| {
            let line = item.total()?;
            let next = sum
                .checked_add(line)
                .ok_or_else(|| out_of_range(format!("{sum} + {line} overflows")))?;

            // addition only rounds when an operand has digits below the result scale
            if next.scale() < sum.normalize().scale().max(line.normalize().scale()) {
                return Err(out_of_range(format!("{sum} + {line} loses precision")));
            }
            Ok(next)
        })
    }

    pub fn to_wire(&self) -> Value {
        json!({
            "name": self.name,
            "amount": self.amount.to_string(),
            "quantity": self.quantity.to_string(),
        })
    }
}

fn ensure_positive(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveValue { field, value });
    }
    Ok(())
}

fn out_of_range(detail: String) -> ValidationError {
    ValidationError::OutOfRange {
        field: "total",
        detail,
    }
}

/// Decimal places needed to hold the exact product of `a` and `b`
fn product_scale(a: Decimal, b: Decimal) -> u32 {
    let (a, b) = (a.normalize(), b.normalize());
    let (ma, mb) = (a.mantissa().unsigned_abs(), b.mantissa().unsigned_abs());
    let twos = factor_count(ma, 2) + factor_count(mb, 2);
    let fives = factor_count(ma, 5) + factor_count(mb, 5);
    (a.scale() + b.scale()).saturating_sub(twos.min(fives))
}

fn factor_count(mut n: u128, factor: u128) -> u32 {
    let mut count = 0;
    while n != 0 && n % factor == 0 {
        n /= factor;
        count += 1;
    }
    count
}

impl Serialize for ServiceItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

#[derive(Deserialize)]
struct WireServiceItem {
    name: String,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    quantity: Decimal,
}

impl<'de> Deserialize<'de> for ServiceItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireServiceItem::deserialize(deserializer)?;
        ServiceItem::new(wire.name, wire.amount, wire.quantity).map_err(serde::de::Error::custom)
    }
}
