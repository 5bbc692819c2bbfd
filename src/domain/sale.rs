use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::inventory::{ItemType, SizeStock};

/// How a sale was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    /// Giveaway; always recorded with a zero total.
    Free,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Free];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Free => "free",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "free" => Ok(PaymentMethod::Free),
            other => Err(format!("unknown payment method `{other}`")),
        }
    }
}

/// A recorded transaction against a show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: i32,
    pub inventory_id: i32,
    pub show_id: i32,
    pub quantity_sold: i32,
    pub total_amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub size: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Payload handed to the sale-recording engine.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub inventory_id: i32,
    pub show_id: i32,
    pub quantity_sold: i32,
    pub total_amount_cents: i64,
    pub payment_method: PaymentMethod,
    /// Required for soft items; optional size override for bundles.
    pub size: Option<String>,
}

impl NewSale {
    /// Build a sale payload. Free sales are always charged zero.
    pub fn new(
        inventory_id: i32,
        show_id: i32,
        quantity_sold: i32,
        total_amount_cents: i64,
        payment_method: PaymentMethod,
    ) -> Self {
        let total_amount_cents = match payment_method {
            PaymentMethod::Free => 0,
            PaymentMethod::Cash | PaymentMethod::Card => total_amount_cents,
        };

        Self {
            inventory_id,
            show_id,
            quantity_sold,
            total_amount_cents,
            payment_method,
            size: None,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

/// A sale joined with the item it sold, as listed for a show.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SaleLine {
    pub id: i32,
    pub quantity_sold: i32,
    pub total_amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub size: Option<String>,
    pub created_at: NaiveDateTime,
    pub item_name: String,
    pub item_type: ItemType,
    pub price_cents: i64,
    /// Current size rows of the item when it is a soft item.
    pub sizes: Option<Vec<SizeStock>>,
}
