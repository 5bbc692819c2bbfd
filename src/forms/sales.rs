use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::sale::{NewSale, PaymentMethod};
use crate::forms::{AmountError, AmountInput, sanitize_optional};

pub type SaleFormResult<T> = Result<T, SaleFormError>;

#[derive(Debug, Error)]
pub enum SaleFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Invalid total amount: {0}")]
    InvalidAmount(#[from] AmountError),
    #[error("Invalid payment method. Must be one of: cash, card, free")]
    InvalidPaymentMethod,
}

/// Payload of `POST /api/sales`.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordSaleForm {
    #[validate(range(min = 1))]
    pub inventory_id: i32,
    #[validate(range(min = 1))]
    pub show_id: i32,
    #[validate(range(min = 1))]
    pub quantity_sold: i32,
    pub total_amount: AmountInput,
    pub payment_method: String,
    #[serde(default)]
    pub size: Option<String>,
}

impl RecordSaleForm {
    pub fn into_new_sale(self) -> SaleFormResult<NewSale> {
        self.validate()?;

        let payment_method = parse_payment_method(&self.payment_method)?;
        let total_amount_cents = self.total_amount.to_cents()?;

        let sale = NewSale::new(
            self.inventory_id,
            self.show_id,
            self.quantity_sold,
            total_amount_cents,
            payment_method,
        );

        Ok(match sanitize_optional(self.size.as_deref()) {
            Some(size) => sale.with_size(size),
            None => sale,
        })
    }
}

/// Payload of `POST /api/sales/bundle`.
#[derive(Debug, Deserialize, Validate)]
pub struct SellBundleForm {
    #[validate(range(min = 1))]
    pub bundle_id: i32,
    #[validate(range(min = 1))]
    pub show_id: i32,
    #[validate(range(min = 1))]
    pub quantity_sold: i32,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// A validated bundle sale; the total is derived from the bundle price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSale {
    pub bundle_id: i32,
    pub show_id: i32,
    pub quantity_sold: i32,
    pub payment_method: PaymentMethod,
}

impl SellBundleForm {
    pub fn into_bundle_sale(self) -> SaleFormResult<BundleSale> {
        self.validate()?;

        let payment_method = match self.payment_method.as_deref() {
            Some(method) => parse_payment_method(method)?,
            None => PaymentMethod::Cash,
        };

        Ok(BundleSale {
            bundle_id: self.bundle_id,
            show_id: self.show_id,
            quantity_sold: self.quantity_sold,
            payment_method,
        })
    }
}

/// Query string of `GET /api/sales`.
#[derive(Debug, Deserialize)]
pub struct ShowSalesQuery {
    pub show_id: i32,
}

/// Query string of `GET /api/sales/tour`.
#[derive(Debug, Deserialize)]
pub struct TourSalesQuery {
    pub tour_id: i32,
}

fn parse_payment_method(value: &str) -> SaleFormResult<PaymentMethod> {
    value
        .trim()
        .to_lowercase()
        .parse()
        .map_err(|_| SaleFormError::InvalidPaymentMethod)
}
