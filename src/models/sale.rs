use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::sale::{NewSale as DomainNewSale, Sale as DomainSale};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sales)]
pub struct Sale {
    pub id: i32,
    pub inventory_id: i32,
    pub show_id: i32,
    pub quantity_sold: i32,
    pub total_amount_cents: i64,
    pub payment_method: String,
    pub size: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sales)]
pub struct NewSale<'a> {
    pub inventory_id: i32,
    pub show_id: i32,
    pub quantity_sold: i32,
    pub total_amount_cents: i64,
    pub payment_method: &'a str,
    pub size: Option<&'a str>,
}

impl From<Sale> for DomainSale {
    fn from(value: Sale) -> Self {
        Self {
            id: value.id,
            inventory_id: value.inventory_id,
            show_id: value.show_id,
            quantity_sold: value.quantity_sold,
            total_amount_cents: value.total_amount_cents,
            payment_method: value.payment_method.parse().unwrap_or_default(),
            size: value.size,
            created_at: value.created_at,
        }
    }
}

impl<'a> NewSale<'a> {
    /// Row for `value`; `size` is the size actually decremented, if any.
    pub fn from_domain(value: &'a DomainNewSale, size: Option<&'a str>) -> Self {
        Self {
            inventory_id: value.inventory_id,
            show_id: value.show_id,
            quantity_sold: value.quantity_sold,
            total_amount_cents: value.total_amount_cents,
            payment_method: value.payment_method.as_str(),
            size,
        }
    }
}
