use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::show_summary::{
    NewShowSummary as DomainNewShowSummary, ShowSummary as DomainShowSummary,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::show_summaries)]
pub struct ShowSummary {
    pub id: i32,
    pub show_id: i32,
    pub total_sales_cents: i64,
    pub total_cash_cents: i64,
    pub total_card_cents: i64,
    pub total_transactions: i32,
    pub best_selling_items: String,
    pub items_sold: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::show_summaries)]
pub struct NewShowSummary {
    pub show_id: i32,
    pub total_sales_cents: i64,
    pub total_cash_cents: i64,
    pub total_card_cents: i64,
    pub total_transactions: i32,
    pub best_selling_items: String,
    pub items_sold: String,
}

impl TryFrom<ShowSummary> for DomainShowSummary {
    type Error = serde_json::Error;

    fn try_from(value: ShowSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id,
            show_id: value.show_id,
            total_sales_cents: value.total_sales_cents,
            total_cash_cents: value.total_cash_cents,
            total_card_cents: value.total_card_cents,
            total_transactions: value.total_transactions,
            best_selling_items: serde_json::from_str(&value.best_selling_items)?,
            items_sold: serde_json::from_str(&value.items_sold)?,
            created_at: value.created_at,
        })
    }
}

impl TryFrom<&DomainNewShowSummary> for NewShowSummary {
    type Error = serde_json::Error;

    fn try_from(value: &DomainNewShowSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            show_id: value.show_id,
            total_sales_cents: value.total_sales_cents,
            total_cash_cents: value.total_cash_cents,
            total_card_cents: value.total_card_cents,
            total_transactions: value.total_transactions,
            best_selling_items: serde_json::to_string(&value.best_selling_items)?,
            items_sold: serde_json::to_string(&value.items_sold)?,
        })
    }
}
