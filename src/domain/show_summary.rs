use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::sale::PaymentMethod;

/// Number of entries kept in a summary's best-seller ranking.
pub const BEST_SELLER_LIMIT: usize = 3;

/// An item ranked by units sold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestSeller {
    pub name: String,
    pub total_sold: i64,
}

/// Units sold per item name and size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemSold {
    pub name: String,
    pub size: Option<String>,
    pub total_sold: i64,
}

/// Frozen financial snapshot of a closed show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowSummary {
    pub id: i32,
    pub show_id: i32,
    pub total_sales_cents: i64,
    pub total_cash_cents: i64,
    pub total_card_cents: i64,
    pub total_transactions: i32,
    pub best_selling_items: Vec<BestSeller>,
    pub items_sold: Vec<ItemSold>,
    pub created_at: NaiveDateTime,
}

/// A summary joined with the display fields of its show and tour.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShowSummaryDetails {
    #[serde(flatten)]
    pub summary: ShowSummary,
    pub venue: String,
    pub date: NaiveDate,
    pub tour_name: String,
    pub band_name: String,
}

/// One sale as seen by the summary engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SoldLine {
    pub item_name: String,
    pub size: Option<String>,
    pub quantity_sold: i32,
    pub total_amount_cents: i64,
    pub payment_method: PaymentMethod,
}

/// A money total that no longer fits in an `i64` of cents.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("sales total is too large")]
pub struct TotalOverflow;

/// Sum amounts in cents, failing instead of wrapping.
pub fn checked_total(amounts: impl IntoIterator<Item = i64>) -> Result<i64, TotalOverflow> {
    amounts
        .into_iter()
        .try_fold(0i64, i64::checked_add)
        .ok_or(TotalOverflow)
}

/// Aggregates computed at close time, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShowSummary {
    pub show_id: i32,
    pub total_sales_cents: i64,
    pub total_cash_cents: i64,
    pub total_card_cents: i64,
    pub total_transactions: i32,
    pub best_selling_items: Vec<BestSeller>,
    pub items_sold: Vec<ItemSold>,
}

impl NewShowSummary {
    /// Aggregate every sale recorded for `show_id`.
    pub fn from_sales(show_id: i32, lines: &[SoldLine]) -> Result<Self, TotalOverflow> {
        let mut total_sales_cents = 0i64;
        let mut total_cash_cents = 0i64;
        let mut total_card_cents = 0i64;
        let mut by_name: HashMap<&str, i64> = HashMap::new();
        let mut by_name_and_size: HashMap<(&str, Option<&str>), i64> = HashMap::new();

        for line in lines {
            let amount = line.total_amount_cents;
            total_sales_cents = total_sales_cents.checked_add(amount).ok_or(TotalOverflow)?;
            match line.payment_method {
                PaymentMethod::Cash => {
                    total_cash_cents = total_cash_cents.checked_add(amount).ok_or(TotalOverflow)?;
                }
                PaymentMethod::Card => {
                    total_card_cents = total_card_cents.checked_add(amount).ok_or(TotalOverflow)?;
                }
                PaymentMethod::Free => {}
            }

            let quantity = i64::from(line.quantity_sold);
            *by_name.entry(line.item_name.as_str()).or_default() += quantity;
            *by_name_and_size
                .entry((line.item_name.as_str(), line.size.as_deref()))
                .or_default() += quantity;
        }

        let mut best_selling_items: Vec<BestSeller> = by_name
            .into_iter()
            .map(|(name, total_sold)| BestSeller {
                name: name.to_string(),
                total_sold,
            })
            .collect();
        best_selling_items.sort_by(|a, b| {
            b.total_sold
                .cmp(&a.total_sold)
                .then_with(|| a.name.cmp(&b.name))
        });
        best_selling_items.truncate(BEST_SELLER_LIMIT);

        let mut items_sold: Vec<ItemSold> = by_name_and_size
            .into_iter()
            .map(|((name, size), total_sold)| ItemSold {
                name: name.to_string(),
                size: size.map(str::to_string),
                total_sold,
            })
            .collect();
        items_sold.sort_by(|a, b| {
            b.total_sold
                .cmp(&a.total_sold)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.size.cmp(&b.size))
        });

        Ok(Self {
            show_id,
            total_sales_cents,
            total_cash_cents,
            total_card_cents,
            total_transactions: lines.len() as i32,
            best_selling_items,
            items_sold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, size: Option<&str>, qty: i32, cents: i64, method: PaymentMethod) -> SoldLine {
        SoldLine {
            item_name: name.to_string(),
            size: size.map(str::to_string),
            quantity_sold: qty,
            total_amount_cents: cents,
            payment_method: method,
        }
    }

    #[test]
    fn totals_split_by_payment_method() {
        let lines = vec![
            line("Poster", None, 1, 2000, PaymentMethod::Cash),
            line("Poster", None, 1, 3000, PaymentMethod::Cash),
            line("T-Shirt", Some("M"), 1, 3000, PaymentMethod::Card),
        ];

        let summary = NewShowSummary::from_sales(9, &lines).expect("summary");

        assert_eq!(summary.show_id, 9);
        assert_eq!(summary.total_sales_cents, 8000);
        assert_eq!(summary.total_cash_cents, 5000);
        assert_eq!(summary.total_card_cents, 3000);
        assert_eq!(summary.total_transactions, 3);
    }

    #[test]
    fn free_sales_count_as_transactions_only() {
        let lines = vec![
            line("Sticker", None, 5, 0, PaymentMethod::Free),
            line("Sticker", None, 1, 300, PaymentMethod::Cash),
        ];

        let summary = NewShowSummary::from_sales(1, &lines).expect("summary");

        assert_eq!(summary.total_sales_cents, 300);
        assert_eq!(summary.total_card_cents, 0);
        assert_eq!(summary.total_transactions, 2);
        assert_eq!(
            summary.best_selling_items,
            vec![BestSeller {
                name: "Sticker".to_string(),
                total_sold: 6
            }]
        );
    }

    #[test]
    fn best_sellers_keep_top_three_by_units() {
        let lines = vec![
            line("Poster", None, 2, 4000, PaymentMethod::Cash),
            line("Hoodie", Some("L"), 4, 20000, PaymentMethod::Card),
            line("Hoodie", Some("S"), 1, 5000, PaymentMethod::Card),
            line("Pin", None, 7, 3500, PaymentMethod::Cash),
            line("Vinyl", None, 1, 3000, PaymentMethod::Cash),
        ];

        let summary = NewShowSummary::from_sales(1, &lines).expect("summary");
        let names: Vec<&str> = summary
            .best_selling_items
            .iter()
            .map(|item| item.name.as_str())
            .collect();

        assert_eq!(names, vec!["Pin", "Hoodie", "Poster"]);
        assert_eq!(summary.best_selling_items[1].total_sold, 5);
    }

    #[test]
    fn breakdown_groups_by_name_and_size() {
        let lines = vec![
            line("T-Shirt", Some("M"), 2, 5000, PaymentMethod::Cash),
            line("T-Shirt", Some("M"), 1, 2500, PaymentMethod::Card),
            line("T-Shirt", Some("S"), 1, 2500, PaymentMethod::Card),
            line("Poster", None, 1, 2000, PaymentMethod::Cash),
        ];

        let summary = NewShowSummary::from_sales(1, &lines).expect("summary");

        assert_eq!(
            summary.items_sold,
            vec![
                ItemSold {
                    name: "T-Shirt".to_string(),
                    size: Some("M".to_string()),
                    total_sold: 3
                },
                ItemSold {
                    name: "Poster".to_string(),
                    size: None,
                    total_sold: 1
                },
                ItemSold {
                    name: "T-Shirt".to_string(),
                    size: Some("S".to_string()),
                    total_sold: 1
                },
            ]
        );
    }

    #[test]
    fn empty_show_produces_zero_summary() {
        let summary = NewShowSummary::from_sales(3, &[]).expect("summary");

        assert_eq!(summary.total_sales_cents, 0);
        assert_eq!(summary.total_transactions, 0);
        assert!(summary.best_selling_items.is_empty());
        assert!(summary.items_sold.is_empty());
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let half = i64::MAX / 2 + 1;
        let lines = vec![
            line("Poster", None, 1, half, PaymentMethod::Cash),
            line("Poster", None, 1, half, PaymentMethod::Cash),
        ];

        assert_eq!(NewShowSummary::from_sales(1, &lines), Err(TotalOverflow));
        assert_eq!(checked_total([half, half]), Err(TotalOverflow));
        assert_eq!(checked_total([2000, 3000]), Ok(5000));
        assert_eq!(checked_total([]), Ok(0));
    }
}
