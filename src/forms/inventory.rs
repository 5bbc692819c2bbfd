use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::inventory::{
    ItemType, NewBundle, NewInventoryItem, SizeStock, UpdateInventoryItem,
};
use crate::forms::{AmountError, AmountInput, sanitize_inline_text, sanitize_optional};

const NAME_MAX_LEN: u64 = 128;
const SIZE_MAX_LEN: usize = 16;

pub type InventoryFormResult<T> = Result<T, InventoryFormError>;

#[derive(Debug, Error)]
pub enum InventoryFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Item name is required")]
    EmptyName,
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] AmountError),
    #[error("Invalid item type `{0}`")]
    UnknownType(String),
    #[error("Bundles are created through the bundle endpoint")]
    BundleNotAllowed,
    #[error("Hard items require a quantity")]
    MissingQuantity,
    #[error("Quantities cannot be negative")]
    NegativeQuantity,
    #[error("Soft items require at least one size")]
    MissingSizes,
    #[error("Size labels must be between 1 and {SIZE_MAX_LEN} characters")]
    InvalidSizeLabel,
    #[error("Size `{0}` is listed more than once")]
    DuplicateSize(String),
    #[error("A bundle needs at least one item")]
    NoBundleItems,
}

/// One size row as sent by clients.
#[derive(Debug, Clone, Deserialize)]
pub struct SizeInput {
    pub size: String,
    pub quantity: i32,
}

/// Payload of `POST /api/inventory`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddItemForm {
    #[validate(range(min = 1))]
    pub tour_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[serde(rename = "type", alias = "item_type")]
    pub item_type: String,
    pub price: AmountInput,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub sizes: Option<Vec<SizeInput>>,
}

impl AddItemForm {
    pub fn into_new_item(self) -> InventoryFormResult<NewInventoryItem> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(InventoryFormError::EmptyName);
        }
        let price_cents = self.price.to_cents()?;

        let item_type = self
            .item_type
            .trim()
            .to_lowercase()
            .parse::<ItemType>()
            .map_err(|_| InventoryFormError::UnknownType(self.item_type.clone()))?;

        let mut item = match item_type {
            ItemType::Hard => {
                let quantity = self.quantity.ok_or(InventoryFormError::MissingQuantity)?;
                if quantity < 0 {
                    return Err(InventoryFormError::NegativeQuantity);
                }
                NewInventoryItem::hard(self.tour_id, name, price_cents, quantity)
            }
            ItemType::Soft => {
                let sizes = self.sizes.unwrap_or_default();
                if sizes.is_empty() {
                    return Err(InventoryFormError::MissingSizes);
                }
                NewInventoryItem::soft(self.tour_id, name, price_cents, clean_sizes(&sizes)?)
            }
            ItemType::Bundle => return Err(InventoryFormError::BundleNotAllowed),
        };

        if let Some(image_url) = sanitize_optional(self.image_url.as_deref()) {
            item = item.with_image_url(image_url);
        }

        Ok(item)
    }
}

/// Component reference inside a bundle payload.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleItemInput {
    pub item_id: i32,
}

/// Payload of `POST /api/inventory/bundles?tour_id=`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddBundleForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub price: AmountInput,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub items: Vec<BundleItemInput>,
}

impl AddBundleForm {
    pub fn into_new_bundle(self, tour_id: i32) -> InventoryFormResult<NewBundle> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(InventoryFormError::EmptyName);
        }
        let price_cents = self.price.to_cents()?;
        if self.items.is_empty() {
            return Err(InventoryFormError::NoBundleItems);
        }

        let item_ids = self.items.iter().map(|item| item.item_id).collect();
        let mut bundle = NewBundle::new(tour_id, name, price_cents, item_ids);
        bundle.image_url = sanitize_optional(self.image_url.as_deref());

        Ok(bundle)
    }
}

/// Payload of `PUT /api/inventory/{id}`: a full overwrite of the editable fields.
#[derive(Debug, Deserialize, Validate)]
pub struct EditItemForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub price: AmountInput,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub sizes: Option<Vec<SizeInput>>,
}

impl EditItemForm {
    pub fn into_update_item(self) -> InventoryFormResult<UpdateInventoryItem> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(InventoryFormError::EmptyName);
        }
        if self.quantity.is_some_and(|quantity| quantity < 0) {
            return Err(InventoryFormError::NegativeQuantity);
        }

        let sizes = match &self.sizes {
            Some(sizes) => clean_sizes(sizes)?,
            None => Vec::new(),
        };

        Ok(UpdateInventoryItem {
            name,
            price_cents: self.price.to_cents()?,
            image_url: sanitize_optional(self.image_url.as_deref()),
            quantity: self.quantity,
            sizes,
        })
    }
}

/// Payload of `POST /api/inventory/update`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdjustStockForm {
    #[validate(range(min = 1))]
    pub inventory_id: i32,
    #[validate(range(min = 0))]
    pub new_quantity: i32,
    #[serde(default)]
    pub new_price: Option<AmountInput>,
}

/// A validated stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    pub inventory_id: i32,
    pub quantity: i32,
    pub price_cents: Option<i64>,
}

impl AdjustStockForm {
    pub fn into_adjustment(self) -> InventoryFormResult<StockAdjustment> {
        self.validate()?;

        let price_cents = self
            .new_price
            .as_ref()
            .map(AmountInput::to_cents)
            .transpose()?;

        Ok(StockAdjustment {
            inventory_id: self.inventory_id,
            quantity: self.new_quantity,
            price_cents,
        })
    }
}

/// Query string carrying the tour an inventory listing or bundle belongs to.
#[derive(Debug, Deserialize)]
pub struct TourScopeQuery {
    pub tour_id: i32,
}

fn clean_sizes(sizes: &[SizeInput]) -> InventoryFormResult<Vec<SizeStock>> {
    let mut seen = HashSet::with_capacity(sizes.len());
    let mut cleaned = Vec::with_capacity(sizes.len());

    for input in sizes {
        let label = sanitize_inline_text(&input.size);
        if label.is_empty() || label.chars().count() > SIZE_MAX_LEN {
            return Err(InventoryFormError::InvalidSizeLabel);
        }
        if input.quantity < 0 {
            return Err(InventoryFormError::NegativeQuantity);
        }
        if !seen.insert(label.clone()) {
            return Err(InventoryFormError::DuplicateSize(label));
        }
        cleaned.push(SizeStock::new(label, input.quantity));
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(label: &str, quantity: i32) -> SizeInput {
        SizeInput {
            size: label.to_string(),
            quantity,
        }
    }

    fn add_form(item_type: &str) -> AddItemForm {
        AddItemForm {
            tour_id: 1,
            name: " Poster ".to_string(),
            item_type: item_type.to_string(),
            price: AmountInput::from("20.00"),
            image_url: None,
            quantity: Some(10),
            sizes: None,
        }
    }

    #[test]
    fn hard_item_keeps_quantity_and_cents() {
        let item = add_form("hard").into_new_item().expect("valid item");

        assert_eq!(item.name, "Poster");
        assert_eq!(item.item_type, ItemType::Hard);
        assert_eq!(item.price_cents, 2000);
        assert_eq!(item.quantity, Some(10));
        assert!(item.sizes.is_empty());
    }

    #[test]
    fn hard_item_requires_non_negative_quantity() {
        let mut form = add_form("hard");
        form.quantity = None;
        assert!(matches!(
            form.into_new_item(),
            Err(InventoryFormError::MissingQuantity)
        ));

        let mut form = add_form("hard");
        form.quantity = Some(-1);
        assert!(matches!(
            form.into_new_item(),
            Err(InventoryFormError::NegativeQuantity)
        ));
    }

    #[test]
    fn soft_item_requires_unique_sizes() {
        let mut form = add_form("soft");
        form.sizes = Some(vec![size("S", 5), size("M", 2), size("L", 9)]);
        let item = form.into_new_item().expect("valid soft item");
        assert_eq!(item.quantity, None);
        assert_eq!(item.sizes.len(), 3);

        let mut form = add_form("soft");
        form.sizes = Some(vec![]);
        assert!(matches!(
            form.into_new_item(),
            Err(InventoryFormError::MissingSizes)
        ));

        let mut form = add_form("soft");
        form.sizes = Some(vec![size("M", 1), size(" M ", 3)]);
        assert!(matches!(
            form.into_new_item(),
            Err(InventoryFormError::DuplicateSize(label)) if label == "M"
        ));
    }

    #[test]
    fn bundles_and_unknown_types_are_rejected() {
        assert!(matches!(
            add_form("bundle").into_new_item(),
            Err(InventoryFormError::BundleNotAllowed)
        ));
        assert!(matches!(
            add_form("digital").into_new_item(),
            Err(InventoryFormError::UnknownType(_))
        ));
    }

    #[test]
    fn item_type_field_accepts_both_names() {
        let json = r#"{"tour_id":1,"name":"Pin","type":"hard","price":5,"quantity":3}"#;
        let form: AddItemForm = serde_json::from_str(json).expect("type field");
        assert_eq!(form.item_type, "hard");

        let json = r#"{"tour_id":1,"name":"Pin","item_type":"hard","price":"5.00","quantity":3}"#;
        let form: AddItemForm = serde_json::from_str(json).expect("item_type alias");
        assert_eq!(form.into_new_item().map(|item| item.price_cents).ok(), Some(500));
    }

    #[test]
    fn bundle_form_requires_items() {
        let form = AddBundleForm {
            name: "Starter Pack".to_string(),
            price: AmountInput::from(45.0),
            image_url: None,
            items: vec![],
        };
        assert!(matches!(
            form.into_new_bundle(1),
            Err(InventoryFormError::NoBundleItems)
        ));

        let form = AddBundleForm {
            name: "Starter Pack".to_string(),
            price: AmountInput::from(45.0),
            image_url: Some(" ".to_string()),
            items: vec![BundleItemInput { item_id: 4 }, BundleItemInput { item_id: 9 }],
        };
        let bundle = form.into_new_bundle(1).expect("valid bundle");
        assert_eq!(bundle.item_ids, vec![4, 9]);
        assert_eq!(bundle.price_cents, 4500);
        assert!(bundle.image_url.is_none());
    }

    #[test]
    fn adjust_stock_converts_optional_price() {
        let form = AdjustStockForm {
            inventory_id: 3,
            new_quantity: 12,
            new_price: Some(AmountInput::from("7.5")),
        };

        assert_eq!(
            form.into_adjustment().expect("valid adjustment"),
            StockAdjustment {
                inventory_id: 3,
                quantity: 12,
                price_cents: Some(750),
            }
        );
    }

    #[test]
    fn adjust_stock_rejects_negative_quantity() {
        let form = AdjustStockForm {
            inventory_id: 3,
            new_quantity: -2,
            new_price: None,
        };

        assert!(matches!(
            form.into_adjustment(),
            Err(InventoryFormError::Validation(_))
        ));
    }
}
