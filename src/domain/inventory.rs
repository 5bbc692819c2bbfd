use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The three stock-keeping variants an inventory item can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Single scalar quantity.
    #[default]
    Hard,
    /// Stock partitioned by size label.
    Soft,
    /// Composite of other items; its quantity is derived from the components.
    Bundle,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Hard => "hard",
            ItemType::Soft => "soft",
            ItemType::Bundle => "bundle",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hard" => Ok(ItemType::Hard),
            "soft" => Ok(ItemType::Soft),
            "bundle" => Ok(ItemType::Bundle),
            other => Err(format!("unknown item type `{other}`")),
        }
    }
}

/// Quantity on hand for one size of a soft item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeStock {
    pub size: String,
    pub quantity: i32,
}

impl SizeStock {
    pub fn new(size: impl Into<String>, quantity: i32) -> Self {
        Self {
            size: size.into(),
            quantity,
        }
    }
}

/// A component of a bundle resolved against its inventory row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundleComponent {
    pub id: i32,
    pub name: String,
    pub item_type: ItemType,
    pub price_cents: i64,
    pub image_url: Option<String>,
    /// Availability of the component captured when the bundle was created.
    pub quantity: i32,
    /// Current size rows when the component is a soft item.
    pub sizes: Option<Vec<SizeStock>>,
}

/// An inventory item, enriched with its sizes (soft) or components (bundle).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub id: i32,
    pub tour_id: i32,
    pub name: String,
    pub item_type: ItemType,
    pub price_cents: i64,
    pub image_url: Option<String>,
    /// Only meaningful for hard items and bundles.
    pub quantity: Option<i32>,
    pub created_at: NaiveDateTime,
    pub sizes: Vec<SizeStock>,
    pub components: Vec<BundleComponent>,
}

impl InventoryItem {
    /// Units that can currently be sold: the scalar quantity for hard items and
    /// bundles, the smallest size row for soft items.
    pub fn available_quantity(&self) -> i32 {
        match self.item_type {
            ItemType::Hard | ItemType::Bundle => self.quantity.unwrap_or(0),
            ItemType::Soft => self
                .sizes
                .iter()
                .map(|size| size.quantity)
                .min()
                .unwrap_or(0),
        }
    }
}

/// Payload required to insert a hard or soft item.
#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub tour_id: i32,
    pub name: String,
    pub item_type: ItemType,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub quantity: Option<i32>,
    pub sizes: Vec<SizeStock>,
}

impl NewInventoryItem {
    /// A hard item with a single scalar quantity.
    pub fn hard(tour_id: i32, name: impl Into<String>, price_cents: i64, quantity: i32) -> Self {
        Self {
            tour_id,
            name: name.into(),
            item_type: ItemType::Hard,
            price_cents,
            image_url: None,
            quantity: Some(quantity),
            sizes: Vec::new(),
        }
    }

    /// A soft item whose stock lives in one row per size.
    pub fn soft(
        tour_id: i32,
        name: impl Into<String>,
        price_cents: i64,
        sizes: Vec<SizeStock>,
    ) -> Self {
        Self {
            tour_id,
            name: name.into(),
            item_type: ItemType::Soft,
            price_cents,
            image_url: None,
            quantity: None,
            sizes,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Payload required to create a bundle out of existing items.
#[derive(Debug, Clone)]
pub struct NewBundle {
    pub tour_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub item_ids: Vec<i32>,
}

impl NewBundle {
    pub fn new(tour_id: i32, name: impl Into<String>, price_cents: i64, item_ids: Vec<i32>) -> Self {
        Self {
            tour_id,
            name: name.into(),
            price_cents,
            image_url: None,
            item_ids,
        }
    }
}

/// Full overwrite of an item's editable fields.
///
/// `quantity` only applies to hard items and `sizes` only to soft items; each
/// listed size overwrites the matching row and unknown sizes are ignored.
#[derive(Debug, Clone)]
pub struct UpdateInventoryItem {
    pub name: String,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub quantity: Option<i32>,
    pub sizes: Vec<SizeStock>,
}

/// Displayed quantity of a bundle given each component's snapshot quantity.
/// A bundle can only be sold as often as its scarcest component allows.
pub fn bundle_quantity(snapshots: &[i32]) -> i32 {
    snapshots.iter().copied().min().unwrap_or(0)
}
