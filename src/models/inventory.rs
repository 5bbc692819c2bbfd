use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::inventory::{
    BundleComponent as DomainBundleComponent, InventoryItem as DomainInventoryItem,
    NewInventoryItem as DomainNewInventoryItem, SizeStock as DomainSizeStock,
    UpdateInventoryItem as DomainUpdateInventoryItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::inventory)]
pub struct Inventory {
    pub id: i32,
    pub tour_id: i32,
    pub name: String,
    pub item_type: String,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub quantity: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::inventory)]
pub struct NewInventory<'a> {
    pub tour_id: i32,
    pub name: &'a str,
    pub item_type: &'a str,
    pub price_cents: i64,
    pub image_url: Option<&'a str>,
    pub quantity: Option<i32>,
}

/// Overwrites name, price and image; a `None` image clears the stored one.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::inventory)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateInventory<'a> {
    pub name: &'a str,
    pub price_cents: i64,
    pub image_url: Option<&'a str>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::inventory_sizes)]
#[diesel(belongs_to(Inventory, foreign_key = inventory_id))]
pub struct InventorySize {
    pub id: i32,
    pub inventory_id: i32,
    pub size: String,
    pub quantity: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::inventory_sizes)]
pub struct NewInventorySize<'a> {
    pub inventory_id: i32,
    pub size: &'a str,
    pub quantity: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::bundle_items)]
pub struct BundleItem {
    pub id: i32,
    pub bundle_id: i32,
    pub item_id: i32,
    pub quantity: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bundle_items)]
pub struct NewBundleItem {
    pub bundle_id: i32,
    pub item_id: i32,
    pub quantity: i32,
}

impl Inventory {
    pub fn into_domain(
        self,
        sizes: Vec<DomainSizeStock>,
        components: Vec<DomainBundleComponent>,
    ) -> DomainInventoryItem {
        DomainInventoryItem {
            id: self.id,
            tour_id: self.tour_id,
            name: self.name,
            item_type: self.item_type.parse().unwrap_or_default(),
            price_cents: self.price_cents,
            image_url: self.image_url,
            quantity: self.quantity,
            created_at: self.created_at,
            sizes,
            components,
        }
    }

    /// Describe this row as a component of a bundle.
    pub fn into_component(
        self,
        snapshot_quantity: i32,
        sizes: Option<Vec<DomainSizeStock>>,
    ) -> DomainBundleComponent {
        DomainBundleComponent {
            id: self.id,
            name: self.name,
            item_type: self.item_type.parse().unwrap_or_default(),
            price_cents: self.price_cents,
            image_url: self.image_url,
            quantity: snapshot_quantity,
            sizes,
        }
    }
}

impl From<InventorySize> for DomainSizeStock {
    fn from(value: InventorySize) -> Self {
        Self {
            size: value.size,
            quantity: value.quantity,
        }
    }
}

impl<'a> From<&'a DomainNewInventoryItem> for NewInventory<'a> {
    fn from(value: &'a DomainNewInventoryItem) -> Self {
        Self {
            tour_id: value.tour_id,
            name: value.name.as_str(),
            item_type: value.item_type.as_str(),
            price_cents: value.price_cents,
            image_url: value.image_url.as_deref(),
            quantity: value.quantity,
        }
    }
}

impl<'a> NewInventorySize<'a> {
    pub fn from_domain(inventory_id: i32, value: &'a DomainSizeStock) -> Self {
        Self {
            inventory_id,
            size: value.size.as_str(),
            quantity: value.quantity,
        }
    }
}

impl<'a> From<&'a DomainUpdateInventoryItem> for UpdateInventory<'a> {
    fn from(value: &'a DomainUpdateInventoryItem) -> Self {
        Self {
            name: value.name.as_str(),
            price_cents: value.price_cents,
            image_url: value.image_url.as_deref(),
        }
    }
}
