use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::inventory::{
    BundleComponent, InventoryItem, ItemType, NewBundle, NewInventoryItem, SizeStock,
    UpdateInventoryItem, bundle_quantity,
};
use crate::models::inventory::{
    Inventory as DbInventory, InventorySize as DbInventorySize, NewBundleItem as DbNewBundleItem,
    NewInventory as DbNewInventory, NewInventorySize as DbNewInventorySize,
    UpdateInventory as DbUpdateInventory,
};
use crate::repository::{
    DieselRepository, InventoryReader, InventoryWriter, RepositoryError, RepositoryResult,
};

impl InventoryReader for DieselRepository {
    fn get_item_by_id(&self, id: i32) -> RepositoryResult<Option<InventoryItem>> {
        let mut conn = self.conn()?;

        match find_row(&mut conn, id)? {
            Some(row) => Ok(Some(hydrate(&mut conn, row)?)),
            None => Ok(None),
        }
    }

    fn list_items(&self, tour_id: i32) -> RepositoryResult<Vec<InventoryItem>> {
        use crate::schema::inventory;

        let mut conn = self.conn()?;

        let rows = inventory::table
            .filter(inventory::tour_id.eq(tour_id))
            .order(inventory::id.asc())
            .select(DbInventory::as_select())
            .load::<DbInventory>(&mut conn)?;

        rows.into_iter()
            .map(|row| hydrate(&mut conn, row))
            .collect()
    }

    fn item_exists(&self, tour_id: i32, name: &str, item_type: ItemType) -> RepositoryResult<bool> {
        use crate::schema::inventory;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(
            inventory::table
                .filter(inventory::tour_id.eq(tour_id))
                .filter(inventory::name.eq(name))
                .filter(inventory::item_type.eq(item_type.as_str())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }
}

impl InventoryWriter for DieselRepository {
    fn create_item(&self, new_item: &NewInventoryItem) -> RepositoryResult<InventoryItem> {
        use crate::schema::{inventory, inventory_sizes};

        let mut conn = self.conn()?;

        conn.transaction::<InventoryItem, RepositoryError, _>(|conn| {
            let insertable = DbNewInventory::from(new_item);

            let created = diesel::insert_into(inventory::table)
                .values(&insertable)
                .get_result::<DbInventory>(conn)?;

            if new_item.item_type == ItemType::Soft && !new_item.sizes.is_empty() {
                let payload: Vec<DbNewInventorySize> = new_item
                    .sizes
                    .iter()
                    .map(|size| DbNewInventorySize::from_domain(created.id, size))
                    .collect();

                diesel::insert_into(inventory_sizes::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            hydrate(conn, created)
        })
    }

    fn create_bundle(&self, new_bundle: &NewBundle) -> RepositoryResult<InventoryItem> {
        use crate::schema::{bundle_items, inventory};

        let mut conn = self.conn()?;

        conn.transaction::<InventoryItem, RepositoryError, _>(|conn| {
            let mut snapshots: Vec<(i32, i32)> = Vec::with_capacity(new_bundle.item_ids.len());

            for &item_id in &new_bundle.item_ids {
                let component = inventory::table
                    .filter(inventory::id.eq(item_id))
                    .filter(inventory::tour_id.eq(new_bundle.tour_id))
                    .filter(inventory::item_type.ne(ItemType::Bundle.as_str()))
                    .select(DbInventory::as_select())
                    .first::<DbInventory>(conn)
                    .optional()?;

                let Some(component) = component else {
                    log::warn!(
                        "skipping bundle component {item_id}: not a hard or soft item of tour {}",
                        new_bundle.tour_id
                    );
                    continue;
                };

                let snapshot = component_snapshot(conn, &component)?;
                snapshots.push((component.id, snapshot));
            }

            let quantities: Vec<i32> = snapshots.iter().map(|(_, quantity)| *quantity).collect();
            let insertable = DbNewInventory {
                tour_id: new_bundle.tour_id,
                name: new_bundle.name.as_str(),
                item_type: ItemType::Bundle.as_str(),
                price_cents: new_bundle.price_cents,
                image_url: new_bundle.image_url.as_deref(),
                quantity: Some(bundle_quantity(&quantities)),
            };

            let created = diesel::insert_into(inventory::table)
                .values(&insertable)
                .get_result::<DbInventory>(conn)?;

            if !snapshots.is_empty() {
                let payload: Vec<DbNewBundleItem> = snapshots
                    .iter()
                    .map(|(item_id, quantity)| DbNewBundleItem {
                        bundle_id: created.id,
                        item_id: *item_id,
                        quantity: *quantity,
                    })
                    .collect();

                diesel::insert_into(bundle_items::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            hydrate(conn, created)
        })
    }

    fn update_item(
        &self,
        item_id: i32,
        updates: &UpdateInventoryItem,
    ) -> RepositoryResult<InventoryItem> {
        use crate::schema::{inventory, inventory_sizes};

        let mut conn = self.conn()?;

        conn.transaction::<InventoryItem, RepositoryError, _>(|conn| {
            let current = find_row(conn, item_id)?.ok_or(RepositoryError::NotFound)?;
            let item_type = parse_item_type(&current)?;

            diesel::update(inventory::table.filter(inventory::id.eq(item_id)))
                .set(&DbUpdateInventory::from(updates))
                .execute(conn)?;

            match item_type {
                ItemType::Hard => {
                    if let Some(quantity) = updates.quantity {
                        diesel::update(inventory::table.filter(inventory::id.eq(item_id)))
                            .set(inventory::quantity.eq(quantity))
                            .execute(conn)?;
                    }
                }
                ItemType::Soft => {
                    for size in &updates.sizes {
                        diesel::update(
                            inventory_sizes::table
                                .filter(inventory_sizes::inventory_id.eq(item_id))
                                .filter(inventory_sizes::size.eq(size.size.as_str())),
                        )
                        .set(inventory_sizes::quantity.eq(size.quantity))
                        .execute(conn)?;
                    }
                }
                ItemType::Bundle => {}
            }

            let updated = find_row(conn, item_id)?.ok_or(RepositoryError::NotFound)?;
            hydrate(conn, updated)
        })
    }

    fn adjust_stock(
        &self,
        item_id: i32,
        quantity: i32,
        price_cents: Option<i64>,
    ) -> RepositoryResult<InventoryItem> {
        use crate::schema::inventory;

        let mut conn = self.conn()?;

        conn.transaction::<InventoryItem, RepositoryError, _>(|conn| {
            let current = find_row(conn, item_id)?.ok_or(RepositoryError::NotFound)?;
            if parse_item_type(&current)? == ItemType::Soft {
                return Err(RepositoryError::Validation(
                    "Soft items are stocked per size".to_string(),
                ));
            }

            let target = inventory::table.filter(inventory::id.eq(item_id));
            match price_cents {
                Some(price_cents) => diesel::update(target)
                    .set((
                        inventory::quantity.eq(quantity),
                        inventory::price_cents.eq(price_cents),
                    ))
                    .execute(conn)?,
                None => diesel::update(target)
                    .set(inventory::quantity.eq(quantity))
                    .execute(conn)?,
            };

            let updated = find_row(conn, item_id)?.ok_or(RepositoryError::NotFound)?;
            hydrate(conn, updated)
        })
    }

    fn delete_item(&self, item_id: i32) -> RepositoryResult<()> {
        use crate::schema::{bundle_items, inventory, inventory_sizes, sales};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            if find_row(conn, item_id)?.is_none() {
                return Err(RepositoryError::NotFound);
            }

            let containing = bundle_items::table
                .filter(bundle_items::item_id.eq(item_id))
                .select(bundle_items::bundle_id)
                .load::<i32>(conn)?;

            let mut removed = inventory::table
                .filter(inventory::id.eq_any(&containing))
                .filter(inventory::item_type.eq(ItemType::Bundle.as_str()))
                .select(inventory::id)
                .load::<i32>(conn)?;
            if !removed.is_empty() {
                log::info!(
                    "removing {} bundle(s) containing inventory item {item_id}",
                    removed.len()
                );
            }
            removed.push(item_id);

            diesel::delete(sales::table.filter(sales::inventory_id.eq_any(&removed)))
                .execute(conn)?;
            diesel::delete(
                bundle_items::table.filter(
                    bundle_items::bundle_id
                        .eq_any(&removed)
                        .or(bundle_items::item_id.eq_any(&removed)),
                ),
            )
            .execute(conn)?;
            diesel::delete(inventory_sizes::table.filter(inventory_sizes::inventory_id.eq_any(&removed)))
                .execute(conn)?;
            diesel::delete(inventory::table.filter(inventory::id.eq_any(&removed))).execute(conn)?;

            Ok(())
        })
    }
}

fn find_row(conn: &mut SqliteConnection, item_id: i32) -> RepositoryResult<Option<DbInventory>> {
    use crate::schema::inventory;

    let row = inventory::table
        .filter(inventory::id.eq(item_id))
        .select(DbInventory::as_select())
        .first::<DbInventory>(conn)
        .optional()?;

    Ok(row)
}

fn parse_item_type(row: &DbInventory) -> RepositoryResult<ItemType> {
    row.item_type
        .parse()
        .map_err(RepositoryError::Validation)
}

/// Size rows of a soft item in insertion order.
pub(crate) fn load_sizes(conn: &mut SqliteConnection, item_id: i32) -> RepositoryResult<Vec<SizeStock>> {
    use crate::schema::inventory_sizes;

    let rows = inventory_sizes::table
        .filter(inventory_sizes::inventory_id.eq(item_id))
        .order(inventory_sizes::id.asc())
        .select(DbInventorySize::as_select())
        .load::<DbInventorySize>(conn)?;

    Ok(rows.into_iter().map(SizeStock::from).collect())
}

fn load_components(conn: &mut SqliteConnection, bundle_id: i32) -> RepositoryResult<Vec<BundleComponent>> {
    use crate::schema::{bundle_items, inventory};

    let rows = bundle_items::table
        .inner_join(inventory::table.on(inventory::id.eq(bundle_items::item_id)))
        .filter(bundle_items::bundle_id.eq(bundle_id))
        .order(bundle_items::id.asc())
        .select((bundle_items::quantity, DbInventory::as_select()))
        .load::<(i32, DbInventory)>(conn)?;

    let mut components = Vec::with_capacity(rows.len());
    for (snapshot, row) in rows {
        let sizes = if row.item_type == ItemType::Soft.as_str() {
            Some(load_sizes(conn, row.id)?)
        } else {
            None
        };
        components.push(row.into_component(snapshot, sizes));
    }

    Ok(components)
}

fn hydrate(conn: &mut SqliteConnection, row: DbInventory) -> RepositoryResult<InventoryItem> {
    let (sizes, components) = match parse_item_type(&row)? {
        ItemType::Hard => (Vec::new(), Vec::new()),
        ItemType::Soft => (load_sizes(conn, row.id)?, Vec::new()),
        ItemType::Bundle => (Vec::new(), load_components(conn, row.id)?),
    };

    Ok(row.into_domain(sizes, components))
}

/// Availability of a component at the moment it joins a bundle.
fn component_snapshot(conn: &mut SqliteConnection, component: &DbInventory) -> RepositoryResult<i32> {
    use crate::schema::inventory_sizes;

    let snapshot = match parse_item_type(component)? {
        ItemType::Hard => component.quantity.unwrap_or(0),
        ItemType::Soft => inventory_sizes::table
            .filter(inventory_sizes::inventory_id.eq(component.id))
            .select(diesel::dsl::min(inventory_sizes::quantity))
            .first::<Option<i32>>(conn)?
            .unwrap_or(0),
        ItemType::Bundle => 0,
    };

    Ok(snapshot)
}
