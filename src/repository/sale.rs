use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::inventory::ItemType;
use crate::domain::sale::{NewSale, Sale, SaleLine};
use crate::domain::show_summary::checked_total;
use crate::models::inventory::Inventory as DbInventory;
use crate::models::sale::{NewSale as DbNewSale, Sale as DbSale};
use crate::repository::inventory::load_sizes;
use crate::repository::{DieselRepository, RepositoryError, RepositoryResult, SaleReader, SaleWriter};

impl SaleReader for DieselRepository {
    fn list_sales_for_show(&self, show_id: i32) -> RepositoryResult<Vec<SaleLine>> {
        use crate::schema::{inventory, sales};

        let mut conn = self.conn()?;

        let rows = sales::table
            .inner_join(inventory::table)
            .filter(sales::show_id.eq(show_id))
            .order((sales::created_at.desc(), sales::id.desc()))
            .select((DbSale::as_select(), DbInventory::as_select()))
            .load::<(DbSale, DbInventory)>(&mut conn)?;

        let mut lines = Vec::with_capacity(rows.len());
        for (sale, item) in rows {
            let item_type: ItemType = item.item_type.parse().unwrap_or_default();
            let sizes = match item_type {
                ItemType::Soft => Some(load_sizes(&mut conn, item.id)?),
                ItemType::Hard | ItemType::Bundle => None,
            };
            let sale = Sale::from(sale);

            lines.push(SaleLine {
                id: sale.id,
                quantity_sold: sale.quantity_sold,
                total_amount_cents: sale.total_amount_cents,
                payment_method: sale.payment_method,
                size: sale.size,
                created_at: sale.created_at,
                item_name: item.name,
                item_type,
                price_cents: item.price_cents,
                sizes,
            });
        }

        Ok(lines)
    }

    fn tour_sales_total(&self, tour_id: i32) -> RepositoryResult<i64> {
        use crate::schema::{sales, shows};

        let mut conn = self.conn()?;

        let amounts = sales::table
            .inner_join(shows::table)
            .filter(shows::tour_id.eq(tour_id))
            .select(sales::total_amount_cents)
            .load::<i64>(&mut conn)?;

        checked_total(amounts).map_err(|err| RepositoryError::Validation(err.to_string()))
    }
}

impl SaleWriter for DieselRepository {
    fn record_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale> {
        use crate::schema::{inventory, sales, shows};

        let mut conn = self.conn()?;

        // Take the write lock up front so concurrent sellers queue on the busy
        // timeout instead of failing when upgrading a read snapshot.
        let result = conn.immediate_transaction::<Sale, RepositoryError, _>(|conn| {
            let item = inventory::table
                .filter(inventory::id.eq(new_sale.inventory_id))
                .select(DbInventory::as_select())
                .first::<DbInventory>(conn)
                .optional()?
                .ok_or_else(|| RepositoryError::Validation("Invalid inventory ID".to_string()))?;

            let show_tour = shows::table
                .filter(shows::id.eq(new_sale.show_id))
                .select(shows::tour_id)
                .first::<i32>(conn)
                .optional()?;
            if show_tour.is_some_and(|tour_id| tour_id != item.tour_id) {
                return Err(RepositoryError::Validation(
                    "Item does not belong to this show's tour".to_string(),
                ));
            }

            let size = match item.item_type.parse::<ItemType>() {
                Ok(ItemType::Hard) => {
                    take_hard_stock(conn, item.id, new_sale.quantity_sold)?;
                    None
                }
                Ok(ItemType::Soft) => {
                    let size = new_sale
                        .size
                        .as_deref()
                        .filter(|size| !size.is_empty())
                        .ok_or_else(|| {
                            RepositoryError::Validation("Size is required for soft items".to_string())
                        })?;
                    take_size_stock(conn, item.id, size, new_sale.quantity_sold)?;
                    Some(size)
                }
                Ok(ItemType::Bundle) => {
                    take_bundle_stock(conn, &item, new_sale)?;
                    None
                }
                Err(err) => return Err(RepositoryError::Validation(err)),
            };

            let insertable = DbNewSale::from_domain(new_sale, size);
            let created = diesel::insert_into(sales::table)
                .values(&insertable)
                .get_result::<DbSale>(conn)?;

            Ok(created.into())
        });

        if let Err(err) = &result {
            log::warn!(
                "sale of item {} at show {} rolled back: {err}",
                new_sale.inventory_id,
                new_sale.show_id
            );
        }

        result
    }
}

/// Decrement a scalar quantity unless that would take it below zero.
fn take_hard_stock(conn: &mut SqliteConnection, item_id: i32, sold: i32) -> RepositoryResult<()> {
    if try_take_hard_stock(conn, item_id, sold)? {
        Ok(())
    } else {
        Err(RepositoryError::InsufficientStock {
            inventory_id: item_id,
            size: None,
        })
    }
}

fn try_take_hard_stock(conn: &mut SqliteConnection, item_id: i32, sold: i32) -> RepositoryResult<bool> {
    use crate::schema::inventory;

    let updated = diesel::update(
        inventory::table
            .filter(inventory::id.eq(item_id))
            .filter(inventory::quantity.ge(sold)),
    )
    .set(inventory::quantity.eq(inventory::quantity - sold))
    .execute(conn)?;

    Ok(updated == 1)
}

/// Decrement one size row unless that would take it below zero.
fn take_size_stock(
    conn: &mut SqliteConnection,
    item_id: i32,
    size: &str,
    sold: i32,
) -> RepositoryResult<()> {
    if try_take_size_stock(conn, item_id, size, sold)? {
        Ok(())
    } else {
        Err(RepositoryError::InsufficientStock {
            inventory_id: item_id,
            size: Some(size.to_string()),
        })
    }
}

fn try_take_size_stock(
    conn: &mut SqliteConnection,
    item_id: i32,
    size: &str,
    sold: i32,
) -> RepositoryResult<bool> {
    use crate::schema::inventory_sizes;

    let updated = diesel::update(
        inventory_sizes::table
            .filter(inventory_sizes::inventory_id.eq(item_id))
            .filter(inventory_sizes::size.eq(size))
            .filter(inventory_sizes::quantity.ge(sold)),
    )
    .set(inventory_sizes::quantity.eq(inventory_sizes::quantity - sold))
    .execute(conn)?;

    Ok(updated == 1)
}

/// Decrement every component of a bundle. Components that cannot be
/// satisfied are skipped with a warning; the bundle row itself is untouched.
fn take_bundle_stock(
    conn: &mut SqliteConnection,
    bundle: &DbInventory,
    new_sale: &NewSale,
) -> RepositoryResult<()> {
    use crate::schema::{bundle_items, inventory, inventory_sizes};

    let components = bundle_items::table
        .inner_join(inventory::table.on(inventory::id.eq(bundle_items::item_id)))
        .filter(bundle_items::bundle_id.eq(bundle.id))
        .order(bundle_items::id.asc())
        .select(DbInventory::as_select())
        .load::<DbInventory>(conn)?;

    if components.is_empty() {
        return Err(RepositoryError::Validation(
            "Bundle has no items".to_string(),
        ));
    }

    let sold = new_sale.quantity_sold;
    for component in components {
        let taken = match component.item_type.parse::<ItemType>() {
            Ok(ItemType::Hard) => try_take_hard_stock(conn, component.id, sold)?,
            Ok(ItemType::Soft) => {
                let size = match new_sale.size.as_deref().filter(|size| !size.is_empty()) {
                    Some(size) => Some(size.to_string()),
                    None => inventory_sizes::table
                        .filter(inventory_sizes::inventory_id.eq(component.id))
                        .filter(inventory_sizes::quantity.gt(0))
                        .order((inventory_sizes::quantity.asc(), inventory_sizes::id.asc()))
                        .select(inventory_sizes::size)
                        .first::<String>(conn)
                        .optional()?,
                };

                match size {
                    Some(size) => try_take_size_stock(conn, component.id, &size, sold)?,
                    None => false,
                }
            }
            Ok(ItemType::Bundle) | Err(_) => false,
        };

        if !taken {
            log::warn!(
                "bundle {} sold without decrementing component {} ({}): insufficient stock",
                bundle.id,
                component.id,
                component.name
            );
        }
    }

    Ok(())
}
