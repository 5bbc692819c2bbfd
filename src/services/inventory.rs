use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::domain::format_cents;
use crate::domain::inventory::{InventoryItem, ItemType};
use crate::forms::inventory::{AddBundleForm, AddItemForm, AdjustStockForm, EditItemForm};
use crate::repository::{InventoryReader, InventoryWriter, TourReader};
use crate::services::{ServiceError, ServiceResult};

/// An inventory item as returned by the API, with display fields.
#[derive(Debug, Serialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub price: String,
    pub available_quantity: i32,
}

impl From<InventoryItem> for ItemView {
    fn from(item: InventoryItem) -> Self {
        Self {
            price: format_cents(item.price_cents),
            available_quantity: item.available_quantity(),
            item,
        }
    }
}

fn ensure_tour_owned<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<()>
where
    R: TourReader + ?Sized,
{
    match repo.get_tour_by_id(tour_id, user.id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::NotFound),
    }
}

/// Loads an item and confirms the caller owns the tour it belongs to.
fn owned_item<R>(repo: &R, user: &AuthenticatedUser, item_id: i32) -> ServiceResult<InventoryItem>
where
    R: TourReader + InventoryReader + ?Sized,
{
    let item = repo.get_item_by_id(item_id)?.ok_or(ServiceError::NotFound)?;
    ensure_tour_owned(repo, user, item.tour_id)?;
    Ok(item)
}

fn duplicate_name(name: &str) -> ServiceError {
    ServiceError::Conflict(format!("An item named \"{name}\" already exists on this tour"))
}

/// Adds a hard or soft item to a tour the caller owns.
pub fn create_item<R>(repo: &R, user: &AuthenticatedUser, form: AddItemForm) -> ServiceResult<ItemView>
where
    R: TourReader + InventoryReader + InventoryWriter + ?Sized,
{
    let new_item = form
        .into_new_item()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_tour_owned(repo, user, new_item.tour_id)?;
    if repo.item_exists(new_item.tour_id, &new_item.name, new_item.item_type)? {
        return Err(duplicate_name(&new_item.name));
    }

    let created = repo.create_item(&new_item)?;
    log::info!(
        "created {} item {} on tour {}",
        created.item_type,
        created.id,
        created.tour_id
    );
    Ok(created.into())
}

/// Creates a bundle out of existing items of the same tour.
pub fn create_bundle<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
    form: AddBundleForm,
) -> ServiceResult<ItemView>
where
    R: TourReader + InventoryReader + InventoryWriter + ?Sized,
{
    let new_bundle = form
        .into_new_bundle(tour_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_tour_owned(repo, user, tour_id)?;
    if repo.item_exists(tour_id, &new_bundle.name, ItemType::Bundle)? {
        return Err(duplicate_name(&new_bundle.name));
    }

    let created = repo.create_bundle(&new_bundle)?;
    if created.components.len() < new_bundle.item_ids.len() {
        log::warn!(
            "bundle {} created with {} of {} requested components",
            created.id,
            created.components.len(),
            new_bundle.item_ids.len()
        );
    }
    Ok(created.into())
}

/// Every item of a tour; an unknown or foreign tour yields an empty list.
pub fn list_items<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<Vec<ItemView>>
where
    R: TourReader + InventoryReader + ?Sized,
{
    if repo.get_tour_by_id(tour_id, user.id)?.is_none() {
        return Ok(Vec::new());
    }

    let items = repo.list_items(tour_id)?;
    Ok(items.into_iter().map(ItemView::from).collect())
}

pub fn get_item<R>(repo: &R, user: &AuthenticatedUser, item_id: i32) -> ServiceResult<ItemView>
where
    R: TourReader + InventoryReader + ?Sized,
{
    owned_item(repo, user, item_id).map(ItemView::from)
}

/// A bundle with its resolved components.
pub fn get_bundle<R>(repo: &R, user: &AuthenticatedUser, bundle_id: i32) -> ServiceResult<ItemView>
where
    R: TourReader + InventoryReader + ?Sized,
{
    let item = owned_item(repo, user, bundle_id)?;
    if item.item_type != ItemType::Bundle {
        return Err(ServiceError::NotFound);
    }
    Ok(item.into())
}

pub fn modify_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    item_id: i32,
    form: EditItemForm,
) -> ServiceResult<ItemView>
where
    R: TourReader + InventoryReader + InventoryWriter + ?Sized,
{
    let updates = form
        .into_update_item()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let current = owned_item(repo, user, item_id)?;
    if updates.name != current.name
        && repo.item_exists(current.tour_id, &updates.name, current.item_type)?
    {
        return Err(duplicate_name(&updates.name));
    }

    repo.update_item(item_id, &updates)
        .map(ItemView::from)
        .map_err(ServiceError::from)
}

/// Overwrites an item's scalar quantity and optionally its price.
pub fn adjust_stock<R>(repo: &R, user: &AuthenticatedUser, form: AdjustStockForm) -> ServiceResult<ItemView>
where
    R: TourReader + InventoryReader + InventoryWriter + ?Sized,
{
    let adjustment = form
        .into_adjustment()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    owned_item(repo, user, adjustment.inventory_id)?;

    repo.adjust_stock(
        adjustment.inventory_id,
        adjustment.quantity,
        adjustment.price_cents,
    )
    .map(ItemView::from)
    .map_err(ServiceError::from)
}

/// Deletes an item, any bundle containing it and their sales.
pub fn remove_item<R>(repo: &R, user: &AuthenticatedUser, item_id: i32) -> ServiceResult<()>
where
    R: TourReader + InventoryReader + InventoryWriter + ?Sized,
{
    owned_item(repo, user, item_id)?;
    repo.delete_item(item_id).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use mockall::predicate::eq;

    use crate::domain::inventory::{BundleComponent, SizeStock};
    use crate::domain::tour::Tour;
    use crate::domain::user::UserRole;
    use crate::forms::AmountInput;
    use crate::forms::inventory::{BundleItemInput, SizeInput};
    use crate::repository::mock::MockRepository;

    fn caller() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 2,
            email: "tm@example.com".to_string(),
            role: UserRole::User,
            exp: 0,
        }
    }

    fn owned_tour(id: i32, user_id: i32) -> Option<Tour> {
        Some(Tour {
            id,
            user_id,
            name: "Summer Run".to_string(),
            band_name: "The Amps".to_string(),
            start_date: None,
            end_date: None,
            created_at: NaiveDateTime::default(),
        })
    }

    fn item(id: i32, tour_id: i32, name: &str, item_type: ItemType) -> InventoryItem {
        InventoryItem {
            id,
            tour_id,
            name: name.to_string(),
            item_type,
            price_cents: 2000,
            image_url: None,
            quantity: Some(10),
            created_at: NaiveDateTime::default(),
            sizes: Vec::new(),
            components: Vec::new(),
        }
    }

    fn poster_form() -> AddItemForm {
        AddItemForm {
            tour_id: 1,
            name: "Poster".to_string(),
            item_type: "hard".to_string(),
            price: AmountInput::from(20.0),
            image_url: None,
            quantity: Some(10),
            sizes: None,
        }
    }

    #[test]
    fn create_item_rejects_foreign_tour() {
        let mut repo = MockRepository::new();
        repo.expect_get_tour_by_id()
            .with(eq(1), eq(2))
            .returning(|_, _| Ok(None));
        repo.expect_create_item().never();

        assert!(matches!(
            create_item(&repo, &caller(), poster_form()),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn create_item_rejects_duplicate_name() {
        let mut repo = MockRepository::new();
        repo.expect_get_tour_by_id()
            .returning(|id, user_id| Ok(owned_tour(id, user_id)));
        repo.expect_item_exists()
            .withf(|tour_id, name, item_type| {
                *tour_id == 1 && name == "Poster" && *item_type == ItemType::Hard
            })
            .returning(|_, _, _| Ok(true));
        repo.expect_create_item().never();

        assert!(matches!(
            create_item(&repo, &caller(), poster_form()),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn create_item_returns_view_with_price() {
        let mut repo = MockRepository::new();
        repo.expect_get_tour_by_id()
            .returning(|id, user_id| Ok(owned_tour(id, user_id)));
        repo.expect_item_exists().returning(|_, _, _| Ok(false));
        repo.expect_create_item()
            .times(1)
            .withf(|new_item| new_item.price_cents == 2000 && new_item.quantity == Some(10))
            .returning(|new_item| Ok(item(7, new_item.tour_id, &new_item.name, ItemType::Hard)));

        let view = create_item(&repo, &caller(), poster_form()).expect("created");

        assert_eq!(view.item.id, 7);
        assert_eq!(view.price, "20.00");
        assert_eq!(view.available_quantity, 10);
    }

    #[test]
    fn soft_item_view_reports_smallest_size() {
        let mut repo = MockRepository::new();
        repo.expect_get_tour_by_id()
            .returning(|id, user_id| Ok(owned_tour(id, user_id)));
        repo.expect_item_exists().returning(|_, _, _| Ok(false));
        repo.expect_create_item().returning(|new_item| {
            let mut created = item(8, new_item.tour_id, &new_item.name, ItemType::Soft);
            created.quantity = None;
            created.sizes = new_item.sizes.clone();
            Ok(created)
        });

        let mut form = poster_form();
        form.name = "T-Shirt".to_string();
        form.item_type = "soft".to_string();
        form.quantity = None;
        form.sizes = Some(vec![
            SizeInput {
                size: "S".to_string(),
                quantity: 5,
            },
            SizeInput {
                size: "M".to_string(),
                quantity: 2,
            },
        ]);

        let view = create_item(&repo, &caller(), form).expect("created");
        assert_eq!(view.item.sizes, vec![SizeStock::new("S", 5), SizeStock::new("M", 2)]);
        assert_eq!(view.available_quantity, 2);
    }

    #[test]
    fn list_items_of_foreign_tour_is_empty() {
        let mut repo = MockRepository::new();
        repo.expect_get_tour_by_id().returning(|_, _| Ok(None));
        repo.expect_list_items().never();

        let items = list_items(&repo, &caller(), 4).expect("listed");
        assert!(items.is_empty());
    }

    #[test]
    fn get_bundle_rejects_plain_items() {
        let mut repo = MockRepository::new();
        repo.expect_get_item_by_id()
            .returning(|id| Ok(Some(item(id, 1, "Poster", ItemType::Hard))));
        repo.expect_get_tour_by_id()
            .returning(|id, user_id| Ok(owned_tour(id, user_id)));

        assert!(matches!(
            get_bundle(&repo, &caller(), 3),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn create_bundle_uses_query_tour() {
        let mut repo = MockRepository::new();
        repo.expect_get_tour_by_id()
            .with(eq(1), eq(2))
            .returning(|id, user_id| Ok(owned_tour(id, user_id)));
        repo.expect_item_exists().returning(|_, _, _| Ok(false));
        repo.expect_create_bundle()
            .times(1)
            .withf(|bundle| bundle.tour_id == 1 && bundle.item_ids == vec![4, 5, 6])
            .returning(|bundle| {
                let mut created = item(9, bundle.tour_id, &bundle.name, ItemType::Bundle);
                created.quantity = Some(3);
                created.components = vec![BundleComponent {
                    id: 4,
                    name: "Poster".to_string(),
                    item_type: ItemType::Hard,
                    price_cents: 2000,
                    image_url: None,
                    quantity: 3,
                    sizes: None,
                }];
                Ok(created)
            });

        let form = AddBundleForm {
            name: "Fan Pack".to_string(),
            price: AmountInput::from("45"),
            image_url: None,
            items: vec![
                BundleItemInput { item_id: 4 },
                BundleItemInput { item_id: 5 },
                BundleItemInput { item_id: 6 },
            ],
        };

        let view = create_bundle(&repo, &caller(), 1, form).expect("created");
        assert_eq!(view.available_quantity, 3);
    }

    #[test]
    fn adjust_stock_checks_ownership_first() {
        let mut repo = MockRepository::new();
        repo.expect_get_item_by_id()
            .returning(|id| Ok(Some(item(id, 1, "Poster", ItemType::Hard))));
        repo.expect_get_tour_by_id().returning(|_, _| Ok(None));
        repo.expect_adjust_stock().never();

        let form = AdjustStockForm {
            inventory_id: 3,
            new_quantity: 40,
            new_price: None,
        };

        assert!(matches!(
            adjust_stock(&repo, &caller(), form),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn remove_item_deletes_owned_item() {
        let mut repo = MockRepository::new();
        repo.expect_get_item_by_id()
            .returning(|id| Ok(Some(item(id, 1, "Poster", ItemType::Hard))));
        repo.expect_get_tour_by_id()
            .returning(|id, user_id| Ok(owned_tour(id, user_id)));
        repo.expect_delete_item().with(eq(3)).times(1).returning(|_| Ok(()));

        assert!(remove_item(&repo, &caller(), 3).is_ok());
    }
}
