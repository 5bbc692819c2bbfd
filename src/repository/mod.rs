use crate::db::{DbConnection, DbPool};
use crate::domain::inventory::{InventoryItem, ItemType, NewBundle, NewInventoryItem, UpdateInventoryItem};
use crate::domain::sale::{NewSale, Sale, SaleLine};
use crate::domain::show::{ClosedShow, NewShow, Show, ShowDetails};
use crate::domain::show_summary::{ShowSummary, ShowSummaryDetails};
use crate::domain::tour::{NewTour, Tour, UpdateTour};
use crate::domain::user::{NewUser, UpdateUser, User, UserCredentials};

pub mod errors;
pub mod inventory;
pub mod sale;
pub mod show;
pub mod show_summary;
pub mod tour;
pub mod user;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over accounts.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_credentials_by_email(&self, email: &str) -> RepositoryResult<Option<UserCredentials>>;
}

/// Write operations over accounts.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
    /// Remove the account together with every tour it owns and everything below.
    fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over tours, always scoped to their owner.
pub trait TourReader {
    fn get_tour_by_id(&self, id: i32, user_id: i32) -> RepositoryResult<Option<Tour>>;
    fn list_tours(&self, user_id: i32) -> RepositoryResult<Vec<Tour>>;
}

/// Write operations over tours, always scoped to their owner.
pub trait TourWriter {
    fn create_tour(&self, new_tour: &NewTour) -> RepositoryResult<Tour>;
    fn update_tour(&self, tour_id: i32, user_id: i32, updates: &UpdateTour)
    -> RepositoryResult<Tour>;
    /// Remove the tour with its shows, sales, summaries and inventory.
    fn delete_tour(&self, tour_id: i32, user_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over shows.
pub trait ShowReader {
    /// Unscoped lookup; the returned `user_id` identifies the owner.
    fn get_show_by_id(&self, id: i32) -> RepositoryResult<Option<ShowDetails>>;
    /// Shows of the tour that have no summary yet, oldest date first.
    fn list_open_shows(&self, tour_id: i32, user_id: i32) -> RepositoryResult<Vec<Show>>;
    fn list_closed_shows(&self, user_id: i32) -> RepositoryResult<Vec<ClosedShow>>;
}

/// Write operations over shows.
pub trait ShowWriter {
    fn create_show(&self, new_show: &NewShow) -> RepositoryResult<Show>;
    /// Remove the show with its sales and summary.
    fn delete_show(&self, show_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over inventory items.
pub trait InventoryReader {
    fn get_item_by_id(&self, id: i32) -> RepositoryResult<Option<InventoryItem>>;
    fn list_items(&self, tour_id: i32) -> RepositoryResult<Vec<InventoryItem>>;
    fn item_exists(&self, tour_id: i32, name: &str, item_type: ItemType) -> RepositoryResult<bool>;
}

/// Write operations over inventory items.
pub trait InventoryWriter {
    fn create_item(&self, new_item: &NewInventoryItem) -> RepositoryResult<InventoryItem>;
    fn create_bundle(&self, new_bundle: &NewBundle) -> RepositoryResult<InventoryItem>;
    fn update_item(
        &self,
        item_id: i32,
        updates: &UpdateInventoryItem,
    ) -> RepositoryResult<InventoryItem>;
    /// Overwrite the scalar quantity, and the price when one is given.
    fn adjust_stock(
        &self,
        item_id: i32,
        quantity: i32,
        price_cents: Option<i64>,
    ) -> RepositoryResult<InventoryItem>;
    /// Remove the item, any bundle containing it and every sale of those.
    fn delete_item(&self, item_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over sales.
pub trait SaleReader {
    fn list_sales_for_show(&self, show_id: i32) -> RepositoryResult<Vec<SaleLine>>;
    fn tour_sales_total(&self, tour_id: i32) -> RepositoryResult<i64>;
}

/// The sale-recording engine.
pub trait SaleWriter {
    /// Decrement stock and persist the sale in one transaction.
    fn record_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale>;
}

/// Read-only operations over show summaries.
pub trait ShowSummaryReader {
    fn get_summary(&self, show_id: i32) -> RepositoryResult<Option<ShowSummaryDetails>>;
}

/// The show-closing engine.
pub trait ShowSummaryWriter {
    /// Aggregate every sale of the show into a frozen summary.
    fn close_show(&self, show_id: i32) -> RepositoryResult<ShowSummary>;
}
