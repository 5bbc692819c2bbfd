use mockall::mock;

use super::{
    InventoryReader, InventoryWriter, RepositoryResult, SaleReader, SaleWriter, ShowReader,
    ShowSummaryReader, ShowSummaryWriter, ShowWriter, TourReader, TourWriter, UserReader,
    UserWriter,
};
use crate::domain::{
    inventory::{InventoryItem, ItemType, NewBundle, NewInventoryItem, UpdateInventoryItem},
    sale::{NewSale, Sale, SaleLine},
    show::{ClosedShow, NewShow, Show, ShowDetails},
    show_summary::{ShowSummary, ShowSummaryDetails},
    tour::{NewTour, Tour, UpdateTour},
    user::{NewUser, UpdateUser, User, UserCredentials},
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_credentials_by_email(&self, email: &str) -> RepositoryResult<Option<UserCredentials>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
        fn delete_user(&self, user_id: i32) -> RepositoryResult<()>;
    }

    impl TourReader for Repository {
        fn get_tour_by_id(&self, id: i32, user_id: i32) -> RepositoryResult<Option<Tour>>;
        fn list_tours(&self, user_id: i32) -> RepositoryResult<Vec<Tour>>;
    }

    impl TourWriter for Repository {
        fn create_tour(&self, new_tour: &NewTour) -> RepositoryResult<Tour>;
        fn update_tour(&self, tour_id: i32, user_id: i32, updates: &UpdateTour) -> RepositoryResult<Tour>;
        fn delete_tour(&self, tour_id: i32, user_id: i32) -> RepositoryResult<()>;
    }

    impl ShowReader for Repository {
        fn get_show_by_id(&self, id: i32) -> RepositoryResult<Option<ShowDetails>>;
        fn list_open_shows(&self, tour_id: i32, user_id: i32) -> RepositoryResult<Vec<Show>>;
        fn list_closed_shows(&self, user_id: i32) -> RepositoryResult<Vec<ClosedShow>>;
    }

    impl ShowWriter for Repository {
        fn create_show(&self, new_show: &NewShow) -> RepositoryResult<Show>;
        fn delete_show(&self, show_id: i32) -> RepositoryResult<()>;
    }

    impl InventoryReader for Repository {
        fn get_item_by_id(&self, id: i32) -> RepositoryResult<Option<InventoryItem>>;
        fn list_items(&self, tour_id: i32) -> RepositoryResult<Vec<InventoryItem>>;
        fn item_exists(&self, tour_id: i32, name: &str, item_type: ItemType) -> RepositoryResult<bool>;
    }

    impl InventoryWriter for Repository {
        fn create_item(&self, new_item: &NewInventoryItem) -> RepositoryResult<InventoryItem>;
        fn create_bundle(&self, new_bundle: &NewBundle) -> RepositoryResult<InventoryItem>;
        fn update_item(&self, item_id: i32, updates: &UpdateInventoryItem) -> RepositoryResult<InventoryItem>;
        fn adjust_stock(&self, item_id: i32, quantity: i32, price_cents: Option<i64>) -> RepositoryResult<InventoryItem>;
        fn delete_item(&self, item_id: i32) -> RepositoryResult<()>;
    }

    impl SaleReader for Repository {
        fn list_sales_for_show(&self, show_id: i32) -> RepositoryResult<Vec<SaleLine>>;
        fn tour_sales_total(&self, tour_id: i32) -> RepositoryResult<i64>;
    }

    impl SaleWriter for Repository {
        fn record_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale>;
    }

    impl ShowSummaryReader for Repository {
        fn get_summary(&self, show_id: i32) -> RepositoryResult<Option<ShowSummaryDetails>>;
    }

    impl ShowSummaryWriter for Repository {
        fn close_show(&self, show_id: i32) -> RepositoryResult<ShowSummary>;
    }
}
