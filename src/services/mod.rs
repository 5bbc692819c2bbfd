pub mod errors;
pub mod inventory;
pub mod sales;
pub mod shows;
pub mod summaries;
pub mod tours;
pub mod users;

pub use errors::{ServiceError, ServiceResult};
