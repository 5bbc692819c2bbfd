pub mod inventory;
pub mod sale;
pub mod show;
pub mod show_summary;
pub mod tour;
pub mod user;
