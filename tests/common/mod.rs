//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use tempfile::TempDir;

use merch_tracker::auth::AuthenticatedUser;
use merch_tracker::db::{DbPool, establish_connection_pool, run_migrations};
use merch_tracker::domain::inventory::{InventoryItem, NewInventoryItem, SizeStock};
use merch_tracker::domain::show::{NewShow, Show};
use merch_tracker::domain::tour::{NewTour, Tour};
use merch_tracker::domain::user::{NewUser, User};
use merch_tracker::repository::{
    DieselRepository, InventoryWriter, ShowWriter, TourWriter, UserWriter,
};

/// Migrated SQLite database living in its own temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir.");
        let path = dir.path().join("merch.db");
        let url = path.to_str().expect("utf-8 temp path");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");

        TestDb { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// A user with a tour and one open show, ready for selling.
pub struct Fixture {
    pub user: User,
    pub tour: Tour,
    pub show: Show,
}

impl Fixture {
    pub fn new(repo: &DieselRepository, email: &str) -> Self {
        let user = repo
            .create_user(&NewUser::new("Tour Manager", email, "not-a-real-hash"))
            .expect("user");
        let tour = repo
            .create_tour(&NewTour::new(user.id, "Summer Run", "The Amps"))
            .expect("tour");
        let show = repo
            .create_show(&NewShow::new(
                tour.id,
                NaiveDate::from_ymd_opt(2025, 7, 4).expect("date"),
                "The Mohawk",
                "Austin",
                "TX",
            ))
            .expect("show");

        Fixture { user, tour, show }
    }

    pub fn identity(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            id: self.user.id,
            email: self.user.email.clone(),
            role: self.user.role,
            exp: 0,
        }
    }

    pub fn hard_item(&self, repo: &DieselRepository, name: &str, price_cents: i64, quantity: i32) -> InventoryItem {
        repo.create_item(&NewInventoryItem::hard(self.tour.id, name, price_cents, quantity))
            .expect("hard item")
    }

    pub fn soft_item(&self, repo: &DieselRepository, name: &str, price_cents: i64, sizes: &[(&str, i32)]) -> InventoryItem {
        let sizes = sizes
            .iter()
            .map(|(size, quantity)| SizeStock::new(*size, *quantity))
            .collect();
        repo.create_item(&NewInventoryItem::soft(self.tour.id, name, price_cents, sizes))
            .expect("soft item")
    }
}

pub fn size_quantity(item: &InventoryItem, size: &str) -> Option<i32> {
    item.sizes
        .iter()
        .find(|row| row.size == size)
        .map(|row| row.quantity)
}
