use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single dated performance that sales are recorded against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Show {
    pub id: i32,
    pub tour_id: i32,
    pub date: NaiveDate,
    pub venue: String,
    pub city: String,
    pub state: String,
    pub created_at: NaiveDateTime,
}

/// A show joined with the tour fields needed for ownership checks and display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShowDetails {
    #[serde(flatten)]
    pub show: Show,
    pub user_id: i32,
    pub tour_name: String,
    pub band_name: String,
}

/// Payload required to insert a new show.
#[derive(Debug, Clone)]
pub struct NewShow {
    pub tour_id: i32,
    pub date: NaiveDate,
    pub venue: String,
    pub city: String,
    pub state: String,
}

impl NewShow {
    pub fn new(
        tour_id: i32,
        date: NaiveDate,
        venue: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            tour_id,
            date,
            venue: venue.into(),
            city: city.into(),
            state: state.into(),
        }
    }
}

/// Row of the closed-shows listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClosedShow {
    pub show_id: i32,
    pub venue: String,
    pub date: NaiveDate,
    pub tour_id: i32,
    pub tour_name: String,
    pub band_name: String,
    pub total_sales_cents: i64,
    pub total_transactions: i32,
}
