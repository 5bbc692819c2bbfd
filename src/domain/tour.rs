use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A named run of shows owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tour {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub band_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new tour.
#[derive(Debug, Clone)]
pub struct NewTour {
    pub user_id: i32,
    pub name: String,
    pub band_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl NewTour {
    pub fn new(user_id: i32, name: impl Into<String>, band_name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            band_name: band_name.into(),
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_dates(mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }
}

/// Partial tour update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTour {
    pub name: Option<String>,
    pub band_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl UpdateTour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn band_name(mut self, band_name: impl Into<String>) -> Self {
        self.band_name = Some(band_name.into());
        self
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}
