use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::show::NewShow;
use crate::forms::sanitize_inline_text;

const FIELD_MAX_LEN: u64 = 256;

pub type ShowFormResult<T> = Result<T, ShowFormError>;

#[derive(Debug, Error)]
pub enum ShowFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Missing required fields: tour_id, date, venue, city, state")]
    MissingFields,
}

/// Payload of `POST /api/shows`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddShowForm {
    #[validate(range(min = 1))]
    pub tour_id: i32,
    pub date: NaiveDate,
    #[validate(length(max = FIELD_MAX_LEN))]
    pub venue: String,
    #[validate(length(max = FIELD_MAX_LEN))]
    pub city: String,
    #[validate(length(max = FIELD_MAX_LEN))]
    pub state: String,
}

impl AddShowForm {
    pub fn into_new_show(self) -> ShowFormResult<NewShow> {
        self.validate()?;

        let venue = sanitize_inline_text(&self.venue);
        let city = sanitize_inline_text(&self.city);
        let state = sanitize_inline_text(&self.state);
        if venue.is_empty() || city.is_empty() || state.is_empty() {
            return Err(ShowFormError::MissingFields);
        }

        Ok(NewShow::new(self.tour_id, self.date, venue, city, state))
    }
}

/// Query string of `GET /api/shows`.
#[derive(Debug, Deserialize)]
pub struct OpenShowsQuery {
    pub tour_id: i32,
}
