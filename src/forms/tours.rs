use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::tour::{NewTour, UpdateTour};
use crate::forms::{sanitize_inline_text, sanitize_optional};

const NAME_MAX_LEN: u64 = 128;

pub type TourFormResult<T> = Result<T, TourFormError>;

#[derive(Debug, Error)]
pub enum TourFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Tour name and band name are required")]
    MissingNames,
    #[error("Tour cannot end before it starts")]
    EndsBeforeStart,
}

/// Payload of `POST /api/tours`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTourForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub band_name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl AddTourForm {
    pub fn into_new_tour(self, user_id: i32) -> TourFormResult<NewTour> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        let band_name = sanitize_inline_text(&self.band_name);
        if name.is_empty() || band_name.is_empty() {
            return Err(TourFormError::MissingNames);
        }
        check_dates(self.start_date, self.end_date)?;

        Ok(NewTour::new(user_id, name, band_name).with_dates(self.start_date, self.end_date))
    }
}

/// Payload of `PUT /api/tours/{id}`; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditTourForm {
    #[validate(length(max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(length(max = NAME_MAX_LEN))]
    pub band_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EditTourForm {
    pub fn into_update_tour(self) -> TourFormResult<UpdateTour> {
        self.validate()?;
        check_dates(self.start_date, self.end_date)?;

        Ok(UpdateTour {
            name: sanitize_optional(self.name.as_deref()),
            band_name: sanitize_optional(self.band_name.as_deref()),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> TourFormResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(TourFormError::EndsBeforeStart),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn add_tour_sanitizes_names() {
        let form = AddTourForm {
            name: "  Summer \t Run ".to_string(),
            band_name: "The Amps".to_string(),
            start_date: Some(date(2025, 6, 1)),
            end_date: Some(date(2025, 8, 31)),
        };

        let tour = form.into_new_tour(4).expect("valid tour");

        assert_eq!(tour.user_id, 4);
        assert_eq!(tour.name, "Summer Run");
        assert_eq!(tour.end_date, Some(date(2025, 8, 31)));
    }

    #[test]
    fn add_tour_requires_band() {
        let form = AddTourForm {
            name: "Summer Run".to_string(),
            band_name: "   ".to_string(),
            start_date: None,
            end_date: None,
        };

        assert!(matches!(
            form.into_new_tour(1),
            Err(TourFormError::MissingNames)
        ));
    }

    #[test]
    fn tour_cannot_end_before_start() {
        let form = EditTourForm {
            start_date: Some(date(2025, 6, 2)),
            end_date: Some(date(2025, 6, 1)),
            ..EditTourForm::default()
        };

        assert!(matches!(
            form.into_update_tour(),
            Err(TourFormError::EndsBeforeStart)
        ));
    }

    #[test]
    fn edit_tour_drops_blank_fields() {
        let form = EditTourForm {
            name: Some("  ".to_string()),
            band_name: Some("New Band".to_string()),
            ..EditTourForm::default()
        };

        let update = form.into_update_tour().expect("valid update");

        assert!(update.name.is_none());
        assert_eq!(update.band_name.as_deref(), Some("New Band"));
    }
}
