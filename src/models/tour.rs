use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::tour::{
    NewTour as DomainNewTour, Tour as DomainTour, UpdateTour as DomainUpdateTour,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tours)]
pub struct Tour {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub band_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tours)]
pub struct NewTour<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub band_name: &'a str,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tours)]
pub struct UpdateTour<'a> {
    pub name: Option<&'a str>,
    pub band_name: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<Tour> for DomainTour {
    fn from(value: Tour) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            name: value.name,
            band_name: value.band_name,
            start_date: value.start_date,
            end_date: value.end_date,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewTour> for NewTour<'a> {
    fn from(value: &'a DomainNewTour) -> Self {
        Self {
            user_id: value.user_id,
            name: value.name.as_str(),
            band_name: value.band_name.as_str(),
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}

impl<'a> From<&'a DomainUpdateTour> for UpdateTour<'a> {
    fn from(value: &'a DomainUpdateTour) -> Self {
        Self {
            name: value.name.as_deref(),
            band_name: value.band_name.as_deref(),
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}
