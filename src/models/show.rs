use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::show::{NewShow as DomainNewShow, Show as DomainShow};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::shows)]
pub struct Show {
    pub id: i32,
    pub tour_id: i32,
    pub date: NaiveDate,
    pub venue: String,
    pub city: String,
    pub state: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::shows)]
pub struct NewShow<'a> {
    pub tour_id: i32,
    pub date: NaiveDate,
    pub venue: &'a str,
    pub city: &'a str,
    pub state: &'a str,
}

impl From<Show> for DomainShow {
    fn from(value: Show) -> Self {
        Self {
            id: value.id,
            tour_id: value.tour_id,
            date: value.date,
            venue: value.venue,
            city: value.city,
            state: value.state,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewShow> for NewShow<'a> {
    fn from(value: &'a DomainNewShow) -> Self {
        Self {
            tour_id: value.tour_id,
            date: value.date,
            venue: value.venue.as_str(),
            city: value.city.as_str(),
            state: value.state.as_str(),
        }
    }
}
