use diesel::prelude::*;

use crate::domain::show::{
    ClosedShow, NewShow as DomainNewShow, Show as DomainShow, ShowDetails,
};
use crate::models::show::{NewShow as DbNewShow, Show as DbShow};
use crate::repository::{DieselRepository, RepositoryError, RepositoryResult, ShowReader, ShowWriter};

impl ShowReader for DieselRepository {
    fn get_show_by_id(&self, id: i32) -> RepositoryResult<Option<ShowDetails>> {
        use crate::schema::{shows, tours};

        let mut conn = self.conn()?;

        let row = shows::table
            .inner_join(tours::table)
            .filter(shows::id.eq(id))
            .select((
                DbShow::as_select(),
                tours::user_id,
                tours::name,
                tours::band_name,
            ))
            .first::<(DbShow, i32, String, String)>(&mut conn)
            .optional()?;

        Ok(row.map(|(show, user_id, tour_name, band_name)| ShowDetails {
            show: show.into(),
            user_id,
            tour_name,
            band_name,
        }))
    }

    fn list_open_shows(&self, tour_id: i32, user_id: i32) -> RepositoryResult<Vec<DomainShow>> {
        use crate::schema::{show_summaries, shows, tours};

        let mut conn = self.conn()?;

        let closed = show_summaries::table.select(show_summaries::show_id);

        let db_shows = shows::table
            .inner_join(tours::table)
            .filter(shows::tour_id.eq(tour_id))
            .filter(tours::user_id.eq(user_id))
            .filter(shows::id.ne_all(closed))
            .order((shows::date.asc(), shows::id.asc()))
            .select(DbShow::as_select())
            .load::<DbShow>(&mut conn)?;

        Ok(db_shows.into_iter().map(DomainShow::from).collect())
    }

    fn list_closed_shows(&self, user_id: i32) -> RepositoryResult<Vec<ClosedShow>> {
        use crate::schema::{show_summaries, shows, tours};

        let mut conn = self.conn()?;

        let rows = show_summaries::table
            .inner_join(shows::table.inner_join(tours::table))
            .filter(tours::user_id.eq(user_id))
            .order((shows::date.desc(), shows::id.desc()))
            .select((
                shows::id,
                shows::venue,
                shows::date,
                tours::id,
                tours::name,
                tours::band_name,
                show_summaries::total_sales_cents,
                show_summaries::total_transactions,
            ))
            .load::<(i32, String, chrono::NaiveDate, i32, String, String, i64, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(show_id, venue, date, tour_id, tour_name, band_name, total_sales_cents, total_transactions)| {
                    ClosedShow {
                        show_id,
                        venue,
                        date,
                        tour_id,
                        tour_name,
                        band_name,
                        total_sales_cents,
                        total_transactions,
                    }
                },
            )
            .collect())
    }
}

impl ShowWriter for DieselRepository {
    fn create_show(&self, new_show: &DomainNewShow) -> RepositoryResult<DomainShow> {
        use crate::schema::shows;

        let mut conn = self.conn()?;
        let insertable = DbNewShow::from(new_show);

        let created = diesel::insert_into(shows::table)
            .values(&insertable)
            .get_result::<DbShow>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_show(&self, show_id: i32) -> RepositoryResult<()> {
        use crate::schema::{sales, show_summaries, shows};

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::delete(show_summaries::table.filter(show_summaries::show_id.eq(show_id)))
                .execute(conn)?;
            diesel::delete(sales::table.filter(sales::show_id.eq(show_id))).execute(conn)?;

            let deleted = diesel::delete(shows::table.filter(shows::id.eq(show_id))).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}
