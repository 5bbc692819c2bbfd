use diesel::prelude::*;
use diesel::result::Error as DieselError;

use crate::domain::show_summary::{
    NewShowSummary as DomainNewShowSummary, ShowSummary as DomainShowSummary, ShowSummaryDetails,
    SoldLine,
};
use crate::models::show_summary::{
    NewShowSummary as DbNewShowSummary, ShowSummary as DbShowSummary,
};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, ShowSummaryReader, ShowSummaryWriter,
};

impl ShowSummaryReader for DieselRepository {
    fn get_summary(&self, show_id: i32) -> RepositoryResult<Option<ShowSummaryDetails>> {
        use crate::schema::{show_summaries, shows, tours};

        let mut conn = self.conn()?;

        let row = show_summaries::table
            .inner_join(shows::table.inner_join(tours::table))
            .filter(show_summaries::show_id.eq(show_id))
            .select((
                DbShowSummary::as_select(),
                shows::venue,
                shows::date,
                tours::name,
                tours::band_name,
            ))
            .first::<(DbShowSummary, String, chrono::NaiveDate, String, String)>(&mut conn)
            .optional()?;

        let Some((summary, venue, date, tour_name, band_name)) = row else {
            return Ok(None);
        };

        let summary = DomainShowSummary::try_from(summary)
            .map_err(|err| RepositoryError::DatabaseError(DieselError::DeserializationError(Box::new(err))))?;

        Ok(Some(ShowSummaryDetails {
            summary,
            venue,
            date,
            tour_name,
            band_name,
        }))
    }
}

impl ShowSummaryWriter for DieselRepository {
    fn close_show(&self, show_id: i32) -> RepositoryResult<DomainShowSummary> {
        use crate::schema::{inventory, sales, show_summaries, shows};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainShowSummary, RepositoryError, _>(|conn| {
            let show_exists = diesel::select(diesel::dsl::exists(
                shows::table.filter(shows::id.eq(show_id)),
            ))
            .get_result::<bool>(conn)?;
            if !show_exists {
                return Err(RepositoryError::NotFound);
            }

            let already_closed = diesel::select(diesel::dsl::exists(
                show_summaries::table.filter(show_summaries::show_id.eq(show_id)),
            ))
            .get_result::<bool>(conn)?;
            if already_closed {
                return Err(RepositoryError::ConstraintViolation(
                    "Show already closed".to_string(),
                ));
            }

            let rows = sales::table
                .inner_join(inventory::table)
                .filter(sales::show_id.eq(show_id))
                .select((
                    inventory::name,
                    sales::size,
                    sales::quantity_sold,
                    sales::total_amount_cents,
                    sales::payment_method,
                ))
                .load::<(String, Option<String>, i32, i64, String)>(conn)?;

            let lines: Vec<SoldLine> = rows
                .into_iter()
                .map(|(item_name, size, quantity_sold, total_amount_cents, payment_method)| SoldLine {
                    item_name,
                    size,
                    quantity_sold,
                    total_amount_cents,
                    payment_method: payment_method.parse().unwrap_or_default(),
                })
                .collect();

            let computed = DomainNewShowSummary::from_sales(show_id, &lines)
                .map_err(|err| RepositoryError::Validation(err.to_string()))?;
            let insertable = DbNewShowSummary::try_from(&computed)
                .map_err(|err| RepositoryError::DatabaseError(DieselError::SerializationError(Box::new(err))))?;

            let created = diesel::insert_into(show_summaries::table)
                .values(&insertable)
                .get_result::<DbShowSummary>(conn)?;

            log::info!(
                "closed show {show_id}: {} transaction(s), {} cents",
                computed.total_transactions,
                computed.total_sales_cents
            );

            DomainShowSummary::try_from(created)
                .map_err(|err| RepositoryError::DatabaseError(DieselError::DeserializationError(Box::new(err))))
        })
    }
}
