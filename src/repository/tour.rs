use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::tour::{
    NewTour as DomainNewTour, Tour as DomainTour, UpdateTour as DomainUpdateTour,
};
use crate::models::tour::{NewTour as DbNewTour, Tour as DbTour, UpdateTour as DbUpdateTour};
use crate::repository::{DieselRepository, RepositoryError, RepositoryResult, TourReader, TourWriter};

impl TourReader for DieselRepository {
    fn get_tour_by_id(&self, id: i32, user_id: i32) -> RepositoryResult<Option<DomainTour>> {
        use crate::schema::tours;

        let mut conn = self.conn()?;

        let tour = tours::table
            .filter(tours::id.eq(id))
            .filter(tours::user_id.eq(user_id))
            .select(DbTour::as_select())
            .first::<DbTour>(&mut conn)
            .optional()?;

        Ok(tour.map(Into::into))
    }

    fn list_tours(&self, user_id: i32) -> RepositoryResult<Vec<DomainTour>> {
        use crate::schema::tours;

        let mut conn = self.conn()?;

        let db_tours = tours::table
            .filter(tours::user_id.eq(user_id))
            .order((tours::created_at.desc(), tours::id.desc()))
            .select(DbTour::as_select())
            .load::<DbTour>(&mut conn)?;

        Ok(db_tours.into_iter().map(DomainTour::from).collect())
    }
}

impl TourWriter for DieselRepository {
    fn create_tour(&self, new_tour: &DomainNewTour) -> RepositoryResult<DomainTour> {
        use crate::schema::tours;

        let mut conn = self.conn()?;
        let insertable = DbNewTour::from(new_tour);

        let created = diesel::insert_into(tours::table)
            .values(&insertable)
            .get_result::<DbTour>(&mut conn)?;

        Ok(created.into())
    }

    fn update_tour(
        &self,
        tour_id: i32,
        user_id: i32,
        updates: &DomainUpdateTour,
    ) -> RepositoryResult<DomainTour> {
        use crate::schema::tours;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateTour::from(updates);

        let target = tours::table
            .filter(tours::id.eq(tour_id))
            .filter(tours::user_id.eq(user_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbTour>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_tour(&self, tour_id: i32, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::tours;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let owned = tours::table
                .filter(tours::id.eq(tour_id))
                .filter(tours::user_id.eq(user_id))
                .select(tours::id)
                .load::<i32>(conn)?;

            if owned.is_empty() {
                return Err(RepositoryError::NotFound);
            }

            purge_tours(conn, &owned)
        })
    }
}

/// Delete the given tours and every row that hangs off them, children first.
pub(crate) fn purge_tours(conn: &mut SqliteConnection, tour_ids: &[i32]) -> RepositoryResult<()> {
    use crate::schema::{bundle_items, inventory, inventory_sizes, sales, show_summaries, shows, tours};

    if tour_ids.is_empty() {
        return Ok(());
    }

    let show_ids = shows::table
        .filter(shows::tour_id.eq_any(tour_ids))
        .select(shows::id)
        .load::<i32>(conn)?;

    diesel::delete(show_summaries::table.filter(show_summaries::show_id.eq_any(&show_ids)))
        .execute(conn)?;
    diesel::delete(sales::table.filter(sales::show_id.eq_any(&show_ids))).execute(conn)?;
    diesel::delete(shows::table.filter(shows::id.eq_any(&show_ids))).execute(conn)?;

    let item_ids = inventory::table
        .filter(inventory::tour_id.eq_any(tour_ids))
        .select(inventory::id)
        .load::<i32>(conn)?;

    diesel::delete(sales::table.filter(sales::inventory_id.eq_any(&item_ids))).execute(conn)?;
    diesel::delete(
        bundle_items::table.filter(
            bundle_items::bundle_id
                .eq_any(&item_ids)
                .or(bundle_items::item_id.eq_any(&item_ids)),
        ),
    )
    .execute(conn)?;
    diesel::delete(inventory_sizes::table.filter(inventory_sizes::inventory_id.eq_any(&item_ids)))
        .execute(conn)?;
    diesel::delete(inventory::table.filter(inventory::id.eq_any(&item_ids))).execute(conn)?;

    let removed = diesel::delete(tours::table.filter(tours::id.eq_any(tour_ids))).execute(conn)?;
    log::info!(
        "purged {removed} tour(s) with {} show(s) and {} inventory item(s)",
        show_ids.len(),
        item_ids.len()
    );

    Ok(())
}
