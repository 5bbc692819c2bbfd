use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::domain::format_cents;
use crate::domain::show::{ClosedShow, Show, ShowDetails};
use crate::forms::shows::AddShowForm;
use crate::repository::{ShowReader, ShowWriter, TourReader};
use crate::services::{ServiceError, ServiceResult};

/// Row of the closed-shows listing with its total formatted for display.
#[derive(Debug, Serialize)]
pub struct ClosedShowView {
    #[serde(flatten)]
    pub show: ClosedShow,
    pub total_sales: String,
}

impl From<ClosedShow> for ClosedShowView {
    fn from(show: ClosedShow) -> Self {
        Self {
            total_sales: format_cents(show.total_sales_cents),
            show,
        }
    }
}

/// Creates a show under a tour the caller owns.
pub fn create_show<R>(repo: &R, user: &AuthenticatedUser, form: AddShowForm) -> ServiceResult<Show>
where
    R: TourReader + ShowWriter + ?Sized,
{
    let new_show = form
        .into_new_show()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_tour_by_id(new_show.tour_id, user.id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.create_show(&new_show).map_err(ServiceError::from)
}

/// Shows of a tour that have not been closed yet.
pub fn list_open_shows<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<Vec<Show>>
where
    R: ShowReader + ?Sized,
{
    repo.list_open_shows(tour_id, user.id)
        .map_err(ServiceError::from)
}

pub fn list_closed_shows<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<ClosedShowView>>
where
    R: ShowReader + ?Sized,
{
    let shows = repo.list_closed_shows(user.id)?;
    Ok(shows.into_iter().map(ClosedShowView::from).collect())
}

/// Looks up a show and confirms the caller owns its tour.
pub fn owned_show<R>(repo: &R, user: &AuthenticatedUser, show_id: i32) -> ServiceResult<ShowDetails>
where
    R: ShowReader + ?Sized,
{
    match repo.get_show_by_id(show_id)? {
        Some(details) if details.user_id == user.id => Ok(details),
        _ => Err(ServiceError::NotFound),
    }
}

pub fn get_show<R>(repo: &R, user: &AuthenticatedUser, show_id: i32) -> ServiceResult<ShowDetails>
where
    R: ShowReader + ?Sized,
{
    owned_show(repo, user, show_id)
}

/// Deletes a show with its sales and summary.
pub fn remove_show<R>(repo: &R, user: &AuthenticatedUser, show_id: i32) -> ServiceResult<()>
where
    R: ShowReader + ShowWriter + ?Sized,
{
    owned_show(repo, user, show_id)?;
    repo.delete_show(show_id).map_err(ServiceError::from)
}
