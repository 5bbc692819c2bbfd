use crate::auth::AuthenticatedUser;
use crate::domain::tour::Tour;
use crate::forms::tours::{AddTourForm, EditTourForm};
use crate::repository::{TourReader, TourWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn create_tour<R>(repo: &R, user: &AuthenticatedUser, form: AddTourForm) -> ServiceResult<Tour>
where
    R: TourWriter + ?Sized,
{
    let new_tour = form
        .into_new_tour(user.id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_tour(&new_tour).map_err(ServiceError::from)
}

/// Tours owned by the caller, newest first.
pub fn list_tours<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Tour>>
where
    R: TourReader + ?Sized,
{
    repo.list_tours(user.id).map_err(ServiceError::from)
}

pub fn get_tour<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<Tour>
where
    R: TourReader + ?Sized,
{
    repo.get_tour_by_id(tour_id, user.id)?
        .ok_or(ServiceError::NotFound)
}

/// Applies a partial update; an empty patch returns the tour unchanged.
pub fn modify_tour<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
    form: EditTourForm,
) -> ServiceResult<Tour>
where
    R: TourReader + TourWriter + ?Sized,
{
    let updates = form
        .into_update_tour()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if updates.name.is_none()
        && updates.band_name.is_none()
        && updates.start_date.is_none()
        && updates.end_date.is_none()
    {
        return get_tour(repo, user, tour_id);
    }

    repo.update_tour(tour_id, user.id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a tour with every show, sale, summary and item under it.
pub fn remove_tour<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<()>
where
    R: TourWriter + ?Sized,
{
    repo.delete_tour(tour_id, user.id)
        .map_err(ServiceError::from)
}
