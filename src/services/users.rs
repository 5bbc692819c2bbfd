use serde::Serialize;

use crate::auth::{AuthenticatedUser, check_role, hash_password, issue_token, verify_password};
use crate::config::AuthConfig;
use crate::domain::user::{UpdateUser, User, UserRole};
use crate::forms::users::{LoginForm, ProfileChanges, RegisterForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::uploads::UploadStore;

/// A user together with a freshly issued bearer token.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub user: User,
    pub token: String,
}

fn start_session(auth: &AuthConfig, user: User) -> ServiceResult<SessionView> {
    let token = issue_token(auth, &user).map_err(|err| ServiceError::Internal(err.to_string()))?;
    Ok(SessionView { user, token })
}

/// Creates an account and signs the new user in.
pub fn register_user<R>(repo: &R, auth: &AuthConfig, form: RegisterForm) -> ServiceResult<SessionView>
where
    R: UserReader + UserWriter + ?Sized,
{
    let registration = form
        .into_registration()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_credentials_by_email(&registration.email)?.is_some() {
        return Err(ServiceError::Conflict("Email is already registered".to_string()));
    }

    let password_hash = hash_password(&registration.password)
        .map_err(|err| ServiceError::Internal(err.to_string()))?;
    let user = repo.create_user(&registration.into_new_user(password_hash))?;

    log::info!("registered user {} with role {}", user.id, user.role);
    start_session(auth, user)
}

/// Verifies credentials and issues a token.
pub fn login_user<R>(repo: &R, auth: &AuthConfig, form: LoginForm) -> ServiceResult<SessionView>
where
    R: UserReader + ?Sized,
{
    let (email, password) = form
        .into_credentials()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let credentials = repo
        .get_credentials_by_email(&email)?
        .ok_or(ServiceError::NotFound)?;

    let matches = verify_password(&password, &credentials.password_hash)
        .map_err(|err| ServiceError::Internal(err.to_string()))?;
    if !matches {
        return Err(ServiceError::InvalidCredentials);
    }

    start_session(auth, credentials.user)
}

pub fn get_user<R>(repo: &R, _user: &AuthenticatedUser, user_id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_id(user_id)?.ok_or(ServiceError::NotFound)
}

/// Applies a partial profile update for the calling user. A new picture
/// replaces the stored one, whose file is then removed.
pub fn update_profile<R>(
    repo: &R,
    uploads: &UploadStore,
    user: &AuthenticatedUser,
    changes: ProfileChanges,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let current = repo.get_user_by_id(user.id)?.ok_or(ServiceError::NotFound)?;
    if changes.is_empty() {
        return Ok(current);
    }

    if let Some(email) = changes.email.as_deref().filter(|email| *email != current.email) {
        if repo.get_credentials_by_email(email)?.is_some() {
            return Err(ServiceError::Conflict("Email is already registered".to_string()));
        }
    }

    let mut updates = UpdateUser::new();
    if let Some(name) = changes.name {
        updates = updates.name(name);
    }
    if let Some(email) = changes.email {
        updates = updates.email(email);
    }
    if let Some(bio) = changes.bio {
        updates = updates.bio(bio);
    }
    if let Some(password) = changes.password {
        let hash =
            hash_password(&password).map_err(|err| ServiceError::Internal(err.to_string()))?;
        updates = updates.password_hash(hash);
    }

    let new_picture = match &changes.picture {
        Some(file) => Some(
            uploads
                .save_profile_pic(file)
                .map_err(|err| ServiceError::Internal(err.to_string()))?,
        ),
        None => None,
    };
    if let Some(url) = &new_picture {
        updates = updates.profile_pic(url.clone());
    }

    match repo.update_user(user.id, &updates) {
        Ok(updated) => {
            if let (Some(_), Some(old)) = (&new_picture, current.profile_pic.as_deref()) {
                uploads.remove(old);
            }
            Ok(updated)
        }
        Err(err) => {
            if let Some(url) = &new_picture {
                uploads.remove(url);
            }
            Err(err.into())
        }
    }
}

/// Deletes the caller's own account by id.
pub fn delete_user<R>(
    repo: &R,
    uploads: &UploadStore,
    user: &AuthenticatedUser,
    user_id: i32,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    if user_id != user.id {
        return Err(ServiceError::Forbidden);
    }

    purge_account(repo, uploads, user_id)?;
    log::info!("user {user_id} deleted their account");
    Ok(())
}

/// Deletes the calling account; restricted to administrators.
pub fn delete_current_user<R>(
    repo: &R,
    uploads: &UploadStore,
    user: &AuthenticatedUser,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    if !check_role(user.role, &[UserRole::Admin]) {
        return Err(ServiceError::Forbidden);
    }

    purge_account(repo, uploads, user.id)?;
    log::info!("admin {} deleted their account", user.id);
    Ok(())
}

/// Deletes the account with everything it owns, then its uploaded picture.
fn purge_account<R>(repo: &R, uploads: &UploadStore, user_id: i32) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let account = repo.get_user_by_id(user_id)?.ok_or(ServiceError::NotFound)?;
    repo.delete_user(user_id)?;

    if let Some(picture) = account.profile_pic.as_deref() {
        uploads.remove(picture);
    }
    Ok(())
}
