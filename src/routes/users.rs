use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::config::AuthConfig;
use crate::forms::users::{LoginForm, RegisterForm, UpdateProfileForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::ServiceError;
use crate::services::users::{
    delete_current_user, delete_user, get_user, login_user, register_user, update_profile,
};
use crate::uploads::UploadStore;

#[post("/api/users")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    auth: web::Data<AuthConfig>,
    form: web::Json<RegisterForm>,
) -> impl Responder {
    match register_user(repo.get_ref(), auth.get_ref(), form.into_inner()) {
        Ok(session) => HttpResponse::Created().json(session),
        Err(err) => service_error_response("register user", err),
    }
}

#[post("/api/users/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    auth: web::Data<AuthConfig>,
    form: web::Json<LoginForm>,
) -> impl Responder {
    match login_user(repo.get_ref(), auth.get_ref(), form.into_inner()) {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(err) => service_error_response("log in", err),
    }
}

#[get("/api/users/{user_id}")]
pub async fn show_user(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let user_id = path.into_inner();

    match get_user(repo.get_ref(), &user, user_id) {
        Ok(found) => HttpResponse::Ok().json(found),
        Err(err) => service_error_response(&format!("load user {user_id}"), err),
    }
}

#[put("/api/users")]
pub async fn edit_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    uploads: web::Data<UploadStore>,
    MultipartForm(form): MultipartForm<UpdateProfileForm>,
) -> impl Responder {
    let changes = match form.into_changes() {
        Ok(changes) => changes,
        Err(err) => return service_error_response("update profile", ServiceError::Form(err.to_string())),
    };

    match update_profile(repo.get_ref(), uploads.get_ref(), &user, changes) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(err) => service_error_response("update profile", err),
    }
}

#[delete("/api/users")]
pub async fn remove_current_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    uploads: web::Data<UploadStore>,
) -> impl Responder {
    match delete_current_user(repo.get_ref(), uploads.get_ref(), &user) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "User deleted" })),
        Err(err) => service_error_response("delete current user", err),
    }
}

#[delete("/api/users/{user_id}")]
pub async fn remove_user(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    uploads: web::Data<UploadStore>,
) -> impl Responder {
    let user_id = path.into_inner();

    match delete_user(repo.get_ref(), uploads.get_ref(), &user, user_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "User deleted" })),
        Err(err) => service_error_response(&format!("delete user {user_id}"), err),
    }
}
