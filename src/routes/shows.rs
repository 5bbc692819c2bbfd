use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::shows::{AddShowForm, OpenShowsQuery};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::shows::{create_show, get_show, list_closed_shows, list_open_shows, remove_show};
use crate::services::summaries::{close_show, get_summary};

#[post("/api/shows")]
pub async fn add_show(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddShowForm>,
) -> impl Responder {
    match create_show(repo.get_ref(), &user, form.into_inner()) {
        Ok(show) => HttpResponse::Created().json(show),
        Err(err) => service_error_response("create show", err),
    }
}

#[get("/api/shows")]
pub async fn show_open_shows(
    params: web::Query<OpenShowsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_open_shows(repo.get_ref(), &user, params.tour_id) {
        Ok(shows) => HttpResponse::Ok().json(shows),
        Err(err) => service_error_response("list open shows", err),
    }
}

#[get("/api/shows/closed")]
pub async fn show_closed_shows(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_closed_shows(repo.get_ref(), &user) {
        Ok(shows) => HttpResponse::Ok().json(shows),
        Err(err) => service_error_response("list closed shows", err),
    }
}

#[get("/api/shows/{show_id}")]
pub async fn show_show(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let show_id = path.into_inner();

    match get_show(repo.get_ref(), &user, show_id) {
        Ok(show) => HttpResponse::Ok().json(show),
        Err(err) => service_error_response(&format!("load show {show_id}"), err),
    }
}

#[delete("/api/shows/{show_id}")]
pub async fn delete_show(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let show_id = path.into_inner();

    match remove_show(repo.get_ref(), &user, show_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Show deleted" })),
        Err(err) => service_error_response(&format!("delete show {show_id}"), err),
    }
}

#[post("/api/shows/{show_id}/close")]
pub async fn close(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let show_id = path.into_inner();

    match close_show(repo.get_ref(), &user, show_id) {
        Ok(summary) => HttpResponse::Created().json(summary),
        Err(err) => service_error_response(&format!("close show {show_id}"), err),
    }
}

#[get("/api/shows/{show_id}/summary")]
pub async fn show_summary(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let show_id = path.into_inner();

    match get_summary(repo.get_ref(), &user, show_id) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(err) => service_error_response(&format!("load summary of show {show_id}"), err),
    }
}
