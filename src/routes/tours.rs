use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::tours::{AddTourForm, EditTourForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::tours::{create_tour, get_tour, list_tours, modify_tour, remove_tour};

#[post("/api/tours")]
pub async fn add_tour(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddTourForm>,
) -> impl Responder {
    match create_tour(repo.get_ref(), &user, form.into_inner()) {
        Ok(tour) => HttpResponse::Created().json(tour),
        Err(err) => service_error_response("create tour", err),
    }
}

#[get("/api/tours")]
pub async fn show_tours(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match list_tours(repo.get_ref(), &user) {
        Ok(tours) => HttpResponse::Ok().json(tours),
        Err(err) => service_error_response("list tours", err),
    }
}

#[get("/api/tours/{tour_id}")]
pub async fn show_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tour_id = path.into_inner();

    match get_tour(repo.get_ref(), &user, tour_id) {
        Ok(tour) => HttpResponse::Ok().json(tour),
        Err(err) => service_error_response(&format!("load tour {tour_id}"), err),
    }
}

#[put("/api/tours/{tour_id}")]
pub async fn edit_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditTourForm>,
) -> impl Responder {
    let tour_id = path.into_inner();

    match modify_tour(repo.get_ref(), &user, tour_id, form.into_inner()) {
        Ok(tour) => HttpResponse::Ok().json(tour),
        Err(err) => service_error_response(&format!("update tour {tour_id}"), err),
    }
}

#[delete("/api/tours/{tour_id}")]
pub async fn delete_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let tour_id = path.into_inner();

    match remove_tour(repo.get_ref(), &user, tour_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Tour deleted" })),
        Err(err) => service_error_response(&format!("delete tour {tour_id}"), err),
    }
}
