use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::inventory::{AddBundleForm, AddItemForm, AdjustStockForm, EditItemForm, TourScopeQuery};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::inventory::{
    adjust_stock, create_bundle, create_item, get_bundle, get_item, list_items, modify_item,
    remove_item,
};

#[post("/api/inventory")]
pub async fn add_item(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddItemForm>,
) -> impl Responder {
    match create_item(repo.get_ref(), &user, form.into_inner()) {
        Ok(item) => HttpResponse::Created().json(item),
        Err(err) => service_error_response("create inventory item", err),
    }
}

#[get("/api/inventory")]
pub async fn show_items(
    params: web::Query<TourScopeQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_items(repo.get_ref(), &user, params.tour_id) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => service_error_response("list inventory", err),
    }
}

#[post("/api/inventory/update")]
pub async fn update_stock(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AdjustStockForm>,
) -> impl Responder {
    match adjust_stock(repo.get_ref(), &user, form.into_inner()) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => service_error_response("adjust stock", err),
    }
}

#[post("/api/inventory/bundles")]
pub async fn add_bundle(
    params: web::Query<TourScopeQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddBundleForm>,
) -> impl Responder {
    match create_bundle(repo.get_ref(), &user, params.tour_id, form.into_inner()) {
        Ok(bundle) => HttpResponse::Created().json(bundle),
        Err(err) => service_error_response("create bundle", err),
    }
}

#[get("/api/inventory/bundles/{bundle_id}")]
pub async fn show_bundle(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let bundle_id = path.into_inner();

    match get_bundle(repo.get_ref(), &user, bundle_id) {
        Ok(bundle) => HttpResponse::Ok().json(bundle),
        Err(err) => service_error_response(&format!("load bundle {bundle_id}"), err),
    }
}

#[get("/api/inventory/{item_id}")]
pub async fn show_item(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let item_id = path.into_inner();

    match get_item(repo.get_ref(), &user, item_id) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => service_error_response(&format!("load inventory item {item_id}"), err),
    }
}

#[put("/api/inventory/{item_id}")]
pub async fn edit_item(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditItemForm>,
) -> impl Responder {
    let item_id = path.into_inner();

    match modify_item(repo.get_ref(), &user, item_id, form.into_inner()) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => service_error_response(&format!("update inventory item {item_id}"), err),
    }
}

#[delete("/api/inventory/{item_id}")]
pub async fn delete_item(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let item_id = path.into_inner();

    match remove_item(repo.get_ref(), &user, item_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Item deleted" })),
        Err(err) => service_error_response(&format!("delete inventory item {item_id}"), err),
    }
}
