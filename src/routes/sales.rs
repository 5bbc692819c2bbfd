use actix_web::{HttpResponse, Responder, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::sales::{RecordSaleForm, SellBundleForm, ShowSalesQuery, TourSalesQuery};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::sales::{list_sales, record_sale, sell_bundle, tour_sales_total};

#[post("/api/sales")]
pub async fn add_sale(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<RecordSaleForm>,
) -> impl Responder {
    match record_sale(repo.get_ref(), &user, form.into_inner()) {
        Ok(sale) => HttpResponse::Created().json(sale),
        Err(err) => service_error_response("record sale", err),
    }
}

#[get("/api/sales")]
pub async fn show_sales(
    params: web::Query<ShowSalesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_sales(repo.get_ref(), &user, params.show_id) {
        Ok(sales) => HttpResponse::Ok().json(sales),
        Err(err) => service_error_response("list sales", err),
    }
}

#[get("/api/sales/tour")]
pub async fn show_tour_total(
    params: web::Query<TourSalesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tour_sales_total(repo.get_ref(), &user, params.tour_id) {
        Ok(total) => HttpResponse::Ok().json(total),
        Err(err) => service_error_response("sum tour sales", err),
    }
}

#[post("/api/sales/bundle")]
pub async fn add_bundle_sale(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<SellBundleForm>,
) -> impl Responder {
    match sell_bundle(repo.get_ref(), &user, form.into_inner()) {
        Ok(sale) => HttpResponse::Created().json(sale),
        Err(err) => service_error_response("sell bundle", err),
    }
}
