use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::domain::format_cents;
use crate::domain::inventory::ItemType;
use crate::domain::sale::{NewSale, Sale, SaleLine};
use crate::forms::MAX_AMOUNT_CENTS;
use crate::forms::sales::{RecordSaleForm, SellBundleForm};
use crate::repository::{InventoryReader, SaleReader, SaleWriter, ShowReader, TourReader};
use crate::services::shows::owned_show;
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Serialize)]
pub struct SaleView {
    #[serde(flatten)]
    pub sale: Sale,
    pub total_amount: String,
}

impl From<Sale> for SaleView {
    fn from(sale: Sale) -> Self {
        Self {
            total_amount: format_cents(sale.total_amount_cents),
            sale,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaleLineView {
    #[serde(flatten)]
    pub line: SaleLine,
    pub total_amount: String,
    pub price: String,
}

impl From<SaleLine> for SaleLineView {
    fn from(line: SaleLine) -> Self {
        Self {
            total_amount: format_cents(line.total_amount_cents),
            price: format_cents(line.price_cents),
            line,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TourSalesView {
    pub tour_id: i32,
    pub total_sales_cents: i64,
    pub total_sales: String,
}

/// Records a sale against a show the caller owns.
pub fn record_sale<R>(repo: &R, user: &AuthenticatedUser, form: RecordSaleForm) -> ServiceResult<SaleView>
where
    R: ShowReader + SaleWriter + ?Sized,
{
    let new_sale = form
        .into_new_sale()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    owned_show(repo, user, new_sale.show_id)?;
    repo.record_sale(&new_sale)
        .map(SaleView::from)
        .map_err(ServiceError::from)
}

/// Sells a bundle at its list price times the quantity.
pub fn sell_bundle<R>(repo: &R, user: &AuthenticatedUser, form: SellBundleForm) -> ServiceResult<SaleView>
where
    R: ShowReader + InventoryReader + SaleWriter + ?Sized,
{
    let bundle_sale = form
        .into_bundle_sale()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    owned_show(repo, user, bundle_sale.show_id)?;

    let bundle = repo
        .get_item_by_id(bundle_sale.bundle_id)?
        .filter(|item| item.item_type == ItemType::Bundle)
        .ok_or(ServiceError::NotFound)?;

    let total_amount_cents = bundle
        .price_cents
        .checked_mul(i64::from(bundle_sale.quantity_sold))
        .filter(|total| *total <= MAX_AMOUNT_CENTS)
        .ok_or_else(|| ServiceError::Form("Sale total is too large".to_string()))?;

    let new_sale = NewSale::new(
        bundle.id,
        bundle_sale.show_id,
        bundle_sale.quantity_sold,
        total_amount_cents,
        bundle_sale.payment_method,
    );

    repo.record_sale(&new_sale)
        .map(SaleView::from)
        .map_err(ServiceError::from)
}

/// Sales of a show, newest first; a foreign show yields an empty list.
pub fn list_sales<R>(repo: &R, user: &AuthenticatedUser, show_id: i32) -> ServiceResult<Vec<SaleLineView>>
where
    R: ShowReader + SaleReader + ?Sized,
{
    match owned_show(repo, user, show_id) {
        Ok(_) => {}
        Err(ServiceError::NotFound) => return Ok(Vec::new()),
        Err(err) => return Err(err),
    }

    let lines = repo.list_sales_for_show(show_id)?;
    Ok(lines.into_iter().map(SaleLineView::from).collect())
}

/// Sum of every sale recorded at any show of the tour.
pub fn tour_sales_total<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<TourSalesView>
where
    R: TourReader + SaleReader + ?Sized,
{
    if repo.get_tour_by_id(tour_id, user.id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let total_sales_cents = repo.tour_sales_total(tour_id)?;
    Ok(TourSalesView {
        tour_id,
        total_sales_cents,
        total_sales: format_cents(total_sales_cents),
    })
}
