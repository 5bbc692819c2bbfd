use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::domain::format_cents;
use crate::domain::show_summary::{ShowSummary, ShowSummaryDetails};
use crate::repository::{ShowReader, ShowSummaryReader, ShowSummaryWriter};
use crate::services::shows::owned_show;
use crate::services::{ServiceError, ServiceResult};

/// Money totals of a summary formatted for display.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FormattedTotals {
    pub total_sales: String,
    pub total_cash: String,
    pub total_card: String,
}

impl From<&ShowSummary> for FormattedTotals {
    fn from(summary: &ShowSummary) -> Self {
        Self {
            total_sales: format_cents(summary.total_sales_cents),
            total_cash: format_cents(summary.total_cash_cents),
            total_card: format_cents(summary.total_card_cents),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    #[serde(flatten)]
    pub summary: ShowSummary,
    #[serde(flatten)]
    pub totals: FormattedTotals,
}

#[derive(Debug, Serialize)]
pub struct SummaryReportView {
    #[serde(flatten)]
    pub details: ShowSummaryDetails,
    #[serde(flatten)]
    pub totals: FormattedTotals,
}

/// Freezes the financial summary of a show the caller owns.
pub fn close_show<R>(repo: &R, user: &AuthenticatedUser, show_id: i32) -> ServiceResult<SummaryView>
where
    R: ShowReader + ShowSummaryWriter + ?Sized,
{
    owned_show(repo, user, show_id)?;

    let summary = repo.close_show(show_id)?;
    Ok(SummaryView {
        totals: FormattedTotals::from(&summary),
        summary,
    })
}

/// Reads the summary of a closed show. A show owned by someone else is
/// reported as unauthorized rather than missing.
pub fn get_summary<R>(repo: &R, user: &AuthenticatedUser, show_id: i32) -> ServiceResult<SummaryReportView>
where
    R: ShowReader + ShowSummaryReader + ?Sized,
{
    let show = repo.get_show_by_id(show_id)?.ok_or(ServiceError::NotFound)?;
    if show.user_id != user.id {
        return Err(ServiceError::Unauthorized);
    }

    let details = repo.get_summary(show_id)?.ok_or(ServiceError::NotFound)?;
    Ok(SummaryReportView {
        totals: FormattedTotals::from(&details.summary),
        details,
    })
}
