use merch_tracker::auth::decode_token;
use merch_tracker::config::AuthConfig;
use merch_tracker::forms::AmountInput;
use merch_tracker::forms::inventory::{AddBundleForm, BundleItemInput};
use merch_tracker::forms::sales::{RecordSaleForm, SellBundleForm};
use merch_tracker::forms::users::{LoginForm, RegisterForm};
use merch_tracker::repository::InventoryReader;
use merch_tracker::services::ServiceError;
use merch_tracker::services::inventory::{create_bundle, list_items};
use merch_tracker::services::sales::{list_sales, record_sale, sell_bundle, tour_sales_total};
use merch_tracker::services::summaries::{close_show, get_summary};
use merch_tracker::services::users::{login_user, register_user};

mod common;

use common::{Fixture, TestDb};

fn sale_form(inventory_id: i32, show_id: i32, quantity: i32, total: f64, method: &str) -> RecordSaleForm {
    RecordSaleForm {
        inventory_id,
        show_id,
        quantity_sold: quantity,
        total_amount: AmountInput::from(total),
        payment_method: method.to_string(),
        size: None,
    }
}

#[test]
fn register_then_login_issues_verifiable_tokens() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let auth = AuthConfig::new("integration-secret", 3600);

    let session = register_user(
        &repo,
        &auth,
        RegisterForm {
            name: "Road Manager".to_string(),
            email: "Road@Example.com".to_string(),
            password: "correct horse".to_string(),
            role: Some("superuser".to_string()),
        },
    )
    .unwrap();
    assert_eq!(session.user.email, "road@example.com");
    assert_eq!(session.user.role.as_str(), "user");

    let identity = decode_token(&auth, &session.token).unwrap();
    assert_eq!(identity.id, session.user.id);

    let err = register_user(
        &repo,
        &auth,
        RegisterForm {
            name: "Copycat".to_string(),
            email: "road@example.com".to_string(),
            password: "another password".to_string(),
            role: None,
        },
    )
    .expect_err("duplicate email");
    assert!(matches!(err, ServiceError::Conflict(_)));

    let login = |password: &str| {
        login_user(
            &repo,
            &auth,
            LoginForm {
                email: "road@example.com".to_string(),
                password: password.to_string(),
            },
        )
    };
    assert_eq!(login("correct horse").unwrap().user.id, session.user.id);
    assert!(matches!(login("wrong horse"), Err(ServiceError::InvalidCredentials)));

    let unknown = login_user(
        &repo,
        &auth,
        LoginForm {
            email: "nobody@example.com".to_string(),
            password: "correct horse".to_string(),
        },
    );
    assert!(matches!(unknown, Err(ServiceError::NotFound)));
}

#[test]
fn sales_at_foreign_shows_are_refused() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let owner = Fixture::new(&repo, "owner@example.com");
    let intruder = Fixture::new(&repo, "intruder@example.com");
    let poster = owner.hard_item(&repo, "Poster", 2000, 10);

    let err = record_sale(
        &repo,
        &intruder.identity(),
        sale_form(poster.id, owner.show.id, 1, 20.0, "cash"),
    )
    .expect_err("foreign show");
    assert!(matches!(err, ServiceError::NotFound));
    assert_eq!(repo.get_item_by_id(poster.id).unwrap().unwrap().quantity, Some(10));

    assert!(list_sales(&repo, &intruder.identity(), owner.show.id).unwrap().is_empty());
    assert!(list_items(&repo, &intruder.identity(), owner.tour.id).unwrap().is_empty());
    assert!(matches!(
        tour_sales_total(&repo, &intruder.identity(), owner.tour.id),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn show_close_summary_reports_formatted_totals() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let fixture = Fixture::new(&repo, "closer@example.com");
    let stranger = Fixture::new(&repo, "stranger@example.com");
    let poster = fixture.hard_item(&repo, "Poster", 2000, 10);
    let user = fixture.identity();

    record_sale(&repo, &user, sale_form(poster.id, fixture.show.id, 1, 20.0, "cash")).unwrap();
    record_sale(&repo, &user, sale_form(poster.id, fixture.show.id, 1, 30.0, "cash")).unwrap();
    let card = record_sale(&repo, &user, sale_form(poster.id, fixture.show.id, 1, 30.0, "card")).unwrap();
    assert_eq!(card.total_amount, "30.00");

    let closed = close_show(&repo, &user, fixture.show.id).unwrap();
    assert_eq!(closed.totals.total_sales, "80.00");
    assert_eq!(closed.totals.total_cash, "50.00");
    assert_eq!(closed.totals.total_card, "30.00");
    assert_eq!(closed.summary.total_transactions, 3);

    assert!(matches!(
        close_show(&repo, &user, fixture.show.id),
        Err(ServiceError::Conflict(_))
    ));

    let report = get_summary(&repo, &user, fixture.show.id).unwrap();
    assert_eq!(report.details.summary, closed.summary);
    assert_eq!(report.details.band_name, "The Amps");

    assert!(matches!(
        get_summary(&repo, &stranger.identity(), fixture.show.id),
        Err(ServiceError::Unauthorized)
    ));
    assert!(matches!(
        get_summary(&repo, &stranger.identity(), stranger.show.id),
        Err(ServiceError::NotFound)
    ));
}

#[test]
fn bundle_shortcut_sells_at_list_price() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let fixture = Fixture::new(&repo, "bundler@example.com");
    let user = fixture.identity();
    let poster = fixture.hard_item(&repo, "Poster", 2000, 5);
    let pin = fixture.hard_item(&repo, "Pin", 500, 3);
    let vinyl = fixture.hard_item(&repo, "Vinyl", 3000, 8);

    let bundle = create_bundle(
        &repo,
        &user,
        fixture.tour.id,
        AddBundleForm {
            name: "Fan Pack".to_string(),
            price: AmountInput::from("45.00"),
            image_url: None,
            items: vec![
                BundleItemInput { item_id: poster.id },
                BundleItemInput { item_id: pin.id },
                BundleItemInput { item_id: vinyl.id },
            ],
        },
    )
    .unwrap();
    assert_eq!(bundle.available_quantity, 3);
    assert_eq!(bundle.price, "45.00");

    let sale = sell_bundle(
        &repo,
        &user,
        SellBundleForm {
            bundle_id: bundle.item.id,
            show_id: fixture.show.id,
            quantity_sold: 2,
            payment_method: Some("card".to_string()),
        },
    )
    .unwrap();
    assert_eq!(sale.total_amount, "90.00");

    let not_a_bundle = sell_bundle(
        &repo,
        &user,
        SellBundleForm {
            bundle_id: poster.id,
            show_id: fixture.show.id,
            quantity_sold: 1,
            payment_method: None,
        },
    );
    assert!(matches!(not_a_bundle, Err(ServiceError::NotFound)));

    let total = tour_sales_total(&repo, &user, fixture.tour.id).unwrap();
    assert_eq!(total.total_sales_cents, 9000);
}
