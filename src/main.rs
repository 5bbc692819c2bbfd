use actix_files::Files;
use actix_web::http::StatusCode;
use actix_web::{App, HttpServer, error, middleware, web};
use dotenvy::dotenv;

use merch_tracker::config::ServerConfig;
use merch_tracker::db::{establish_connection_pool, run_migrations};
use merch_tracker::repository::DieselRepository;
use merch_tracker::routes::inventory::{
    add_bundle, add_item, delete_item, edit_item, show_bundle, show_item, show_items, update_stock,
};
use merch_tracker::routes::sales::{add_bundle_sale, add_sale, show_sales, show_tour_total};
use merch_tracker::routes::shows::{
    add_show, close, delete_show, show_closed_shows, show_open_shows, show_show, show_summary,
};
use merch_tracker::routes::tours::{add_tour, delete_tour, edit_tour, show_tour, show_tours};
use merch_tracker::routes::users::{
    edit_profile, login, register, remove_current_user, remove_user, show_user,
};
use merch_tracker::routes::{error_json, liveness};
use merch_tracker::uploads::{UPLOADS_URL_PREFIX, UploadStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match run_migrations(&pool) {
        Ok(0) => {}
        Ok(applied) => log::info!("Applied {applied} database migrations"),
        Err(e) => {
            log::error!("Failed to run database migrations: {e}");
            std::process::exit(1);
        }
    }

    std::fs::create_dir_all(&config.upload_dir)?;

    let repo = DieselRepository::new(pool);
    let uploads = UploadStore::new(config.upload_dir.clone());
    let auth_config = config.auth.clone();

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let response = error_json(StatusCode::BAD_REQUEST, err.to_string());
            error::InternalError::from_response(err, response).into()
        });
        let query_config = web::QueryConfig::default().error_handler(|err, _req| {
            let response = error_json(StatusCode::BAD_REQUEST, err.to_string());
            error::InternalError::from_response(err, response).into()
        });

        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(json_config)
            .app_data(query_config)
            .service(Files::new(UPLOADS_URL_PREFIX, uploads.dir()))
            .service(liveness)
            // users
            .service(register)
            .service(login)
            .service(edit_profile)
            .service(remove_current_user)
            .service(show_user)
            .service(remove_user)
            // tours
            .service(add_tour)
            .service(show_tours)
            .service(show_tour)
            .service(edit_tour)
            .service(delete_tour)
            // shows; fixed paths before `{show_id}`
            .service(add_show)
            .service(show_open_shows)
            .service(show_closed_shows)
            .service(show_show)
            .service(delete_show)
            .service(close)
            .service(show_summary)
            // inventory; fixed paths before `{item_id}`
            .service(add_item)
            .service(show_items)
            .service(update_stock)
            .service(add_bundle)
            .service(show_bundle)
            .service(show_item)
            .service(edit_item)
            .service(delete_item)
            // sales
            .service(add_sale)
            .service(show_sales)
            .service(show_tour_total)
            .service(add_bundle_sale)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(auth_config.clone()))
            .app_data(web::Data::new(uploads.clone()))
    })
    .bind((config.address.clone(), config.port))?
    .run()
    .await
}
