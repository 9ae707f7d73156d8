//! Canteen information service.
//!
//! Backend API over a Redis document store: menu items, recipes, opening
//! hours, a food pantry notice, and a day-keyed weekly menu assembled from
//! menu item references. Reads are open; every mutation requires the bearer
//! token provisioned as the `TokenKey` settings document.
//!
//! # Infrastructure
//!
//! - One Redis hash per collection, documents stored as JSON ([`database`])
//! - Weekly menus reference menu items by id; reads expand the references
//!   and drop dangling ones, writes check them ([`menus`])
//! - Day documents and settings singletons are provisioned up front by the
//!   `seed` binary, never created on demand
//!
//! # Setup
//!
//! Provision the expected documents, then start the server.
//!
//! ```sh
//! cargo run --bin seed -- --token-key <secret>
//! cargo run
//! ```
//!
//! Configuration comes from the environment: `RUST_PORT` (default 4000) and
//! `REDIS_URL` (default local instance).

use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{delete, get, post},
    Router,
};

use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod info;
pub mod items;
pub mod menus;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use routes::{
    add_menu_item_handler, create_menu_item_handler, create_recipe_handler,
    delete_menu_item_handler, food_pantry_handler, home_handler, menu_item_handler,
    menu_items_handler, opening_hours_handler, recipes_handler, remove_menu_item_handler,
    update_food_pantry_handler, update_menu_item_handler, update_opening_hours_handler,
    weekly_menu_day_handler, weekly_menu_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/", get(home_handler))
        .route(
            "/menu",
            get(menu_items_handler).post(create_menu_item_handler),
        )
        .route(
            "/menu/{id}",
            get(menu_item_handler)
                .put(update_menu_item_handler)
                .delete(delete_menu_item_handler),
        )
        .route("/recipes", get(recipes_handler).post(create_recipe_handler))
        .route("/weekly_menu", get(weekly_menu_handler))
        .route("/weekly_menu/{day}", get(weekly_menu_day_handler))
        .route("/weekly_menu/{day}/items", post(add_menu_item_handler))
        .route(
            "/weekly_menu/{day}/items/{menuItemId}",
            delete(remove_menu_item_handler),
        )
        .route(
            "/food_pantry",
            get(food_pantry_handler).put(update_food_pantry_handler),
        )
        .route(
            "/opening_hours",
            get(opening_hours_handler).put(update_opening_hours_handler),
        )
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.expect("Failed to bind");
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let interrupt = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}
