#![recursion_limit = "256"]

mod client_addr;
mod form;
mod rest;
mod styles;

use axum::{
    body::Body,
    extract::Request,
    routing::post,
    Router,
};
use ideanest_app::config::AppConfig;
use ideanest_app::AppContext;
use ideanest_app::infrastructure::security::DAILY_REQUEST_LIMIT;
use ideanest_ui::pages::{
    DeleteEvaluationFn, GetEvaluationFn, GetHistoryFn, MinDescriptionCharsFn,
};
use ideanest_ui::App;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let conf = get_configuration(Some("Cargo.toml")).expect("Failed to load Leptos config");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_context = match AppContext::from_config(&config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<MinDescriptionCharsFn>();
    server_fn::axum::register_explicit::<GetEvaluationFn>();
    server_fn::axum::register_explicit::<GetHistoryFn>();
    server_fn::axum::register_explicit::<DeleteEvaluationFn>();
    tracing::info!("Registered server functions");

    let app = Router::new()
        .merge(rest::router(app_context.clone()))
        .merge(form::router(app_context.clone()))
        .route("/api/{*fn_name}", post({
            let ctx = app_context.clone();
            move |req: Request<Body>| {
                let ctx = ctx.clone();
                async move {
                    handle_server_fns_with_context(move || provide_context(ctx.clone()), req).await
                }
            }
        }))
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(leptos_options);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        "Security: rate limit 5/min, 20/hour. Daily budget: {} of {} evaluations left",
        app_context.cost_tracker.remaining_requests(),
        DAILY_REQUEST_LIMIT
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

fn shell(_options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    let submit_script = r#"
        document.addEventListener('DOMContentLoaded', function() {
            const form = document.querySelector('.idea-form');
            if (!form) return;
            const button = form.querySelector('.idea-form__button');

            form.addEventListener('submit', function() {
                button.disabled = true;
                button.textContent = 'Evaluating... this takes up to a minute';
            });
        });
    "#;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <style>{styles::CSS}</style>
                <MetaTags/>
            </head>
            <body>
                <App/>
                <script>{submit_script}</script>
            </body>
        </html>
    }
}
