use axum::{
    routing::{get, post},
    Router,
};
use eta_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes,
    services::notification_service::NotificationService,
    AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            let notif = NotificationService::new(
                state.pool.clone(),
                eta_backend::config::get_config().staff_webhook_url.clone(),
            );
            loop {
                match notif.run_once().await {
                    Ok(true) => {}
                    Ok(false) => {
                        tokio::time::sleep(Duration::from_millis(1000)).await;
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "Webhook worker error");
                        tokio::time::sleep(Duration::from_secs(2)).await;
                    }
                }
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let learner_api = Router::new()
        .route("/api/assessments", get(routes::assessments::list_assessments))
        .route("/api/assessments/:id", get(routes::assessments::get_assessment))
        .route(
            "/api/assessments/:id/submit",
            post(routes::assessments::submit_assessment),
        )
        .route(
            "/api/assessments/:id/attempts",
            get(routes::assessments::my_attempts),
        )
        .route("/api/modules", get(routes::curriculum::list_modules))
        .route(
            "/api/lessons/:id/complete",
            post(routes::curriculum::complete_lesson),
        )
        .route("/api/progress", get(routes::curriculum::progress_summary))
        .route(
            "/api/practice-logs",
            get(routes::practice::list_practice_logs).post(routes::practice::create_practice_log),
        )
        .route(
            "/api/practice-logs/summary",
            get(routes::practice::practice_summary),
        )
        .route(
            "/api/messages",
            get(routes::messages::list_messages).post(routes::messages::send_message),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.learner_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let staff_api = Router::new()
        .route(
            "/api/staff/modules",
            get(routes::staff::list_modules).post(routes::staff::create_module),
        )
        .route(
            "/api/staff/modules/:id",
            axum::routing::patch(routes::staff::update_module),
        )
        .route(
            "/api/staff/modules/:id/lessons",
            get(routes::staff::list_module_lessons),
        )
        .route("/api/staff/lessons", post(routes::staff::create_lesson))
        .route(
            "/api/staff/lessons/:id",
            axum::routing::patch(routes::staff::update_lesson),
        )
        .route(
            "/api/staff/assessments",
            get(routes::staff::list_assessments).post(routes::staff::create_assessment),
        )
        .route(
            "/api/staff/assessments/:id",
            axum::routing::patch(routes::staff::update_assessment),
        )
        .route(
            "/api/staff/assessments/:id/questions",
            get(routes::staff::list_questions).post(routes::staff::create_question),
        )
        .route(
            "/api/staff/questions/:id",
            axum::routing::patch(routes::staff::update_question),
        )
        .route(
            "/api/staff/assessments/:id/rules",
            get(routes::staff::list_rules).post(routes::staff::create_rule),
        )
        .route(
            "/api/staff/rules/:id",
            axum::routing::patch(routes::staff::update_rule),
        )
        .route("/api/staff/responses", get(routes::staff::list_responses))
        .route("/api/staff/dashboard", get(routes::staff::dashboard))
        .route("/api/staff/learners", get(routes::staff::learner_roster))
        .route(
            "/api/staff/messages/unread",
            get(routes::staff::unread_messages),
        )
        .route(
            "/api/staff/messages/:user_id",
            get(routes::staff::learner_thread).post(routes::staff::send_coach_message),
        )
        .layer(axum::middleware::from_fn(middleware::auth::require_staff))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.staff_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(learner_api)
        .merge(staff_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
