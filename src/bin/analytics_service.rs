use pulsetrack::{analytics, serve, state::AnalyticsState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    serve::init_tracing("pulsetrack=debug,axum=info,tower_http=info");

    let state = AnalyticsState::init().await?;

    if let Err(e) = sqlx::migrate!("./migrations/analytics").run(&state.db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    let app = serve::layered(
        serve::common_routes("Analytics Service")
            .merge(analytics::router())
            .with_state(state),
    );

    serve::run(app, 8001).await
}
