use pulsetrack::{serve, state::UserState, users};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    serve::init_tracing("pulsetrack=debug,axum=info,tower_http=info");

    let state = UserState::init().await?;

    if let Err(e) = sqlx::migrate!("./migrations/users").run(&state.db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    let app = serve::layered(
        serve::common_routes("User Service")
            .merge(users::router())
            .with_state(state),
    );

    serve::run(app, 8000).await
}
