use crate::config::CrmConfig;
use crate::handlers;
use crate::services::{
    AccountService, HealthProbe, InvoiceService, MongoStore, QuotationService,
};
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use crm_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: CrmConfig,
    pub health: Arc<dyn HealthProbe>,
    pub invoices: InvoiceService,
    pub quotations: QuotationService,
    pub accounts: AccountService,
}

/// Build the full HTTP surface over the given state. Factored out of
/// [`Application::build`] so the test suite can drive the router directly
/// against an in-memory store.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::health::metrics_endpoint))
        .route(
            "/invoices",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route(
            "/invoices/:id",
            get(handlers::invoices::get_invoice)
                .put(handlers::invoices::update_invoice)
                .delete(handlers::invoices::delete_invoice),
        )
        .route("/invoices/:id/close", patch(handlers::invoices::close_invoice))
        .route("/invoices/:id/unlock", patch(handlers::invoices::unlock_invoice))
        .route("/invoices/:id/payments", post(handlers::invoices::record_payment))
        .route(
            "/invoices/:id/payments/:payment_id",
            delete(handlers::invoices::remove_payment),
        )
        .route(
            "/invoices/:id/followups",
            get(handlers::invoices::list_follow_ups).post(handlers::invoices::add_follow_up),
        )
        .route(
            "/invoices/:id/followups/:follow_up_id",
            axum::routing::put(handlers::invoices::update_follow_up)
                .delete(handlers::invoices::remove_follow_up),
        )
        .route("/invoices/:id/notes", post(handlers::invoices::add_note))
        .route(
            "/invoices/:id/notes/:note_id",
            axum::routing::put(handlers::invoices::update_note)
                .delete(handlers::invoices::remove_note),
        )
        .route(
            "/quotations",
            get(handlers::quotations::list_quotations).post(handlers::quotations::create_quotation),
        )
        .route(
            "/quotations/:id",
            get(handlers::quotations::get_quotation)
                .put(handlers::quotations::update_quotation)
                .delete(handlers::quotations::delete_quotation),
        )
        .route(
            "/quotations/:id/close",
            patch(handlers::quotations::close_quotation),
        )
        .route(
            "/quotations/:id/unlock",
            patch(handlers::quotations::unlock_quotation),
        )
        .route(
            "/quotations/:id/followups",
            get(handlers::quotations::list_follow_ups).post(handlers::quotations::add_follow_up),
        )
        .route(
            "/quotations/:id/followups/:follow_up_id",
            axum::routing::put(handlers::quotations::update_follow_up)
                .delete(handlers::quotations::remove_follow_up),
        )
        .route(
            "/accounts",
            get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
        )
        .route("/accounts/leads/active", get(handlers::accounts::list_active_leads))
        .route("/accounts/customers", get(handlers::accounts::list_customers))
        .route(
            "/accounts/:id",
            get(handlers::accounts::get_account)
                .put(handlers::accounts::update_account)
                .delete(handlers::accounts::delete_account),
        )
        .route(
            "/accounts/:id/quotations",
            get(handlers::accounts::list_account_quotations),
        )
        .route(
            "/accounts/:id/followups",
            get(handlers::accounts::list_follow_ups).post(handlers::accounts::add_follow_up),
        )
        .route(
            "/accounts/:id/followups/:follow_up_id",
            axum::routing::put(handlers::accounts::update_follow_up)
                .delete(handlers::accounts::remove_follow_up),
        )
        .route("/accounts/:id/notes", post(handlers::accounts::add_note))
        .route(
            "/accounts/:id/notes/:note_id",
            axum::routing::put(handlers::accounts::update_note)
                .delete(handlers::accounts::remove_note),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: CrmConfig) -> Result<Self, AppError> {
        let store = MongoStore::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        store.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let store = Arc::new(store);
        let policy = config.lock_policy.clone();

        let state = AppState {
            config: config.clone(),
            health: store.clone(),
            invoices: InvoiceService::new(store.clone(), store.clone(), policy.clone()),
            quotations: QuotationService::new(store.clone(), store.clone(), policy),
            accounts: AccountService::new(store),
        };

        let app = router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
