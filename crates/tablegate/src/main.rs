mod batch;
mod config;
mod context;
mod handlers;
mod state;
mod storage;

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tablegate_core::api::{Request, Response};

use crate::config::Config;
use crate::context::EpochDeadline;
use crate::state::AppState;
use crate::storage::dynamodb::DynamoDbStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tablegate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = Config::from_env();
    let store = DynamoDbStore::from_env(config.region.clone()).await;
    let state = AppState::new(Arc::new(store), config);

    lambda_runtime::run(service_fn(|event: LambdaEvent<Request>| {
        let state = state.clone();
        async move { invoke(&state, event).await }
    }))
    .await
}

async fn invoke(state: &AppState, event: LambdaEvent<Request>) -> Result<Response, Error> {
    let budget = EpochDeadline::new(event.context.deadline);
    tracing::info!(request_id = %event.context.request_id, "handling invocation");
    handlers::handle(state, event.payload, &budget)
        .await
        .map_err(Into::into)
}
