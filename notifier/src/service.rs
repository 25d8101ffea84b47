use std::sync::Arc;

use alloy::{providers::Provider, rpc::types::Log};
use futures::{future::join_all, Stream, StreamExt};
use gravita_chain::{ChainConnection, ChainReader, SupportedChain};
use tokio::{
    sync::Semaphore,
    task::{JoinError, JoinHandle, JoinSet},
};
use tracing::{debug, error, info};

use crate::{
    discord::embeds::build_embed,
    error::AppError,
    events::{decode_event, EventKind},
    handlers::{enrich, HandlerContext},
};

/// Run one log through decode → enrich → format → send.
async fn process(
    ctx: &HandlerContext,
    kind: EventKind,
    chain: SupportedChain,
    log: &Log,
) -> Result<(), AppError> {
    let event = decode_event(kind, log)?;
    let record = enrich(ctx, chain, &event).await?;

    if let Ok(json) = serde_json::to_string(&record) {
        debug!(event = %event.kind(), chain = %chain, record = %json, "Enriched event");
    }

    let embed = build_embed(&record);
    ctx.notifier.send(&embed).await
}

/// Handle one incoming log.
///
/// This is the only failure boundary of the pipeline: any error is logged with
/// the event kind, chain and transaction hash, then dropped. Nothing is retried.
pub async fn dispatch(ctx: &HandlerContext, kind: EventKind, chain: SupportedChain, log: Log) {
    let tx_hash = log.transaction_hash;

    match process(ctx, kind, chain, &log).await {
        Ok(()) => info!(event = %kind, chain = %chain, tx_hash = ?tx_hash, "Notification sent"),
        Err(err) => error!(
            event = %kind,
            chain = %chain,
            tx_hash = ?tx_hash,
            error = %err,
            "Error handling event"
        ),
    }
}

/// Subscribe to `kind` on one chain and spawn a task per incoming log.
///
/// If the subscription cannot be opened or its stream ends, a connection error
/// is logged and no new logs are read; there is no reconnection. Pipelines
/// already spawned are awaited before the task finishes.
pub fn spawn_subscription<P>(
    connection: Arc<ChainConnection<P>>,
    kind: EventKind,
    ctx: Arc<HandlerContext>,
    in_flight: Arc<Semaphore>,
) -> JoinHandle<()>
where
    P: Provider + Clone + 'static,
{
    tokio::spawn(async move {
        let chain = connection.chain();
        let filter = kind.filter(connection.contracts());

        let stream = match connection.subscribe_logs(&filter).await {
            Ok(stream) => stream,
            Err(err) => {
                let err = AppError::Connection {
                    chain,
                    message: err.to_string(),
                };
                error!(event = %kind, chain = %chain, error = %err, "Subscription failed");
                return;
            }
        };

        info!(event = %kind, chain = %chain, "Listening");

        let mut pipelines = forward_logs(stream, kind, chain, &ctx, &in_flight).await;

        let err = AppError::Connection {
            chain,
            message: "subscription stream closed".to_string(),
        };
        error!(event = %kind, chain = %chain, error = %err, "Subscription ended");

        while let Some(result) = pipelines.join_next().await {
            log_pipeline_failure(kind, chain, result);
        }
    })
}

/// Read `stream` to the end, spawning one pipeline per log.
///
/// The reader never waits on `in_flight`: each pipeline takes its own permit,
/// so the subscription keeps draining the transport while the limit is
/// reached. Returns the pipelines that had not finished when the stream ended.
async fn forward_logs<S>(
    stream: S,
    kind: EventKind,
    chain: SupportedChain,
    ctx: &Arc<HandlerContext>,
    in_flight: &Arc<Semaphore>,
) -> JoinSet<()>
where
    S: Stream<Item = Log>,
{
    tokio::pin!(stream);
    let mut pipelines = JoinSet::new();

    while let Some(log) = stream.next().await {
        let ctx = ctx.clone();
        let in_flight = in_flight.clone();

        pipelines.spawn(async move {
            let Ok(_permit) = in_flight.acquire_owned().await else {
                error!(
                    event = %kind,
                    chain = %chain,
                    tx_hash = ?log.transaction_hash,
                    "In-flight limiter closed, event dropped"
                );
                return;
            };
            dispatch(&ctx, kind, chain, log).await;
        });

        while let Some(result) = pipelines.try_join_next() {
            log_pipeline_failure(kind, chain, result);
        }
    }

    pipelines
}

fn log_pipeline_failure(kind: EventKind, chain: SupportedChain, result: Result<(), JoinError>) {
    if let Err(err) = result {
        error!(event = %kind, chain = %chain, error = %err, "Event task failed");
    }
}

/// Wait for every subscription task, logging the ones that panicked or were
/// cancelled. Returns how many failed.
pub async fn join_subscriptions(handles: Vec<JoinHandle<()>>) -> usize {
    let mut failed = 0;
    for result in join_all(handles).await {
        if let Err(err) = result {
            error!(error = %err, "Subscription task failed");
            failed += 1;
        }
    }
    failed
}
