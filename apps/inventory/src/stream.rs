//! Paced server-streaming producer for `StreamItems`.
//!
//! The producer task owns the cursor, so every way out of the loop drops it
//! and the driver kills the server-side cursor.

use domain_inventory::{ItemCursor, ItemError};
use futures::StreamExt;
use grpc_server::Deadline;
use rpc::inventory as proto;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Status;
use tracing::{debug, info, warn};

/// Response stream handed to tonic.
pub type ItemStream = ReceiverStream<Result<proto::Item, Status>>;

const STREAM_BUFFER: usize = 16;

/// Why the producer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Cursor ran out of matches
    Exhausted,
    /// Receiver dropped: client cancelled or disconnected
    ClientGone,
    DeadlineExpired,
    /// A cursor error was sent to the client as `Internal`
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    pub sent: usize,
    pub outcome: StreamOutcome,
}

/// Spawn a producer that forwards `cursor` items, sleeping `pacing` after each.
pub fn spawn_producer(
    cursor: ItemCursor,
    pacing: Duration,
    deadline: Deadline,
) -> (ItemStream, JoinHandle<StreamSummary>) {
    let (tx, rx) = mpsc::channel(STREAM_BUFFER);
    let handle = tokio::spawn(produce(cursor, tx, pacing, deadline));
    (ReceiverStream::new(rx), handle)
}

async fn produce(
    mut cursor: ItemCursor,
    tx: mpsc::Sender<Result<proto::Item, Status>>,
    pacing: Duration,
    deadline: Deadline,
) -> StreamSummary {
    let mut sent = 0;

    let outcome = loop {
        let next = tokio::select! {
            _ = tx.closed() => break StreamOutcome::ClientGone,
            _ = deadline.expired() => break StreamOutcome::DeadlineExpired,
            next = cursor.next() => next,
        };

        match next {
            None => break StreamOutcome::Exhausted,
            Some(Ok(item)) => {
                // A connected client that stops reading fills the buffer.
                let delivered = tokio::select! {
                    _ = deadline.expired() => break StreamOutcome::DeadlineExpired,
                    result = tx.send(Ok(item.into())) => result.is_ok(),
                };
                if !delivered {
                    warn!(sent, "Failed to send item, receiver dropped");
                    break StreamOutcome::ClientGone;
                }
                sent += 1;
            }
            Some(Err(err)) => {
                let context = match &err {
                    ItemError::Decode(_) => "Error decoding item",
                    _ => "Error iterating over cursor",
                };
                warn!(error = %err, sent, "{}", context);
                // The client may already be gone; nothing left to report to.
                tokio::select! {
                    _ = deadline.expired() => break StreamOutcome::DeadlineExpired,
                    _ = tx.send(Err(err.into_status(context))) => break StreamOutcome::Failed,
                }
            }
        }

        tokio::select! {
            _ = tx.closed() => break StreamOutcome::ClientGone,
            _ = deadline.expired() => break StreamOutcome::DeadlineExpired,
            _ = tokio::time::sleep(pacing) => {}
        }
    };

    drop(cursor);

    match outcome {
        StreamOutcome::ClientGone => debug!(sent, "Client left item stream"),
        StreamOutcome::DeadlineExpired => info!(sent, "Item stream deadline expired"),
        _ => info!(sent, ?outcome, "Item stream finished"),
    }

    StreamSummary { sent, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_inventory::{Item, ItemResult};
    use std::sync::Arc;
    use tokio::time::Instant;
    use tonic::Code;

    /// Cursor over `items` that holds `guard` until dropped.
    fn tracked_cursor(items: Vec<ItemResult<Item>>, guard: Arc<()>) -> ItemCursor {
        futures::stream::iter(items)
            .map(move |item| {
                let _held = &guard;
                item
            })
            .boxed()
    }

    fn items(n: usize) -> Vec<ItemResult<Item>> {
        (0..n).map(|i| Ok(Item::new(format!("a{}", i), "widget"))).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_every_item_with_pacing() {
        let guard = Arc::new(());
        let cursor = tracked_cursor(items(3), guard.clone());
        let started = Instant::now();

        let (stream, handle) = spawn_producer(cursor, Duration::from_secs(1), Deadline::none());
        let received: Vec<_> = stream.collect().await;

        assert_eq!(received.len(), 3);
        assert!(received.iter().all(Result::is_ok));
        // One pause after each item, the last included
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(3), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(4), "elapsed {:?}", elapsed);

        let summary = handle.await.unwrap();
        assert_eq!(summary, StreamSummary { sent: 3, outcome: StreamOutcome::Exhausted });
        assert_eq!(Arc::strong_count(&guard), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cursor_ends_immediately() {
        let (stream, handle) = spawn_producer(
            tracked_cursor(Vec::new(), Arc::new(())),
            Duration::from_secs(1),
            Deadline::none(),
        );

        assert_eq!(stream.collect::<Vec<_>>().await.len(), 0);
        assert_eq!(handle.await.unwrap().outcome, StreamOutcome::Exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decode_error_is_internal_and_ends_stream() {
        let guard = Arc::new(());
        let cursor = tracked_cursor(
            vec![
                Ok(Item::new("a1", "widget")),
                Err(ItemError::Decode("invalid type: string \"three\"".to_string())),
                Ok(Item::new("a3", "widget")),
            ],
            guard.clone(),
        );

        let (stream, handle) = spawn_producer(cursor, Duration::from_millis(10), Deadline::none());
        let received: Vec<_> = stream.collect().await;

        assert_eq!(received.len(), 2);
        assert_eq!(received[0].as_ref().unwrap().id, "a1");
        let status = received[1].as_ref().unwrap_err();
        assert_eq!(status.code(), Code::Internal);
        assert!(status.message().starts_with("Error decoding item:"));

        assert_eq!(handle.await.unwrap(), StreamSummary { sent: 1, outcome: StreamOutcome::Failed });
        assert_eq!(Arc::strong_count(&guard), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_cursor_error_is_internal() {
        let cursor = tracked_cursor(
            vec![Err(ItemError::Database("cursor killed".to_string()))],
            Arc::new(()),
        );

        let (mut stream, _handle) = spawn_producer(cursor, Duration::from_millis(10), Deadline::none());
        let status = stream.next().await.unwrap().unwrap_err();

        assert_eq!(status.code(), Code::Internal);
        assert!(status.message().starts_with("Error iterating over cursor:"));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_leaving_releases_cursor() {
        let guard = Arc::new(());
        let cursor = tracked_cursor(items(10), guard.clone());

        let (mut stream, handle) = spawn_producer(cursor, Duration::from_secs(60), Deadline::none());
        assert!(stream.next().await.unwrap().is_ok());
        drop(stream);

        let summary = handle.await.unwrap();
        assert_eq!(summary, StreamSummary { sent: 1, outcome: StreamOutcome::ClientGone });
        assert_eq!(Arc::strong_count(&guard), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_stops_stream() {
        let guard = Arc::new(());
        let cursor = tracked_cursor(items(10), guard.clone());
        let deadline = Deadline::after(Duration::from_millis(2500));

        let (stream, handle) = spawn_producer(cursor, Duration::from_secs(1), deadline);
        let received: Vec<_> = stream.collect().await;

        // Items at t=0s, 1s and 2s; the deadline lands during the third pause
        assert_eq!(received.len(), 3);
        assert_eq!(
            handle.await.unwrap(),
            StreamSummary { sent: 3, outcome: StreamOutcome::DeadlineExpired }
        );
        assert_eq!(Arc::strong_count(&guard), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_stops_producer_when_client_stops_reading() {
        let guard = Arc::new(());
        let cursor = tracked_cursor(items(40), guard.clone());
        let deadline = Deadline::after(Duration::from_secs(30));

        let (stream, handle) = spawn_producer(cursor, Duration::from_millis(10), deadline);

        let summary = tokio::time::timeout(Duration::from_secs(600), handle)
            .await
            .expect("producer still blocked on a full buffer after the deadline")
            .unwrap();
        assert_eq!(
            summary,
            StreamSummary { sent: STREAM_BUFFER, outcome: StreamOutcome::DeadlineExpired }
        );
        assert_eq!(Arc::strong_count(&guard), 1);
        drop(stream);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_stops_error_report_when_client_stops_reading() {
        let mut cursor_items = items(STREAM_BUFFER);
        cursor_items.push(Err(ItemError::Database("cursor killed".to_string())));
        let guard = Arc::new(());
        let cursor = tracked_cursor(cursor_items, guard.clone());

        let (stream, handle) =
            spawn_producer(cursor, Duration::from_millis(10), Deadline::after(Duration::from_secs(5)));

        let summary = tokio::time::timeout(Duration::from_secs(600), handle)
            .await
            .expect("producer still blocked reporting an error after the deadline")
            .unwrap();
        assert_eq!(summary.outcome, StreamOutcome::DeadlineExpired);
        assert_eq!(Arc::strong_count(&guard), 1);
        drop(stream);
    }
}
