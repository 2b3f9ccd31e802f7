use std::convert::Infallible;
use std::future::Future;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use serde::Serialize;
use shared::AppResult;
use tokio::sync::broadcast::{self, error::RecvError};

use super::Change;

/// SSE stream of full snapshots
///
/// Emits one `snapshot` event right away, then another after every change
/// notification (a lagged receiver reloads too). A failed load emits an
/// `error` event and keeps listening. The stream ends when the hub channel
/// closes; a client disconnect drops the stream and with it `rx`.
///
/// Subscribe before calling so no change between subscribe and first load is lost.
pub fn snapshot_stream<T, F, Fut>(
    rx: broadcast::Receiver<Change>,
    load: F,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    T: Serialize + Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = AppResult<T>> + Send + 'static,
{
    let events = stream::unfold((rx, load, true), |(mut rx, load, first)| async move {
        if !first {
            match rx.recv().await {
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "SSE subscriber lagged, reloading snapshot");
                }
                Err(RecvError::Closed) => return None,
            }
        }

        let event = match load().await {
            Ok(snapshot) => Event::default()
                .event("snapshot")
                .json_data(&snapshot)
                .unwrap_or_else(|e| Event::default().event("error").data(e.to_string())),
            Err(e) => {
                tracing::warn!(error = %e, "SSE snapshot load failed");
                Event::default().event("error").data(e.message)
            }
        };

        Some((Ok(event), (rx, load, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
