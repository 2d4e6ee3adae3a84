//! Drives the advice request and the provider lookup for one results view.
//!
//! The two pipelines run concurrently and never see each other; each result
//! lands in its own slot of a [`ResultsSession`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{Instrument, debug, info, info_span};

use super::view::{ResultsSession, ResultsView, SlotUpdate};
use crate::advice::AdvicePipeline;
use crate::intake::IntakeForm;
use crate::places::{GeoPosition, LocationState, ProviderLookup};

/// Buffered view snapshots per watcher: initial, advice, location.
const VIEW_BUFFER: usize = 3;

/// Runs both results pipelines for a submitted form.
pub struct ResultsCoordinator {
    advice: Arc<AdvicePipeline>,
    lookup: Arc<ProviderLookup>,
}

impl ResultsCoordinator {
    pub fn new(advice: Arc<AdvicePipeline>, lookup: Arc<ProviderLookup>) -> Self {
        Self { advice, lookup }
    }

    pub fn advice(&self) -> &Arc<AdvicePipeline> {
        &self.advice
    }

    pub fn lookup(&self) -> &Arc<ProviderLookup> {
        &self.lookup
    }

    /// Run both pipelines and return once the advice slot resolves.
    ///
    /// The lookup gets until then to finish. If it has not, it is dropped and
    /// the location stays `Located`, so the view reports providers as pending.
    pub async fn resolve(&self, form: IntakeForm, position: Option<GeoPosition>) -> ResultsSession {
        let mut session = ResultsSession::new();
        let span = info_span!("results", request_id = %session.request_id);

        async {
            info!(located = position.is_some(), "Resolving results");
            let advice = self.advice.request_advice(&form);
            let lookup = self.lookup.resolve(position);
            tokio::pin!(advice, lookup);

            let result = tokio::select! {
                biased;
                location = &mut lookup => {
                    session.apply(SlotUpdate::Location(location));
                    advice.await
                }
                result = &mut advice => {
                    session.apply(SlotUpdate::Location(
                        LocationState::Unrequested.on_position(position),
                    ));
                    result
                }
            };
            session.apply(SlotUpdate::Advice(result));

            info!(
                ok = matches!(session.view(), ResultsView::Ready { .. }),
                providers = session.location().providers().len(),
                settled = session.is_settled(),
                elapsed_ms = session.elapsed_ms(),
                "Results resolved"
            );
        }
        .instrument(span)
        .await;

        session
    }

    /// Stream view snapshots: `Loading` first, then one per resolved slot in
    /// completion order.
    ///
    /// Dropping the stream does not cancel the pipelines; their late results
    /// are discarded.
    pub fn watch(&self, form: IntakeForm, position: Option<GeoPosition>) -> ReceiverStream<ResultsView> {
        let (view_tx, view_rx) = mpsc::channel(VIEW_BUFFER);
        let (slot_tx, mut slot_rx) = mpsc::channel::<SlotUpdate>(2);

        let mut session = ResultsSession::new();
        let span = info_span!("results_watch", request_id = %session.request_id);

        let advice = Arc::clone(&self.advice);
        let advice_tx = slot_tx.clone();
        tokio::spawn(
            async move {
                let result = advice.request_advice(&form).await;
                if advice_tx.send(SlotUpdate::Advice(result)).await.is_err() {
                    debug!("Viewer gone; discarding advice result");
                }
            }
            .instrument(span.clone()),
        );

        let lookup = Arc::clone(&self.lookup);
        tokio::spawn(
            async move {
                let location = lookup.resolve(position).await;
                if slot_tx.send(SlotUpdate::Location(location)).await.is_err() {
                    debug!("Viewer gone; discarding provider result");
                }
            }
            .instrument(span.clone()),
        );

        tokio::spawn(
            async move {
                if view_tx.send(session.view()).await.is_err() {
                    return;
                }
                while let Some(update) = slot_rx.recv().await {
                    session.apply(update);
                    if view_tx.send(session.view()).await.is_err() {
                        debug!("Viewer gone; stopping results stream");
                        return;
                    }
                    if session.is_settled() {
                        break;
                    }
                }
                info!(elapsed_ms = session.elapsed_ms(), "Results stream complete");
            }
            .instrument(span),
        );

        ReceiverStream::new(view_rx)
    }
}
