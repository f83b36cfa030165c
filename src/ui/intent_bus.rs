//! Merged intent stream for one active window of the screen.
//!
//! Every event source (search button, poster, history strip) pushes into the
//! same unbounded channel, and a single forwarder task drains it into the
//! view-model in arrival order. The first value on the channel is always
//! [`MovieSearchIntent::ScreenLoaded`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ui::search::{IntentSink, MovieSearchIntent};

pub struct IntentSubscription {
    sender: mpsc::UnboundedSender<MovieSearchIntent>,
    forwarder: JoinHandle<()>,
}

impl IntentSubscription {
    /// Open the stream, queue `ScreenLoaded` and start forwarding into `sink`.
    pub fn start(sink: Arc<dyn IntentSink>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let _ = sender.send(MovieSearchIntent::ScreenLoaded);

        let forwarder = tokio::spawn(async move {
            while let Some(intent) = receiver.recv().await {
                tracing::trace!(?intent, "forwarding intent");
                if let Err(err) = sink.process_input(intent) {
                    tracing::error!(error = %err, "error processing input");
                }
            }
        });

        Self { sender, forwarder }
    }

    /// Push an intent from one of the screen's event sources.
    pub fn emit(&self, intent: MovieSearchIntent) {
        if self.sender.send(intent).is_err() {
            tracing::error!("intent forwarder stopped; intent dropped");
        }
    }

    /// Stop forwarding. Intents not yet forwarded are discarded.
    pub fn cancel(self) {
        self.forwarder.abort();
    }
}

impl Drop for IntentSubscription {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}
