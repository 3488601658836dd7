//! The mux core: source registration, the merger, and the broadcaster.
//!
//! A [`Pipeline<E>`] is one end-to-end instance — Services and Endpoints are
//! two independently constructed pipelines parameterised over their entity
//! type; nothing here assumes which one it is. Each pipeline spawns exactly
//! one agent task that owns the merger state and the handler list and drives
//! every broadcast, so callers never need to synchronize with it directly.

mod handler;
mod merger;


pub use handler::Handler;

use crate::config::MuxConfig;
use crate::entity::Named;
use crate::update::Update;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use merger::Merger;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{StreamExt, StreamMap};
use tracing::{debug, trace};

/// Messages the agent task accepts from outside its own select loop.
///
/// Both source registration and handler registration are routed through this
/// channel rather than through a shared mutable structure, so the agent is
/// the only writer of its `StreamMap` and handler list — new state is either
/// fully visible before the next broadcast or not visible at all.
enum Control<E> {
    NewSource(String, mpsc::Receiver<Update<E>>),
    RegisterHandler(Arc<dyn Handler<E>>),
}

/// One end-to-end mux instance: source channels in, merged snapshots out.
///
/// Cloning a `Pipeline` is cheap and shares the same agent task and source
/// map — clone it freely to hand out to multiple producers.
pub struct Pipeline<E> {
    sources: Arc<DashMap<String, mpsc::Sender<Update<E>>>>,
    control: mpsc::UnboundedSender<Control<E>>,
    channel_buffer: usize,
}

impl<E> Clone for Pipeline<E> {
    fn clone(&self) -> Self {
        Self {
            sources: Arc::clone(&self.sources),
            control: self.control.clone(),
            channel_buffer: self.channel_buffer,
        }
    }
}

impl<E> Pipeline<E>
where
    E: Named + Send + Sync + 'static,
{
    /// Construct an empty pipeline and spawn its agent task.
    ///
    /// Sources and handlers may be registered in any order, before or after
    /// construction returns; the agent is already running and selecting over
    /// an (initially empty) set of source streams.
    pub fn new(config: MuxConfig) -> Self {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_agent(control_rx));
        Self {
            sources: Arc::new(DashMap::new()),
            control: control_tx,
            channel_buffer: config.channel_buffer,
        }
    }

    /// Register (or look up) the inbound channel for `source_name`.
    ///
    /// Idempotent: repeated calls with the same name return the identical
    /// sender, so two producers that agree on a source name always share one
    /// channel and one position in the merger's source map. Safe to call
    /// concurrently with producers already sending and with handlers being
    /// registered.
    pub fn channel(&self, source_name: &str) -> mpsc::Sender<Update<E>> {
        match self.sources.entry(source_name.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let (tx, rx) = mpsc::channel(self.channel_buffer);
                entry.insert(tx.clone());
                debug!(source = source_name, "registered new source channel");
                // The agent task outlives every Pipeline clone for the
                // process lifetime; a send failure here would mean the
                // agent already panicked, in which case there is nothing
                // left to notify.
                let _ = self
                    .control
                    .send(Control::NewSource(source_name.to_string(), rx));
                tx
            }
        }
    }

    /// Register a handler to receive every snapshot emitted from this point
    /// onward. Handlers registered after updates have already flowed are not
    /// replayed the current state — callers needing initial state must
    /// register before producers start sending.
    pub fn register_handler<H>(&self, handler: H)
    where
        H: Handler<E> + 'static,
    {
        let _ = self
            .control
            .send(Control::RegisterHandler(Arc::new(handler)));
    }
}

async fn run_agent<E>(mut control: mpsc::UnboundedReceiver<Control<E>>)
where
    E: Named + Send + Sync + 'static,
{
    let mut streams: StreamMap<String, ReceiverStream<Update<E>>> = StreamMap::new();
    let mut merger: Merger<E> = Merger::new();
    let mut handlers: Vec<Arc<dyn Handler<E>>> = Vec::new();

    loop {
        tokio::select! {
            biased;

            msg = control.recv() => {
                match msg {
                    Some(Control::NewSource(name, rx)) => {
                        streams.insert(name, ReceiverStream::new(rx));
                    }
                    Some(Control::RegisterHandler(handler)) => {
                        handlers.push(handler);
                    }
                    // Every Pipeline clone (and thus every control sender)
                    // has been dropped; nothing can register further sources
                    // or handlers, so there is no reason to keep running.
                    None => break,
                }
            }

            Some((source, update)) = streams.next(), if !streams.is_empty() => {
                trace!(source = %source, "applying update");
                merger.apply(&source, update);
                let snapshot = merger.snapshot();
                debug!(entities = snapshot.len(), handlers = handlers.len(), "broadcasting snapshot");
                for handler in &handlers {
                    handler.on_update(snapshot.clone()).await;
                }
            }
        }
    }
}
