use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, Mutex};

use crate::{
    console::Console,
    persist::{PersistError, QsoSink},
    qso::QsoRecord,
    status::Status,
};

use super::events::ConsoleEvent;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
    #[error("console runtime has stopped")]
    ChannelClosed,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Hand each record to the sink as soon as it is finalized. When off,
    /// records stay on the stack until `write_pending` or `shutdown`.
    pub write_on_finalize: bool,
    pub command_capacity: usize,
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            write_on_finalize: false,
            command_capacity: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable front end to a console owned by a background task.
#[derive(Clone)]
pub struct ConsoleHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<ConsoleEvent>,
}

enum Command {
    AppendChar {
        c: char,
        resp: oneshot::Sender<Status>,
    },
    Evaluate {
        token: String,
        resp: oneshot::Sender<Status>,
    },
    Finalize {
        resp: oneshot::Sender<Status>,
    },
    Clear {
        resp: oneshot::Sender<()>,
    },
    LoadPrev {
        resp: oneshot::Sender<Option<usize>>,
    },
    LoadNext {
        resp: oneshot::Sender<Option<usize>>,
    },
    DeleteSelected {
        resp: oneshot::Sender<Option<usize>>,
    },
    Current {
        resp: oneshot::Sender<QsoRecord>,
    },
    Pending {
        resp: oneshot::Sender<Vec<QsoRecord>>,
    },
    WritePending {
        resp: oneshot::Sender<Result<usize, RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

type SharedSink = Arc<Mutex<Box<dyn QsoSink>>>;

/// Moves `console` onto a tokio task and returns its handle.
///
/// Commands are processed one at a time in arrival order.
pub fn spawn_console(
    console: Console,
    sink: Option<Box<dyn QsoSink>>,
    config: RuntimeConfig,
) -> ConsoleHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_capacity);
    let (events_tx, _) = broadcast::channel::<ConsoleEvent>(config.event_capacity);

    let events_tx_loop = events_tx.clone();
    let sink: Option<SharedSink> = sink.map(|s| Arc::new(Mutex::new(s)));

    tokio::spawn(async move {
        let mut console = console;
        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(cmd, &mut console, sink.as_ref(), &events_tx_loop, &config).await;
            if done {
                break;
            }
        }
    });

    ConsoleHandle { cmd_tx, events_tx }
}

impl ConsoleHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.events_tx.subscribe()
    }

    pub async fn append_char(&self, c: char) -> Result<Status, RuntimeError> {
        self.request(|resp| Command::AppendChar { c, resp }).await
    }

    pub async fn evaluate(&self, token: impl Into<String>) -> Result<Status, RuntimeError> {
        let token = token.into();
        self.request(|resp| Command::Evaluate { token, resp }).await
    }

    pub async fn finalize(&self) -> Result<Status, RuntimeError> {
        self.request(|resp| Command::Finalize { resp }).await
    }

    pub async fn clear(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Clear { resp }).await
    }

    /// Returns the stack index now being edited.
    pub async fn load_prev(&self) -> Result<Option<usize>, RuntimeError> {
        self.request(|resp| Command::LoadPrev { resp }).await
    }

    pub async fn load_next(&self) -> Result<Option<usize>, RuntimeError> {
        self.request(|resp| Command::LoadNext { resp }).await
    }

    pub async fn delete_selected(&self) -> Result<Option<usize>, RuntimeError> {
        self.request(|resp| Command::DeleteSelected { resp }).await
    }

    /// Snapshot of the in-progress record.
    pub async fn current(&self) -> Result<QsoRecord, RuntimeError> {
        self.request(|resp| Command::Current { resp }).await
    }

    /// Finalized records not yet written.
    pub async fn pending(&self) -> Result<Vec<QsoRecord>, RuntimeError> {
        self.request(|resp| Command::Pending { resp }).await
    }

    /// Drains the finalized stack into the sink and returns how many were written.
    pub async fn write_pending(&self) -> Result<usize, RuntimeError> {
        self.request(|resp| Command::WritePending { resp }).await?
    }

    /// Writes pending records, flushes the sink and stops the actor.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await?
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

async fn handle_command(
    cmd: Command,
    console: &mut Console,
    sink: Option<&SharedSink>,
    events_tx: &broadcast::Sender<ConsoleEvent>,
    config: &RuntimeConfig,
) -> bool {
    match cmd {
        Command::AppendChar { c, resp } => {
            let before = console.qsos().len();
            let status = console.append_char(c);
            after_input(console, before, &status, sink, events_tx, config).await;
            let _ = resp.send(status);
        }
        Command::Evaluate { token, resp } => {
            let status = console.evaluate(&token);
            emit_status(events_tx, &status);
            let _ = resp.send(status);
        }
        Command::Finalize { resp } => {
            let before = console.qsos().len();
            let status = console.finalize();
            after_input(console, before, &status, sink, events_tx, config).await;
            let _ = resp.send(status);
        }
        Command::Clear { resp } => {
            console.clear();
            let _ = resp.send(());
        }
        Command::LoadPrev { resp } => {
            console.load_prev();
            let _ = resp.send(console.edit_pos());
        }
        Command::LoadNext { resp } => {
            console.load_next();
            let _ = resp.send(console.edit_pos());
        }
        Command::DeleteSelected { resp } => {
            let deleted = console.delete_selected();
            if let Some(index) = deleted {
                let _ = events_tx.send(ConsoleEvent::Deleted { index });
            }
            let _ = resp.send(deleted);
        }
        Command::Current { resp } => {
            let _ = resp.send(console.current_qso().clone());
        }
        Command::Pending { resp } => {
            let _ = resp.send(console.qsos().to_vec());
        }
        Command::WritePending { resp } => {
            let _ = resp.send(write_pending(console, sink, events_tx).await);
        }
        Command::Shutdown { resp } => {
            let out = match write_pending(console, sink, events_tx).await {
                Ok(count) => {
                    info!("console runtime stopped, {count} records written on shutdown");
                    Ok(())
                }
                Err(err) => Err(err),
            };
            let _ = resp.send(out);
            return true;
        }
    }

    false
}

async fn after_input(
    console: &mut Console,
    before: usize,
    status: &Status,
    sink: Option<&SharedSink>,
    events_tx: &broadcast::Sender<ConsoleEvent>,
    config: &RuntimeConfig,
) {
    emit_status(events_tx, status);

    let pending = console.qsos().len();
    if pending <= before {
        return;
    }
    let _ = events_tx.send(ConsoleEvent::Cached { pending });

    if config.write_on_finalize && sink.is_some() {
        // Failures are reported on the event stream; records stay cached.
        let _ = write_pending(console, sink, events_tx).await;
    }
}

fn emit_status(events_tx: &broadcast::Sender<ConsoleEvent>, status: &Status) {
    if !status.is_accepted() {
        let _ = events_tx.send(ConsoleEvent::Status {
            status: status.clone(),
        });
    }
}

async fn write_pending(
    console: &mut Console,
    sink: Option<&SharedSink>,
    events_tx: &broadcast::Sender<ConsoleEvent>,
) -> Result<usize, RuntimeError> {
    let Some(sink) = sink else {
        return Ok(0);
    };

    let mut count = 0;
    while let Some(qso) = console.qsos().first().cloned() {
        if let Err(err) = with_sink(sink, move |s| s.write_qso(&qso)).await {
            warn!("writing QSO failed: {err}");
            let _ = events_tx.send(ConsoleEvent::WriteFailed {
                message: err.to_string(),
            });
            if count > 0 {
                let _ = events_tx.send(ConsoleEvent::Written { count });
            }
            return Err(err.into());
        }
        console.pop();
        count += 1;
    }

    with_sink(sink, |s| s.flush()).await?;
    if count > 0 {
        info!("{count} QSOs written");
        let _ = events_tx.send(ConsoleEvent::Written { count });
    }
    Ok(count)
}

async fn with_sink<F>(sink: &SharedSink, f: F) -> Result<(), PersistError>
where
    F: FnOnce(&mut dyn QsoSink) -> Result<(), PersistError> + Send + 'static,
{
    let sink_ref = Arc::clone(sink);
    tokio::task::spawn_blocking(move || {
        let mut sink = sink_ref.blocking_lock();
        f(&mut **sink)
    })
    .await
    .map_err(|e| PersistError::Message(format!("join error: {e}")))?
}
