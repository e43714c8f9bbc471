use std::fs;
use std::future::Future;
use std::os::unix::net::UnixStream as StdUnixStream;
use std::path::Path;

use color_eyre::eyre::Result;
use swatch_protocol::{handle_message, ChannelHub, ThemeMessage, ThemePublisher, ThemeReceiver};
use swatch_theme::{KeyValueStore, StyleHost, ThemeRegistry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, error, info, warn};

use crate::config::{runtime_dir, socket_path, UserConfig};
use crate::session::open_registry;

#[derive(Debug, thiserror::Error)]
pub enum ListenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("A listener is already running at {0}")]
    AlreadyRunning(String),
}

type ClientId = u64;

async fn client_reader_task(stream: UnixStream, publisher: ThemePublisher, client_id: ClientId) {
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match ThemeMessage::decode(&line) {
                    Ok(message) => {
                        publisher.publish(&message);
                    }
                    Err(e) => {
                        warn!(client_id, error = %e, "Rejected message from client");
                    }
                }
            }
            Ok(None) => {
                debug!(client_id, "Client disconnected");
                break;
            }
            Err(e) => {
                debug!(client_id, error = %e, "Client read error");
                break;
            }
        }
    }
}

/// Accept clients until `shutdown` resolves, applying every message they
/// send to `registry`. Must run inside a `LocalSet`.
pub async fn serve<S, D>(
    listener: UnixListener,
    mut registry: ThemeRegistry<S, D>,
    shutdown: impl Future<Output = ()>,
) -> ThemeRegistry<S, D>
where
    S: KeyValueStore,
    D: StyleHost,
{
    let hub = ChannelHub::new();
    let mut receiver = ThemeReceiver::new(&hub, None);
    let publisher = ThemePublisher::new(&hub, None);
    let mut next_client_id: ClientId = 1;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            Some(message) = receiver.recv() => {
                debug!(kind = message.kind(), "Handling theme message");
                handle_message(&mut registry, message);
            }
            result = listener.accept() => {
                match result {
                    Ok((stream, _)) => {
                        let client_id = next_client_id;
                        next_client_id += 1;
                        debug!(client_id, "Client connected");
                        tokio::task::spawn_local(client_reader_task(
                            stream,
                            publisher.clone(),
                            client_id,
                        ));
                    }
                    Err(e) => {
                        error!(error = %e, "Socket accept error");
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Listener shutting down");
                break;
            }
        }
    }

    registry
}

pub fn run(config: &UserConfig) -> Result<()> {
    let socket = socket_path();

    if socket.exists() {
        if StdUnixStream::connect(&socket).is_ok() {
            return Err(ListenError::AlreadyRunning(socket.display().to_string()).into());
        }
        fs::remove_file(&socket)?;
    }
    fs::create_dir_all(runtime_dir())?;

    let registry = open_registry(config)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        socket = %socket.display(),
        stylesheets = %registry.document().dir().display(),
        "Listener starting"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();

    local.block_on(&runtime, async {
        let listener = UnixListener::bind(&socket)?;
        println!("Listening on {}", socket.display());
        serve(listener, registry, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;
        Ok::<_, ListenError>(())
    })?;

    remove_socket(&socket);
    Ok(())
}

fn remove_socket(socket: &Path) {
    if let Err(e) = fs::remove_file(socket) {
        debug!(error = %e, "Socket already removed");
    }
}
