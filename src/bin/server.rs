//! Session store server.
//!
//! This binary runs a TCP server that accepts session commands from
//! clients and serves them from a shared `SessionStore`.

use bytes::BytesMut;
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    signal,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use session_store::{buffer_to_array, Command, SessionData, SessionStore, StoreConfig, StoreError};

/// Server configuration with defaults.
struct ServerConfig {
    host: String,
    port: u16,
    ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ttl: Duration::from_secs(300),
        }
    }
}

/// Entry point for the session server.
#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::default();

    // Build the shared store; its reclaimer starts here.
    let store_config = StoreConfig::new().ttl(config.ttl).build();
    let store = Arc::new(SessionStore::new(store_config));

    // Bind the listener
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(%addr, ttl = ?config.ttl, "session server listening");

    // Spawn a task to report final stats on shutdown
    let shutdown_store = Arc::clone(&store);
    tokio::spawn(async move {
        if let Ok(()) = signal::ctrl_c().await {
            let stats = shutdown_store.stats();
            info!(
                creates = stats.creates,
                reclamations = stats.reclamations,
                size = stats.size,
                "shutting down"
            );
            std::process::exit(0);
        }
    });

    // Accept connections in a loop
    loop {
        match listener.accept().await {
            Ok((socket, addr)) => {
                info!(%addr, "connection accepted");

                // Clone the store handle for this connection
                let store = Arc::clone(&store);

                tokio::spawn(async move {
                    if let Err(e) = handle_connection(socket, store).await {
                        error!(error = %e, "connection error");
                    }
                });
            }
            Err(e) => {
                error!(error = %e, "failed to accept connection");
            }
        }
    }
}

/// Handle a single client connection.
async fn handle_connection(
    mut socket: TcpStream,
    store: Arc<SessionStore>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut buf = BytesMut::with_capacity(1024);

    // Read the request
    let n = socket.read_buf(&mut buf).await?;
    if n == 0 {
        return Ok(()); // Connection closed
    }

    // Parse the command
    let attrs = buffer_to_array(&mut buf);

    if attrs.is_empty() {
        socket.write_all(b"ERR empty command").await?;
        return Ok(());
    }

    let command = Command::get(&attrs[0]);

    // Process the command
    let response = process_command(command, &attrs, &store);

    // Send the response
    socket.write_all(response.as_bytes()).await?;

    Ok(())
}

/// Process a session command and return the response.
fn process_command(command: Command, attrs: &[String], store: &SessionStore) -> String {
    match command {
        Command::Create => match store.create() {
            Ok(key) => key,
            Err(e) => format!("ERR {}", e),
        },

        Command::Get => {
            if attrs.len() < 2 {
                return "ERR missing key argument".to_string();
            }

            let key = &attrs[1];
            match store.read(key) {
                Ok(data) => serde_json::Value::Object(data.into_iter().collect()).to_string(),
                Err(StoreError::NotFound(_)) => String::new(), // Empty response for not found
                Err(e) => format!("ERR {}", e),
            }
        }

        Command::Update => {
            if attrs.len() < 4 {
                return "ERR missing key, field or value argument".to_string();
            }

            let key = &attrs[1];
            let mut data = SessionData::new();
            data.insert(attrs[2].clone(), serde_json::Value::from(attrs[3].as_str()));

            match store.update(key, data) {
                Ok(()) => "Ok".to_string(),
                Err(StoreError::NotFound(_)) => String::new(),
                Err(e) => format!("ERR {}", e),
            }
        }

        Command::Delete => {
            if attrs.len() < 2 {
                return "ERR missing key argument".to_string();
            }

            let key = &attrs[1];
            if store.delete(key) {
                "Ok".to_string()
            } else {
                String::new() // Not found
            }
        }

        Command::Ping => "PONG".to_string(),

        Command::Stats => {
            let stats = store.stats();
            format!(
                "creates:{} hits:{} misses:{} updates:{} deletes:{} reclamations:{} size:{}",
                stats.creates,
                stats.hits,
                stats.misses,
                stats.updates,
                stats.deletes,
                stats.reclamations,
                stats.size
            )
        }

        Command::Invalid => {
            format!(
                "ERR unknown command '{}'",
                attrs.first().map(String::as_str).unwrap_or("")
            )
        }
    }
}
