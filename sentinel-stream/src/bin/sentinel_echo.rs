//! # Sentinel Echo Peer
//!
//! A cooperative remote side for manual testing: every sentinel-terminated
//! message received is sent straight back with its sentinel.
//! Run with: `cargo run -p sentinel-stream --bin sentinel-echo [bind_addr]`

use sentinel_stream::SentinelStream;
use std::io;
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND: &str = "127.0.0.1:2323";

/// How long a connection may stay silent before the peer gives up on it
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let bind_addr = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_BIND.to_string());
    let listener = TcpListener::bind(&bind_addr)?;

    println!(
        "🚀 sentinel echo peer v{} listening on {}",
        sentinel_stream::VERSION,
        bind_addr
    );
    println!("📞 Connect with: telshell, then type: telnet {}", bind_addr);

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                thread::spawn(move || {
                    if let Err(e) = handle_peer(stream) {
                        error!(error = %e, "connection ended with error");
                    }
                });
            }
            Err(e) => error!(error = %e, "error accepting connection"),
        }
    }

    Ok(())
}

fn handle_peer(stream: TcpStream) -> io::Result<()> {
    let mut stream = SentinelStream::new(stream)?;
    let peer = stream.peer_addr();
    info!(%peer, "new connection");

    loop {
        match stream.read_message(IDLE_TIMEOUT) {
            Ok(Some(message)) => stream.write_message(&message)?,
            Ok(None) => {
                info!(%peer, "idle timeout, closing");
                break;
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                info!(%peer, "disconnected");
                break;
            }
            Err(e) => {
                stream.close();
                return Err(e);
            }
        }
    }

    stream.close();
    Ok(())
}
