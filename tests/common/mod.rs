#![allow(dead_code)]

use sentinel_stream::SentinelStream;
use std::io::{Cursor, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use telshell::{Shell, ShellConfig};

pub type TestShell = Shell<Cursor<Vec<u8>>, Vec<u8>>;

/// Reply timeout used by tests that do not exercise the default
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(300);

pub fn test_config() -> ShellConfig {
    ShellConfig::default().with_reply_timeout(SHORT_TIMEOUT)
}

pub fn shell_with(input: &str, config: ShellConfig) -> TestShell {
    Shell::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), config).unwrap()
}

pub fn output_of(shell: TestShell) -> String {
    String::from_utf8(shell.into_output()).unwrap()
}

/// Read one NUL-terminated message straight off a socket
pub fn read_raw_message(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut message = Vec::new();
    let mut byte = [0; 1];
    loop {
        match socket.read(&mut byte) {
            Ok(1) if byte[0] == 0 => return Some(message),
            Ok(1) => message.push(byte[0]),
            _ => return None,
        }
    }
}

/// A loopback peer handling its first `connections` connections in turn
pub struct TestPeer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestPeer {
    pub fn spawn<F>(connections: usize, handler: F) -> Self
    where
        F: Fn(TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            for stream in listener.incoming().take(connections) {
                handler(stream.unwrap());
            }
        });

        Self { addr, handle }
    }

    /// Echo every message back, sentinel included, until the shell disconnects
    pub fn echo(connections: usize) -> Self {
        Self::spawn(connections, |socket| {
            let mut stream = SentinelStream::new(socket).unwrap();
            while let Ok(Some(message)) = stream.read_message(Duration::from_secs(30)) {
                if stream.write_message(&message).is_err() {
                    break;
                }
            }
        })
    }

    /// Read the first message, never answer, hang up after `linger`
    pub fn silent(linger: Duration) -> Self {
        Self::spawn(1, move |mut socket| {
            read_raw_message(&mut socket);
            thread::sleep(linger);
        })
    }

    /// Answer the first message with `fragment` and no sentinel, then wait
    /// for the shell to hang up
    pub fn partial(fragment: &'static [u8]) -> Self {
        Self::spawn(1, move |mut socket| {
            if read_raw_message(&mut socket).is_some() {
                socket.write_all(fragment).unwrap();
            }
            while read_raw_message(&mut socket).is_some() {}
        })
    }

    /// Accept and immediately hang up
    pub fn hang_up() -> Self {
        Self::spawn(1, drop)
    }

    pub fn telnet_line(&self) -> String {
        format!("telnet {}\n", self.addr)
    }

    pub fn join(self) {
        self.handle.join().unwrap();
    }
}

/// Loopback address with nothing listening on it
pub fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
