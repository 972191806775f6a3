mod common;

use common::{SHORT_TIMEOUT, TestPeer, closed_port, output_of, shell_with, test_config};
use std::time::{Duration, Instant};
use telshell::endpoint::USAGE;
use telshell::{Mode, ShellError};

#[test]
fn test_ping_roundtrip_with_echo_peer() {
    let peer = TestPeer::echo(1);
    let input = format!("{}ping\nexit\n", peer.telnet_line());

    let mut shell = shell_with(&input, test_config());
    assert!(shell.run().is_ok());
    assert_eq!(shell.mode(), Mode::Disconnected);
    assert_eq!(output_of(shell), "#ping\n#");

    peer.join();
}

#[test]
fn test_several_exchanges_and_blank_lines() {
    let peer = TestPeer::echo(1);
    let input = format!("{}first line\n\n   second  \n\texit\n", peer.telnet_line());

    let mut shell = shell_with(&input, test_config());
    assert!(shell.run().is_ok());

    // Blank line is skipped, but the prompt is shown again before the next read
    assert_eq!(output_of(shell), "#first line\n##second  \n#");
    peer.join();
}

#[test]
fn test_telnet_switches_to_connected_mode() {
    let peer = TestPeer::echo(1);
    let mut shell = shell_with(&peer.telnet_line(), test_config());

    assert_eq!(shell.mode(), Mode::Disconnected);
    assert!(shell.step().unwrap());
    assert_eq!(shell.mode(), Mode::Connected);
    assert_eq!(shell.session().endpoint().unwrap().to_string(), peer.addr.to_string());
    assert_eq!(shell.dispatcher().wrong_commands(), 0);

    // End of input closes the connection on the way out
    assert!(shell.run().is_ok());
    assert!(!shell.session().is_connected());
    assert_eq!(output_of(shell), "#");
    peer.join();
}

#[test]
fn test_silent_peer_times_out_and_stays_connected() {
    let peer = TestPeer::silent(Duration::from_secs(1));
    let input = format!("{}hello\n", peer.telnet_line());
    let mut shell = shell_with(&input, test_config());

    assert!(shell.step().unwrap());

    let started = Instant::now();
    assert!(shell.step().unwrap());
    let elapsed = started.elapsed();

    assert!(elapsed >= SHORT_TIMEOUT - Duration::from_millis(50), "{:?}", elapsed);
    assert!(elapsed < SHORT_TIMEOUT + Duration::from_millis(500), "{:?}", elapsed);
    assert_eq!(shell.mode(), Mode::Connected);

    // Prompt before `hello`, then again before the read that hits end of input
    assert!(!shell.step().unwrap());
    assert_eq!(output_of(shell), "##");
    peer.join();
}

#[test]
fn test_exit_drops_leftover_reply_bytes() {
    let stale = TestPeer::partial(b"stale bytes");
    let echo = TestPeer::echo(1);
    let input = format!(
        "{}hello\nexit\n{}ping\nexit\n",
        stale.telnet_line(),
        echo.telnet_line()
    );

    let mut shell = shell_with(&input, test_config());
    assert!(shell.run().is_ok());

    let output = output_of(shell);
    assert!(!output.contains("stale"));
    assert_eq!(output, "###ping\n#");

    stale.join();
    echo.join();
}

#[test]
fn test_peer_hang_up_returns_to_disconnected_mode() {
    let peer = TestPeer::hang_up();
    let input = format!("{}ping\nexit\n", peer.telnet_line());

    let mut shell = shell_with(&input, test_config());
    assert!(shell.run().is_ok());

    // After the transport error, `exit` is no longer payload
    assert_eq!(shell.dispatcher().wrong_commands(), 1);

    let output = output_of(shell);
    assert!(output.starts_with('#'), "{:?}", output);
    assert!(output.ends_with("\nWrong command!\n"), "{:?}", output);
    let error_line = output[1..].lines().next().unwrap();
    assert!(!error_line.is_empty());
    assert_ne!(error_line, "Wrong command!");
    peer.join();
}

#[test]
fn test_connect_failure_prints_error_and_usage() {
    let input = format!("telnet {}\n", closed_port());

    let mut shell = shell_with(&input, test_config());
    assert!(shell.run().is_ok());
    assert_eq!(shell.mode(), Mode::Disconnected);
    assert_eq!(shell.dispatcher().wrong_commands(), 0);

    let output = output_of(shell);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2, "{:?}", output);
    assert!(!lines[0].is_empty());
    assert_eq!(lines[1], USAGE);
}

#[test]
fn test_malformed_endpoints_do_not_count() {
    let input = "telnet\ntelnet 1.2.3.4\ntelnet 1.2.3.4:\ntelnet 1.2.3.4:abc\ntelnet 999.1.1.1:80\n";

    let mut shell = shell_with(input, test_config());
    assert!(shell.run().is_ok());
    assert_eq!(shell.mode(), Mode::Disconnected);
    assert_eq!(shell.dispatcher().wrong_commands(), 0);

    let output = output_of(shell);
    assert_eq!(output.matches(USAGE).count(), 5);
    assert!(!output.contains("Wrong command!"));
}

#[test]
fn test_exit_while_disconnected_is_a_wrong_command() {
    let mut shell = shell_with("exit\n", test_config());

    assert!(shell.run().is_ok());
    assert_eq!(shell.dispatcher().wrong_commands(), 1);
    assert_eq!(output_of(shell), "Wrong command!\n");
}

#[test]
fn test_three_wrong_commands_terminate() {
    let mut shell = shell_with("help\nls\nquit\nhelp\n", test_config());

    let err = shell.run().unwrap_err();
    assert!(matches!(err, ShellError::TooManyWrongCommands { count: 3 }));
    assert_eq!(err.to_string(), "Exiting...");
    assert_eq!(output_of(shell), "Wrong command!\n".repeat(3));
}

#[test]
fn test_wrong_command_count_survives_connections() {
    let peer = TestPeer::echo(1);
    let input = format!("foo\n{}exit\nbar\nbaz\n", peer.telnet_line());

    let mut shell = shell_with(&input, test_config());
    let result = shell.run();

    assert!(matches!(result, Err(ShellError::TooManyWrongCommands { count: 3 })));
    assert_eq!(
        output_of(shell),
        "Wrong command!\n#Wrong command!\nWrong command!\n"
    );
    peer.join();
}
