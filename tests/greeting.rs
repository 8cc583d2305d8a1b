//! End-to-end tests against a real listening server: every request, whatever
//! its shape, gets the same fixed greeting.

use sinem_web::{Response, Server, ServerError, GREETING};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// Picks a free port, starts a greeting server on it in a background thread,
/// and waits until it accepts connections.
fn start_server() -> u16 {
    let port = free_port();
    let addr = format!("127.0.0.1:{}", port);

    let server = Server::new(|_req| async { Ok(Response::text(GREETING)) });
    thread::spawn(move || {
        server.listen(&addr).expect("server failed to start");
    });

    for _ in 0..100 {
        if TcpStream::connect(("127.0.0.1", port)).is_ok() {
            return port;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("server did not come up on port {}", port);
}

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("no free port");
    listener.local_addr().unwrap().port()
}

/// Sends a raw HTTP request and returns the raw response. The server closes
/// the connection after responding, so reading to EOF captures everything.
fn send(port: u16, raw_request: &str) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).expect("connect failed");
    stream.write_all(raw_request.as_bytes()).expect("write failed");

    let mut raw_response = String::new();
    stream.read_to_string(&mut raw_response).expect("read failed");
    raw_response
}

fn assert_greeting(response: &str) {
    assert!(
        response.starts_with("HTTP/1.1 200 OK\r\n"),
        "unexpected status line: {:?}",
        response.lines().next()
    );
    assert!(response.contains("Content-Type: text/plain\r\n"));
    assert!(response.contains(&format!("Content-Length: {}\r\n", GREETING.len())));
    assert!(response.ends_with(GREETING));
}

#[test]
fn get_root_returns_the_greeting() {
    let port = start_server();
    let response = send(port, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert_greeting(&response);
}

#[test]
fn any_path_and_query_returns_the_same_greeting() {
    let port = start_server();
    let root = send(port, "GET / HTTP/1.1\r\n\r\n");
    let deep = send(port, "GET /anything/at/all?x=1 HTTP/1.1\r\n\r\n");
    assert_greeting(&deep);
    assert_eq!(root, deep);
}

#[test]
fn post_with_body_returns_the_greeting_and_ignores_the_body() {
    let port = start_server();
    let response = send(
        port,
        "POST / HTTP/1.1\r\nContent-Length: 9\r\n\r\nnot shown",
    );
    assert_greeting(&response);
    assert!(!response.contains("not shown"));
}

#[test]
fn repeated_requests_are_byte_identical() {
    let port = start_server();
    let first = send(port, "GET / HTTP/1.1\r\n\r\n");
    for _ in 0..5 {
        assert_eq!(send(port, "GET / HTTP/1.1\r\n\r\n"), first);
    }
}

#[test]
fn binding_an_occupied_port_fails_and_leaves_the_first_server_serving() {
    let port = start_server();

    let second = Server::new(|_req| async { Ok(Response::text(GREETING)) });
    let result = second.listen(&format!("127.0.0.1:{}", port));
    assert!(matches!(result, Err(ServerError::Bind { .. })));

    // The original server is unaffected.
    assert_greeting(&send(port, "GET / HTTP/1.1\r\n\r\n"));
}
