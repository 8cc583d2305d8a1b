//! # Sinem Web
//!
//! A minimal web server that answers every request with the same plaintext
//! greeting. There is no routing: whatever the method, path, or body, the
//! response is always `200 OK` with `Welcome to Sinem's Amazing Web App!`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sinem_web::{Response, Server, GREETING, LISTEN_ADDR};
//!
//! let server = Server::new(|_req| async { Ok(Response::text(GREETING)) });
//!
//! server.listen(LISTEN_ADDR)
//!     .expect("Server failed to start");
//! ```

pub mod error;
pub mod handler;
pub mod http;
pub mod server;

pub use error::{ServerError, ServerResult};
pub use http::{Request, Response};
pub use server::Server;

/// The body sent in reply to every request, trailing newline included.
pub const GREETING: &str = "Welcome to Sinem's Amazing Web App!\n";

/// Where the server listens: all interfaces, port 3333.
pub const LISTEN_ADDR: &str = "0.0.0.0:3333";
