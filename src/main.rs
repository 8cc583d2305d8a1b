//! Binary entry point: greet every visitor on port 3333.

use sinem_web::{Response, Server, GREETING, LISTEN_ADDR};

fn main() {
    let server = Server::new(|_req| async { Ok(Response::text(GREETING)) });

    if let Err(e) = server.listen(LISTEN_ADDR) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
