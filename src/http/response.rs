use crate::error::ServerError;
use std::collections::HashMap;

#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl Response {
    pub fn new(status: u16) -> Response {
        Response {
            status,
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    // Chainable status setter
    pub fn status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    // Generic body setter
    pub fn body<T: AsRef<str>>(&mut self, body: T) -> &mut Self {
        self.body = body.as_ref().to_string();
        self
    }

    // Generic header setter
    pub fn header<K: AsRef<str>, V: AsRef<str>>(&mut self, name: K, value: V) -> &mut Self {
        self.headers
            .insert(name.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// A `200 OK` with a `text/plain` body.
    pub fn text<T: AsRef<str>>(content: T) -> Response {
        let mut response = Response::new(200);
        response.header("Content-Type", "text/plain").body(content);
        response
    }

    /// A plain-text `500` carrying the error's message. Only reachable if a
    /// handler fails; the constant greeting handler never does.
    pub fn error(err: ServerError) -> Response {
        let mut response = Response::new(500);
        response
            .header("Content-Type", "text/plain")
            .body(format!("{}\n", err));
        response
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self.status {
            200 => "OK",
            500 => "Internal Server Error",
            _ => "",
        }
    }

    /// Serializes the response: status line, headers, Content-Length, blank
    /// line, body.
    pub fn to_wire(&self) -> String {
        let mut wire = format!("HTTP/1.1 {} {}\r\n", self.status, self.reason_phrase());
        self.headers.iter().for_each(|(name, value)| {
            wire += &format!("{}: {}\r\n", name, value);
        });
        wire += &format!("Content-Length: {}\r\n\r\n{}", self.body.len(), self.body);
        wire
    }
}
