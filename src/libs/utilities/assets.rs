// HTTP access for getgo: the listing page and the release archive are both
// plain blocking GETs whose bodies are consumed as streams.

// Transport failures are reported as `Connection` / `HttpStatus`.
use crate::libs::errors::{GetGoError, Result};
// Request/response tracing with `--debug`.
use crate::log_debug;
// Colors for URLs and status codes in the debug output.
use colored::Colorize;
// Response bodies are handed out as plain readers.
use std::io::Read;
// URLs are already parsed and resolved by the time they reach here.
use url::Url;

/// Something that can GET a URL and hand back the response body as a stream.
///
/// The pipeline only talks to the network through this trait so tests can serve
/// canned pages and archives.
pub trait Transport {
    /// Issues a GET for `url`.
    ///
    /// # Returns
    /// * `Ok(reader)` over the response body when the status is exactly 200.
    /// * `Err(GetGoError::HttpStatus)` for any other status.
    /// * `Err(GetGoError::Connection)` if the request could not be made at all.
    fn get(&self, url: &Url) -> Result<Box<dyn Read>>;
}

/// `Transport` backed by a blocking `ureq` agent.
///
/// No timeouts are configured and redirects are followed with ureq's defaults.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("getgo/", env!("CARGO_PKG_VERSION")))
            .build();
        UreqTransport { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &Url) -> Result<Box<dyn Read>> {
        log_debug!("[HTTP] GET {}", url.as_str().blue());

        // Blocking GET; redirects are followed by the agent.
        let response = match self.agent.get(url.as_str()).call() {
            Ok(response) => response,
            // ureq reports 4xx/5xx as errors; keep the status for the message.
            Err(ureq::Error::Status(code, response)) => {
                return Err(GetGoError::HttpStatus {
                    url: url.to_string(),
                    code,
                    status: response.status_text().to_string(),
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(GetGoError::Connection {
                    url: url.to_string(),
                    message: transport.to_string(),
                });
            }
        };

        // Any other 2xx/3xx that survived redirect handling is still not what we asked for.
        if response.status() != 200 {
            return Err(GetGoError::HttpStatus {
                url: url.to_string(),
                code: response.status(),
                status: response.status_text().to_string(),
            });
        }

        log_debug!(
            "[HTTP] {} {} ({})",
            response.status().to_string().green(),
            url.as_str(),
            response.header("content-type").unwrap_or("unknown type").dimmed()
        );
        Ok(Box::new(response.into_reader())) // Streamed, closed when dropped.
    }
}

/// Reads a whole response body into a string. Used for the listing page only;
/// archives are never buffered this way.
pub fn read_page(url: &Url, mut body: impl Read) -> Result<String> {
    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes)
        .map_err(|e| GetGoError::Connection {
            url: url.to_string(),
            message: format!("reading response body: {e}"),
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::{BufRead, BufReader, Cursor, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves fixed bodies by URL and records every request in order.
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        pub bodies: HashMap<String, Vec<u8>>,
        pub requests: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        pub fn serve(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.bodies.insert(url.to_string(), body.into());
            self
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &Url) -> Result<Box<dyn Read>> {
            self.requests.borrow_mut().push(url.to_string());
            match self.bodies.get(url.as_str()) {
                Some(body) => Ok(Box::new(Cursor::new(body.clone()))),
                None => Err(GetGoError::HttpStatus {
                    url: url.to_string(),
                    code: 404,
                    status: "Not Found".to_string(),
                }),
            }
        }
    }

    // Local one-shot HTTP server: answers a single request with `status` and
    // `body`, then closes. Returns the URL to hit and the server thread.
    fn serve_once(status: &'static str, body: &'static str) -> (Url, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!("http://{}/dl/", listener.local_addr().unwrap())).unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            // Drain the request head; GETs carry no body.
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
        });

        (url, server)
    }

    #[test]
    fn ureq_transport_streams_a_200_body() {
        let (url, server) = serve_once("200 OK", "<a class=\"download\"></a>");

        let body = UreqTransport::new().get(&url).ok().unwrap();
        let page = read_page(&url, body).unwrap();
        server.join().unwrap();

        assert_eq!(page, "<a class=\"download\"></a>");
    }

    #[test]
    fn ureq_transport_rejects_every_other_status() {
        for (status, code) in [("204 No Content", 204), ("404 Not Found", 404), ("500 Internal Server Error", 500)] {
            let (url, server) = serve_once(status, "");

            let err = UreqTransport::new().get(&url).err().unwrap();
            server.join().unwrap();

            match err {
                GetGoError::HttpStatus { code: got, .. } => assert_eq!(got, code, "{status}"),
                other => panic!("{status}: expected HttpStatus, got {other:?}"),
            }
        }
    }

    #[test]
    fn ureq_transport_reports_refused_connections() {
        // Grab a free port, then close it so nothing is listening there.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/dl/")).unwrap();

        let err = UreqTransport::new().get(&url).err().unwrap();

        assert!(matches!(err, GetGoError::Connection { .. }), "{err:?}");
        assert_eq!(err.kind(), crate::libs::errors::ErrorKind::Transport);
    }

    #[test]
    fn read_page_is_lossy_on_bad_utf8() {
        let url = Url::parse("https://go.dev/dl/").unwrap();
        let page = read_page(&url, Cursor::new(b"<a>\xff</a>".to_vec())).unwrap();
        assert_eq!(page, "<a>\u{fffd}</a>");
    }

    #[test]
    fn fake_transport_reports_missing_pages_as_404() {
        let fake = FakeTransport::default().serve("https://go.dev/dl/", "ok");
        let missing = Url::parse("https://go.dev/dl/nope").unwrap();

        let err = fake.get(&missing).err().unwrap();
        assert!(matches!(err, GetGoError::HttpStatus { code: 404, .. }));
        assert_eq!(fake.requests.borrow().as_slice(), ["https://go.dev/dl/nope"]);
    }
}
