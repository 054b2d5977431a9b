use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::Value;

use crate::clock::Clock;
use crate::transport::{HttpRequest, HttpResponse, Transport};

type Handler = Box<dyn Fn(&HttpRequest, usize) -> anyhow::Result<HttpResponse> + Send + Sync>;
type Delay = Box<dyn Fn(usize) -> Duration + Send + Sync>;

/// Scripted transport that records every request it receives.
///
/// The handler gets the request and the 1-based call number.
pub struct MockTransport {
    handler: Handler,
    delay: Delay,
    calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&HttpRequest, usize) -> anyhow::Result<HttpResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            delay: Box::new(|_| Duration::ZERO),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the same status and JSON body.
    pub fn fixed(status: u16, body: Value) -> Self {
        Self::new(move |_, _| Ok(json_response(status, body.clone())))
    }

    /// Holds every response back for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Box::new(move |_| delay);
        self
    }

    /// Holds back only the response to the given 1-based call.
    pub fn with_delay_on(mut self, call: usize, delay: Duration) -> Self {
        self.delay = Box::new(move |current| {
            if current == call {
                delay
            } else {
                Duration::ZERO
            }
        });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request.clone());
        let delay = (self.delay)(call);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        (self.handler)(&request, call)
    }
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    text_response(status, body.to_string())
}

pub fn text_response(status: u16, body: impl Into<String>) -> HttpResponse {
    HttpResponse {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.into(),
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self { start: Instant::now(), offset: Mutex::new(Duration::ZERO) }
    }
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}
