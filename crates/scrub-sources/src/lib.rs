//! Input resolution and OCR engines
//!
//! A request either carries text directly or points at an image. The
//! [`InputResolver`] turns both into working text, running one of the OCR
//! engines below for images.

pub mod disabled;
pub mod fetch;
pub mod paddle;
pub mod resolver;
pub mod tesseract;

pub use disabled::DisabledOcrEngine;
pub use fetch::ImageFetcher;
pub use paddle::PaddleServingEngine;
pub use resolver::InputResolver;
pub use tesseract::TesseractEngine;

/// User agent for outbound requests
pub const USER_AGENT: &str = concat!("scrub/", env!("CARGO_PKG_VERSION"));

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        Router,
        body::Bytes,
        http::{Method, StatusCode, header},
        routing::any,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    pub struct Received {
        pub method: Method,
        pub body: Bytes,
    }

    pub type Captured = Arc<Mutex<Option<Received>>>;

    /// Serve a canned response on `path` and record the last request.
    pub async fn mock_server(
        path: &str,
        status: StatusCode,
        content_type: &'static str,
        reply: Vec<u8>,
    ) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(None));
        let sink = captured.clone();

        let app = Router::new().route(
            path,
            any(move |method: Method, body: Bytes| {
                let sink = sink.clone();
                let reply = reply.clone();
                async move {
                    *sink.lock().unwrap() = Some(Received { method, body });
                    (status, [(header::CONTENT_TYPE, content_type)], reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    pub fn received(captured: &Captured) -> Received {
        captured.lock().unwrap().clone().expect("no request received")
    }
}
