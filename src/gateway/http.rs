// src/gateway/http.rs
//! Rendered pages over plain HTTP. The live site renders client-side, so this
//! is meant to sit behind a rendering proxy that returns the finished DOM; the
//! page is re-requested until its entries show up or the wait times out.

use std::time::Duration;

use crate::config::consts::HTTP_IO_TIMEOUT_SECS;
use crate::config::options::HttpEndpoint;
use crate::core::net;
use crate::error::GatewayError;
use super::{page, Gateway, LevelCategories, Session, WaitPolicy};

pub struct HttpGateway {
    endpoint: HttpEndpoint,
    wait: WaitPolicy,
}

impl HttpGateway {
    pub fn new(endpoint: HttpEndpoint, wait: WaitPolicy) -> Self {
        Self { endpoint, wait }
    }
}

impl Gateway for HttpGateway {
    type Session = HttpSession;

    fn open_session(&mut self) -> Result<HttpSession, GatewayError> {
        logf!("HTTP: session opened on {}:{}", self.endpoint.host, self.endpoint.port);
        Ok(HttpSession {
            endpoint: self.endpoint.clone(),
            wait: self.wait,
            io_timeout: Duration::from_secs(HTTP_IO_TIMEOUT_SECS),
            requests: 0,
        })
    }
}

pub struct HttpSession {
    endpoint: HttpEndpoint,
    wait: WaitPolicy,
    io_timeout: Duration,
    requests: usize,
}

impl Session for HttpSession {
    fn fetch_level(&mut self, level: u32) -> Result<LevelCategories, GatewayError> {
        let path = self.endpoint.path_for(level);
        let (host, port) = (self.endpoint.host.as_str(), self.endpoint.port);
        let io_timeout = self.io_timeout;
        let requests = &mut self.requests;

        let doc = self.wait.until(level, || {
            *requests += 1;
            let doc = net::http_get(host, port, &path, io_timeout)?;
            Ok(page::is_ready(&doc).then_some(doc))
        })?;
        logd!("HTTP: level {level} fetched from {path}");
        Ok(page::extract_level(&doc))
    }

    fn close(&mut self) {
        logf!("HTTP: session closed after {} request(s)", self.requests);
    }
}
