// src/core/net.rs
// HTTP/1.0 GET over TCP (std-only)

use std::{io::{Read, Write}, net::TcpStream, time::Duration};

use crate::error::GatewayError;

pub fn http_get(host: &str, port: u16, path: &str, io_timeout: Duration) -> Result<String, GatewayError> {
    let url = format!("http://{host}:{port}{path}");

    let mut s = TcpStream::connect((host, port))?;
    s.set_read_timeout(Some(io_timeout))?;
    s.set_write_timeout(Some(io_timeout))?;

    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: mb_scrape/{}\r\nAccept: text/html\r\nConnection: close\r\n\r\n",
        path, host, env!("CARGO_PKG_VERSION")
    );
    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    parse_response(&buf, &url)
}

/// Split a raw HTTP/1.x response; anything but 200 is an error.
fn parse_response(raw: &[u8], url: &str) -> Result<String, GatewayError> {
    let resp = String::from_utf8_lossy(raw);

    let status = resp.split("\r\n").next().unwrap_or("");
    if status.split_whitespace().nth(1) != Some("200") {
        return Err(GatewayError::Http { status: s!(status), url: s!(url) });
    }
    let body_idx = resp
        .find("\r\n\r\n")
        .ok_or_else(|| GatewayError::MalformedResponse(s!(url)))?
        + 4;
    Ok(resp[body_idx..].to_string())
}
