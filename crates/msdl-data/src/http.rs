//! Plain-HTTP catalog fetch.
//!
//! The original site serves `summary.json` from the same origin as the
//! pages; the terminal equivalent is a LAN mirror. One GET, no redirects,
//! no TLS.

use crate::source::DataError;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Request, Uri};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

/// Fetch the catalog document from `url`.
pub async fn fetch(url: &str) -> Result<Vec<u8>, DataError> {
    let uri: Uri = url
        .parse()
        .map_err(|err| DataError::Fetch(format!("invalid url {url}: {err}")))?;

    let client = Client::builder(TokioExecutor::new()).build_http::<Empty<Bytes>>();
    let request = Request::builder()
        .uri(uri)
        .header(hyper::header::USER_AGENT, "msdl")
        .body(Empty::new())
        .map_err(|err| DataError::Fetch(err.to_string()))?;

    let response = client
        .request(request)
        .await
        .map_err(|err| DataError::Fetch(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DataError::Fetch(format!("{url} returned {status}")));
    }

    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|err| DataError::Fetch(err.to_string()))?
        .to_bytes();
    Ok(body.to_vec())
}
