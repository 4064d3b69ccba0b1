use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    client::relay::{Relay, RelayError},
    dto::relay::{LogRequest, LogsResponse, NextOutcomeResponse, RigRequest, RigResponse},
    wheel::Outcome,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// [`Relay`] implementation speaking JSON over HTTP to the relay binary.
#[derive(Clone)]
pub struct HttpRelay {
    client: Client,
    base_url: Arc<str>,
}

impl HttpRelay {
    /// Build a client for the relay listening at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, RelayError> {
        let base_url = Arc::<str>::from(base_url.trim_end_matches('/'));
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| RelayError::Unreachable {
                path: base_url.to_string(),
                message: source.to_string(),
            })?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(format!("{}{}", self.base_url, path))
    }
}

impl Relay for HttpRelay {
    fn next_outcome(&self) -> BoxFuture<'static, Result<Option<Outcome>, RelayError>> {
        let request = self.get("/next-outcome");
        Box::pin(async move {
            let body: NextOutcomeResponse = fetch_json(request, "/next-outcome").await?;
            Ok(body.outcome)
        })
    }

    fn rig(&self, outcome: Outcome) -> BoxFuture<'static, Result<String, RelayError>> {
        let request = self.post("/rig").json(&RigRequest::new(outcome));
        Box::pin(async move {
            let body: RigResponse = fetch_json(request, "/rig").await?;
            Ok(body.message)
        })
    }

    fn report(&self, outcome: Outcome) -> BoxFuture<'static, Result<(), RelayError>> {
        let request = self.post("/log").json(&LogRequest::new(outcome));
        Box::pin(async move {
            send(request, "/log").await?;
            Ok(())
        })
    }

    fn recent(&self) -> BoxFuture<'static, Result<Vec<String>, RelayError>> {
        let request = self.get("/logs");
        Box::pin(async move {
            let body: LogsResponse = fetch_json(request, "/logs").await?;
            Ok(body.logs)
        })
    }
}

async fn send(request: RequestBuilder, path: &str) -> Result<Response, RelayError> {
    let response = request
        .send()
        .await
        .map_err(|source| RelayError::Unreachable {
            path: path.to_string(),
            message: source.to_string(),
        })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(RelayError::Status {
        path: path.to_string(),
        status: status.as_u16(),
        message,
    })
}

async fn fetch_json<T>(request: RequestBuilder, path: &str) -> Result<T, RelayError>
where
    T: DeserializeOwned,
{
    send(request, path)
        .await?
        .json::<T>()
        .await
        .map_err(|source| RelayError::Decode {
            path: path.to_string(),
            message: source.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::net::TcpListener;

    use super::*;
    use crate::{routes, state::test_support::temp_state};

    async fn spawn_relay() -> (HttpRelay, std::path::PathBuf) {
        let (state, path) = temp_state().await;
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, routes::router(state)).await;
        });
        (HttpRelay::new(&format!("http://{addr}/")).unwrap(), path)
    }

    #[tokio::test]
    async fn talks_to_a_live_relay() {
        let (relay, path) = spawn_relay().await;
        let relay: Arc<dyn Relay> = Arc::new(relay);

        assert_eq!(relay.next_outcome().await.unwrap(), None);
        assert_eq!(
            relay.rig(Outcome::Light).await.unwrap(),
            "Next spin will be LIGHT"
        );
        assert_eq!(relay.next_outcome().await.unwrap(), Some(Outcome::Light));
        assert_eq!(relay.next_outcome().await.unwrap(), None);

        relay.report(Outcome::Dark).await.unwrap();
        relay.report(Outcome::Light).await.unwrap();
        assert_eq!(relay.recent().await.unwrap(), vec!["LIGHT", "DARK"]);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn unreachable_relay_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let relay = HttpRelay::new(&format!("http://{addr}")).unwrap();
        assert!(matches!(
            relay.next_outcome().await,
            Err(RelayError::Unreachable { .. })
        ));
    }
}
