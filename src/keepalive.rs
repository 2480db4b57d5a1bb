//! Keep-Alive Prober
//!
//! Free hosting tiers idle a service that sees no traffic for a while. The
//! prober requests the service's own public URL on a fixed interval. It is
//! an independent task: it shares nothing with request handling and stops
//! when the shutdown channel flips.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode, Url};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, warn};

const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct KeepAliveProber {
    client: Client,
    url: Url,
    interval: Duration,
}

impl KeepAliveProber {
    pub fn new(url: Url, interval: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self {
            client,
            url,
            interval,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// One probe. Any HTTP status counts as the service being reachable.
    pub async fn probe(&self) -> Result<StatusCode, reqwest::Error> {
        let response = self.client.get(self.url.clone()).send().await?;
        Ok(response.status())
    }

    /// Probe every interval until `shutdown` becomes `true` or its sender is
    /// dropped. The first probe fires one full interval after start.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(url = %self.url, interval = ?self.interval, "Keep-alive prober started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.probe().await {
                            Ok(status) => info!(
                                status = status.as_u16(),
                                at = %Utc::now().to_rfc3339(),
                                "Keep-alive ping"
                            ),
                            Err(e) => warn!(error = %e, "Keep-alive ping failed"),
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Keep-alive prober stopped");
        })
    }
}
