use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Prometheus exposition on its own listener
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitoringConfig {
    /// Serve `GET /metrics` on `prometheus_port`
    #[serde(default)]
    pub prometheus_enabled: bool,

    #[serde(default = "default_prometheus_port")]
    pub prometheus_port: u16,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            prometheus_enabled: false,
            prometheus_port: default_prometheus_port(),
        }
    }
}

impl MonitoringConfig {
    /// Port of the metrics listener, `None` while monitoring is off
    pub fn metrics_port(&self) -> Option<u16> {
        self.prometheus_enabled.then_some(self.prometheus_port)
    }

    /// The metrics listener must not share `http_port`, the board's own
    /// listener. Nothing is checked while monitoring is off.
    pub fn validate(
        &self,
        http_port: u16,
    ) -> Result<()> {
        match self.metrics_port() {
            None => Ok(()),
            Some(0) => Err(Error::InvalidConfig(
                "prometheus_port must be a fixed port when monitoring is enabled".into(),
            )),
            Some(port) if port == http_port => Err(Error::InvalidConfig(format!(
                "prometheus_port {port} collides with the HTTP listener"
            ))),
            Some(port) if port < 1024 => Err(Error::InvalidConfig(format!(
                "prometheus_port {port} is a privileged port (requires root)"
            ))),
            Some(_) => Ok(()),
        }
    }
}

fn default_prometheus_port() -> u16 {
    9090
}
