// src/config.rs
use serde::Deserialize;
use std::{fs, net::Ipv4Addr, path::Path};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub general: General,
    pub channel: ChannelCfg,
    pub metrics: Option<Metrics>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    /// Cadence of the periodic stats log line
    pub stats_interval_ms: u64,
    #[serde(default = "default_recv_timeout_ms")]
    /// Poll granularity of the recv loop; bounds shutdown latency
    pub recv_timeout_ms: u64,
    #[serde(default)]
    pub json_logs: bool, // structured JSON logs to stdout
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelCfg {
    pub group: Ipv4Addr,      // e.g., 233.54.12.111
    pub port: u16,            // e.g., 26477
    pub iface_addr: Ipv4Addr, // local interface IPv4 of the NIC to join on
    #[serde(default)]
    pub reuse_port: bool,
    pub recv_buffer_bytes: u32, // e.g., 64<<20
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metrics {
    /// Bind address for Prometheus exporter (e.g. "0.0.0.0:9100")
    pub bind: String,
}

fn default_recv_timeout_ms() -> u64 {
    100
}

impl AppConfig {
    pub fn from_file(p: &Path) -> anyhow::Result<Self> {
        let s = fs::read_to_string(p)?;
        let cfg: AppConfig = toml::from_str(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.channel.group.is_multicast() {
            anyhow::bail!("channel.group must be a multicast IPv4 address");
        }
        if self.channel.port == 0 {
            anyhow::bail!("channel.port must be non-zero");
        }
        if self.general.stats_interval_ms == 0 {
            anyhow::bail!("general.stats_interval_ms must be > 0");
        }
        if self.general.recv_timeout_ms == 0 {
            anyhow::bail!("general.recv_timeout_ms must be > 0");
        }
        // Touch optional logging flag to keep it validated in minimal builds
        let _ = self.general.json_logs;
        if let Some(ref m) = self.metrics {
            if m.bind.trim().is_empty() || !m.bind.contains(':') {
                anyhow::bail!("metrics.bind must be host:port when metrics is configured");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_toml() -> &'static str {
        r#"
            [general]
            stats_interval_ms = 1000

            [channel]
            group = "233.54.12.111"
            port = 26477
            iface_addr = "0.0.0.0"
            recv_buffer_bytes = 8388608

            [metrics]
            bind = "0.0.0.0:9100"
        "#
    }

    #[test]
    fn parses_and_validates() {
        let cfg: AppConfig = toml::from_str(base_toml()).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.channel.port, 26477);
        assert_eq!(cfg.general.recv_timeout_ms, 100); // default
        assert!(!cfg.channel.reuse_port); // default
    }

    #[test]
    fn rejects_unicast_group() {
        let toml_src = base_toml().replace("233.54.12.111", "10.0.0.1");
        let cfg: AppConfig = toml::from_str(&toml_src).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_metrics_bind() {
        let toml_src = base_toml().replace("0.0.0.0:9100", "nonsense");
        let cfg: AppConfig = toml::from_str(&toml_src).unwrap();
        assert!(cfg.validate().is_err());
    }
}
