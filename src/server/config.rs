//! Server configuration parsed from flags and environment variables.

use clap::Parser;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "asset-registry", about = "Asset tracking REST service")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "ASSET_REGISTRY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind.
    #[arg(long, env = "ASSET_REGISTRY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Tracing filter directive, e.g. `info` or `asset_registry=debug`.
    #[arg(long, env = "ASSET_REGISTRY_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            log_filter: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_flag_defaults() {
        let parsed = ServerConfig::parse_from(["asset-registry"]);
        let defaults = ServerConfig::default();
        assert_eq!(parsed.host, defaults.host);
        assert_eq!(parsed.port, defaults.port);
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = ServerConfig::parse_from([
            "asset-registry",
            "--host",
            "0.0.0.0",
            "--port",
            "9090",
            "--log-filter",
            "asset_registry=debug",
        ]);
        assert_eq!(parsed.host, "0.0.0.0");
        assert_eq!(parsed.port, 9090);
        assert_eq!(parsed.log_filter, "asset_registry=debug");
    }
}
