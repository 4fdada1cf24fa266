use super::env_vars::{parse_or, process_env};

const DEFAULT_IP: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl ServerConfig {
    /// Environment variables:
    /// - SERVICE_IP: address to bind (default: "127.0.0.1")
    /// - SERVICE_PORT: port to bind (default: 8080)
    pub fn from_env() -> Self {
        Self::from_vars(&process_env)
    }

    pub fn from_vars<F: Fn(&str) -> Option<String>>(lookup: &F) -> Self {
        let ip = lookup("SERVICE_IP")
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty())
            .unwrap_or_else(|| DEFAULT_IP.to_string());

        Self {
            ip,
            port: parse_or(lookup, "SERVICE_PORT", DEFAULT_PORT),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_vars::lookup_from;

    #[test]
    fn should_default_to_local_listener() {
        let config = ServerConfig::from_vars(&lookup_from(&[]));

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn should_read_listener_from_variables() {
        let config = ServerConfig::from_vars(&lookup_from(&[
            ("SERVICE_IP", "0.0.0.0"),
            ("SERVICE_PORT", "3000"),
        ]));

        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn should_keep_default_port_when_value_is_not_a_port() {
        let config = ServerConfig::from_vars(&lookup_from(&[("SERVICE_PORT", "70000")]));

        assert_eq!(config.port, 8080);
    }
}
