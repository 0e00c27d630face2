// Sender configuration: defaults, then environment, then command line
use slider_core::{Endpoint, DEFAULT_HOST, DEFAULT_LINGER, DEVICE_PORT, LOCAL_HOST};
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

// Environment variables for configuration
// SLIDER_HOST: Hostname or address of the slider (default: slider.local)
// SLIDER_PORT: TCP command port (default: 2500)
// SLIDER_LINGER_MS: Pause after closing the connection (default: 1000)

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means standard input, anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    pub fn open(&self) -> io::Result<Box<dyn BufRead>> {
        match self {
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
            InputSource::File(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub endpoint: Endpoint,
    pub input: InputSource,
    pub linger: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        SenderConfig {
            endpoint: Endpoint::device(),
            input: InputSource::Stdin,
            linger: DEFAULT_LINGER,
        }
    }
}

impl SenderConfig {
    pub fn from_env() -> Self {
        SenderConfig::from_vars(
            env::var("SLIDER_HOST").ok(),
            env::var("SLIDER_PORT").ok(),
            env::var("SLIDER_LINGER_MS").ok(),
        )
    }

    /// Blank or unparsable values fall back to the defaults.
    pub fn from_vars(
        host: Option<String>,
        port: Option<String>,
        linger_ms: Option<String>,
    ) -> Self {
        let host = host
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = port
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEVICE_PORT);

        let linger = linger_ms
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LINGER);

        SenderConfig {
            endpoint: Endpoint::new(&host, port),
            input: InputSource::Stdin,
            linger,
        }
    }

    /// Point at a device simulator on this machine, keeping the port.
    pub fn use_local(&mut self) {
        self.endpoint.host = LOCAL_HOST.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_selects_stdin() {
        assert_eq!(InputSource::from_arg("-"), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg("moves.txt"),
            InputSource::File(PathBuf::from("moves.txt"))
        );
        assert_eq!(InputSource::Stdin.describe(), "<stdin>");
    }

    #[test]
    fn local_keeps_port() {
        let mut config = SenderConfig {
            endpoint: Endpoint::new("slider.local", 2600),
            ..SenderConfig::default()
        };
        config.use_local();
        assert_eq!(config.endpoint, Endpoint::new("127.0.0.1", 2600));
    }

    #[test]
    fn defaults_target_device() {
        let config = SenderConfig::default();
        assert_eq!(config.endpoint.to_string(), "slider.local:2500");
        assert_eq!(config.linger, Duration::from_secs(1));
        assert_eq!(config.input, InputSource::Stdin);
    }

    fn vars(host: Option<&str>, port: Option<&str>, linger: Option<&str>) -> SenderConfig {
        SenderConfig::from_vars(
            host.map(String::from),
            port.map(String::from),
            linger.map(String::from),
        )
    }

    #[test]
    fn valid_values_are_taken() {
        let config = vars(Some("slider-2.local"), Some("2600"), Some("250"));
        assert_eq!(config.endpoint, Endpoint::new("slider-2.local", 2600));
        assert_eq!(config.linger, Duration::from_millis(250));
    }

    #[test]
    fn blank_host_is_ignored() {
        assert_eq!(vars(Some(""), None, None).endpoint.host, "slider.local");
        assert_eq!(vars(Some("  \t"), None, None).endpoint.host, "slider.local");
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = vars(None, Some("telnet"), Some("soon"));
        assert_eq!(config.endpoint.port, 2500);
        assert_eq!(config.linger, Duration::from_secs(1));

        let config = vars(None, Some("65536"), Some("-5"));
        assert_eq!(config.endpoint.port, 2500);
        assert_eq!(config.linger, Duration::from_secs(1));
    }

    #[test]
    fn missing_file_fails_to_open() {
        let source = InputSource::File(PathBuf::from("/nonexistent/slider/moves.txt"));
        assert!(source.open().is_err());
    }
}
