use crate::core::config::data::{path_display, Config};
use crate::core::config::defaults::DEFAULT_ENDPOINT;

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.endpoint {
            Some(endpoint) => println!("  endpoint: {endpoint}"),
            None => println!("  endpoint: (unset, default {DEFAULT_ENDPOINT})"),
        }
        match self.reveal {
            Some(mode) => println!("  reveal: {}", mode.as_str()),
            None => println!("  reveal: (unset)"),
        }
        match self.reveal_interval_ms {
            Some(ms) => println!("  reveal-interval-ms: {ms}"),
            None => println!("  reveal-interval-ms: (unset)"),
        }
        match self.request_timeout_secs {
            Some(secs) => println!("  request-timeout-secs: {secs}"),
            None => println!("  request-timeout-secs: (unset)"),
        }
        match &self.data_dir {
            Some(dir) => println!("  data-dir: {}", path_display(dir)),
            None => println!("  data-dir: (unset)"),
        }
    }
}
