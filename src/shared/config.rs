/// Process-wide engine configuration (§10.4).
///
/// The one knob the core contract mandates is `channel_capacity` (§5, §6); the
/// rest exists so the CLI has somewhere to put the ambient-stack settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Bound on every mpsc queue in the pipeline: Router inbox, coordinator
    /// inbox, side worker inboxes, and the emitter inbox. Default matches the
    /// reference implementation's 10000 slots (§5).
    pub channel_capacity: usize,

    /// TCP address the default transport listens on.
    pub listen_addr: std::net::SocketAddr,

    /// `tracing` filter directive, e.g. "info", "debug", "matching_engine=trace".
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 10_000,
            listen_addr: "127.0.0.1:7878".parse().unwrap(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_channel_capacity_matches_reference_bound() {
        assert_eq!(EngineConfig::default().channel_capacity, 10_000);
    }
}
