//! Configuration loading shared by all commands.

use bns_consensus::{ConsensusConfig, Grammar};

/// Loaded configuration plus the grammar compiled from it.
pub struct Context {
    pub config: ConsensusConfig,
    pub grammar: Grammar,
}

impl Context {
    pub fn load(path: Option<&str>, test_mode: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let config = match path {
            Some(path) => ConsensusConfig::from_path(path)
                .map_err(|e| format!("Failed to load config {}: {}", path, e))?,
            None => ConsensusConfig::default(),
        };
        let config = if test_mode {
            config.with_test_mode(true)
        } else {
            config
        };
        let grammar = Grammar::new(&config)?;
        log::debug!("loaded consensus config (test_mode={})", config.network.test_mode);
        Ok(Self { config, grammar })
    }
}
