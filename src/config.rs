//! TOML configuration for a sieve run.
//!
//! ```toml
//! bound = 1000000
//! algorithm = "atkin"   # eratosthenes | atkin | sundaram
//! word_width = 32       # 16 | 32 | 64 | 128, defaults to the native width
//! ```

use crate::prime_set::PrimeSet;
use crate::sieve::Algorithm;
use crate::word::WordWidth;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which sieve to run, how far, and with which storage word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SieveConfig {
    pub bound: u64,
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    #[serde(default)]
    pub word_width: WordWidth,
}

fn default_algorithm() -> Algorithm {
    Algorithm::Eratosthenes
}

impl Default for SieveConfig {
    fn default() -> Self {
        SieveConfig {
            bound: 100,
            algorithm: default_algorithm(),
            word_width: WordWidth::default(),
        }
    }
}

impl SieveConfig {
    /// Run the configured sieve, mapping `word_width` onto a storage type.
    pub fn run(&self) -> Result<PrimeSet> {
        let set = match self.word_width {
            WordWidth::W16 => self.algorithm.generate_with::<u16>(self.bound),
            WordWidth::W32 => self.algorithm.generate_with::<u32>(self.bound),
            WordWidth::W64 => self.algorithm.generate_with::<u64>(self.bound),
            WordWidth::W128 => self.algorithm.generate_with::<u128>(self.bound),
        }?;
        info!(
            algorithm = %self.algorithm,
            bound = self.bound,
            word_width = %self.word_width,
            count = set.len(),
            "Sieve run complete"
        );
        Ok(set)
    }
}

/// Parse and validate a configuration from a TOML string.
pub fn parse_toml(content: &str) -> Result<SieveConfig> {
    let config: SieveConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse and validate a configuration from a TOML file.
pub fn parse_toml_file(path: &std::path::Path) -> Result<SieveConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sieve config {}", path.display()))?;
    parse_toml(&content).with_context(|| format!("Invalid sieve config {}", path.display()))
}

fn validate_config(config: &SieveConfig) -> Result<()> {
    if config.bound <= 2 {
        anyhow::bail!("bound must be greater than 2 (got {})", config.bound);
    }
    Ok(())
}
