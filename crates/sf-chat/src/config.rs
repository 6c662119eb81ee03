//! Configuration for a chat session.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Delay between a user message and the character's reply.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Configuration for a chat session.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// RNG seed for reproducible replies. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// How long a character "types" before the reply shows up.
    pub reply_delay: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            seed: None,
            reply_delay: DEFAULT_REPLY_DELAY,
        }
    }
}

impl ChatConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the reply delay.
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Build the RNG described by this config.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn default_config() {
        let cfg = ChatConfig::default();
        assert!(cfg.seed.is_none());
        assert_eq!(cfg.reply_delay, Duration::from_millis(1000));
    }

    #[test]
    fn builder_methods() {
        let cfg = ChatConfig::default()
            .with_seed(7)
            .with_reply_delay(Duration::ZERO);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.reply_delay, Duration::ZERO);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let cfg = ChatConfig::default().with_seed(99);
        let a: u32 = cfg.rng().random();
        let b: u32 = cfg.rng().random();
        assert_eq!(a, b);
    }
}
