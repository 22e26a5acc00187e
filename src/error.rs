use thiserror::Error;

/// An invalid [`HashMapBuilder`](crate::HashMapBuilder) configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum capacity must be at least 1")]
    ZeroMinCapacity,

    #[error("grow threshold must be between 1 and 99 percent, got {0}")]
    InvalidGrowThreshold(usize),

    #[error("shrink threshold {shrink}% must be at most a quarter of the grow threshold {grow}%")]
    InvalidShrinkThreshold { shrink: usize, grow: usize },

    #[error("hash prime {0} must be a prime greater than {alphabet}", alphabet = crate::raw::ALPHABET)]
    InvalidPrime(usize),

    #[error("hash primes must be distinct, both are {0}")]
    EqualPrimes(usize),
}
