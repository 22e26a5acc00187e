use crate::error::ConfigError;
use crate::raw::{self, Config, DoubleHash};

use std::fmt;

// Each resize parameter can be overridden through `HashMapBuilder`.
const DEFAULT_CAPACITY: usize = 50;
const DEFAULT_GROW_THRESHOLD: usize = 70;
const DEFAULT_SHRINK_THRESHOLD: usize = 10;

/// A hash table mapping string keys to string values.
///
/// Entries are stored in a single slot array using open addressing, with
/// collisions resolved by double hashing. The slot array is always sized to
/// a prime, and is rebuilt at twice the size once the table is more than 70%
/// full, or at half the size once it drops below 10%.
///
/// See the [crate-level documentation](crate) for details.
#[derive(Clone)]
pub struct HashMap {
    raw: raw::HashMap,
}

/// A builder for a [`HashMap`].
///
/// # Examples
///
/// ```rust
/// use dhtable::HashMap;
///
/// let map = HashMap::builder()
///     // Set the initial base capacity.
///     .capacity(1000)
///     // Never shrink below a base capacity of 100.
///     .min_capacity(100)
///     // Grow once the table is more than 60% full.
///     .grow_threshold(60)
///     // Shrink once the table is less than 5% full.
///     .shrink_threshold(5)
///     // Construct the hash map.
///     .build();
///
/// assert_eq!(map.capacity(), 1009);
/// ```
pub struct HashMapBuilder {
    capacity: Option<usize>,
    min_capacity: usize,
    grow_threshold: usize,
    shrink_threshold: usize,
    primes: (usize, usize),
}

impl HashMapBuilder {
    /// Set the initial base capacity of the map.
    ///
    /// The map allocates the smallest prime number of slots at or above
    /// `capacity`. Values below the [minimum capacity](HashMapBuilder::min_capacity)
    /// are raised to it. Defaults to the minimum capacity.
    pub fn capacity(self, capacity: usize) -> HashMapBuilder {
        HashMapBuilder {
            capacity: Some(capacity),
            ..self
        }
    }

    /// Set the base capacity below which the map will never shrink.
    ///
    /// Defaults to 50.
    pub fn min_capacity(self, min_capacity: usize) -> HashMapBuilder {
        HashMapBuilder {
            min_capacity,
            ..self
        }
    }

    /// Set the load percentage above which an insert first grows the map.
    ///
    /// Must be between 1 and 99. Defaults to 70.
    pub fn grow_threshold(self, percent: usize) -> HashMapBuilder {
        HashMapBuilder {
            grow_threshold: percent,
            ..self
        }
    }

    /// Set the load percentage below which a remove first shrinks the map.
    ///
    /// Must be at most a quarter of the grow threshold, so that a shrunk map
    /// can always hold its entries. A threshold of 0 disables shrinking.
    /// Defaults to 10.
    pub fn shrink_threshold(self, percent: usize) -> HashMapBuilder {
        HashMapBuilder {
            shrink_threshold: percent,
            ..self
        }
    }

    /// Set the two primes parameterizing the probe sequence's hash functions.
    ///
    /// Both must be distinct primes greater than 128. Defaults to `(151, 163)`.
    pub fn primes(self, a: usize, b: usize) -> HashMapBuilder {
        HashMapBuilder {
            primes: (a, b),
            ..self
        }
    }

    /// Construct a [`HashMap`] from the builder, using the configured options.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any option is out of range.
    pub fn try_build(self) -> Result<HashMap, ConfigError> {
        if self.min_capacity == 0 {
            return Err(ConfigError::ZeroMinCapacity);
        }

        if !(1..100).contains(&self.grow_threshold) {
            return Err(ConfigError::InvalidGrowThreshold(self.grow_threshold));
        }

        if self.shrink_threshold * 4 > self.grow_threshold {
            return Err(ConfigError::InvalidShrinkThreshold {
                shrink: self.shrink_threshold,
                grow: self.grow_threshold,
            });
        }

        let (a, b) = self.primes;
        for prime in [a, b] {
            if prime <= raw::ALPHABET || !raw::is_prime(prime) {
                return Err(ConfigError::InvalidPrime(prime));
            }
        }

        if a == b {
            return Err(ConfigError::EqualPrimes(a));
        }

        let config = Config {
            capacity: self
                .capacity
                .unwrap_or(self.min_capacity)
                .max(self.min_capacity),
            min_capacity: self.min_capacity,
            grow_threshold: self.grow_threshold,
            shrink_threshold: self.shrink_threshold,
            hasher: DoubleHash { a, b },
        };

        Ok(HashMap {
            raw: raw::HashMap::new(config),
        })
    }

    /// Construct a [`HashMap`] from the builder, using the configured options.
    ///
    /// # Panics
    ///
    /// Panics if any option is out of range. See [`HashMapBuilder::try_build`]
    /// for a fallible version.
    pub fn build(self) -> HashMap {
        match self.try_build() {
            Ok(map) => map,
            Err(err) => panic!("invalid hash map configuration: {err}"),
        }
    }
}

impl fmt::Debug for HashMapBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashMapBuilder")
            .field("capacity", &self.capacity)
            .field("min_capacity", &self.min_capacity)
            .field("grow_threshold", &self.grow_threshold)
            .field("shrink_threshold", &self.shrink_threshold)
            .field("primes", &self.primes)
            .finish()
    }
}

impl HashMap {
    /// Creates an empty `HashMap`.
    ///
    /// The map is created with a base capacity of 50, allocating 53 slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhtable::HashMap;
    /// let map = HashMap::new();
    /// assert_eq!(map.capacity(), 53);
    /// ```
    pub fn new() -> HashMap {
        HashMap::builder().build()
    }

    /// Creates an empty `HashMap` with at least the given base capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhtable::HashMap;
    /// let map = HashMap::with_capacity(100);
    /// assert_eq!(map.capacity(), 101);
    /// ```
    pub fn with_capacity(capacity: usize) -> HashMap {
        HashMap::builder().capacity(capacity).build()
    }

    /// Returns a builder for a `HashMap`.
    ///
    /// The builder can be used to tune the resize policy and hash functions.
    pub fn builder() -> HashMapBuilder {
        HashMapBuilder {
            capacity: None,
            min_capacity: DEFAULT_CAPACITY,
            grow_threshold: DEFAULT_GROW_THRESHOLD,
            shrink_threshold: DEFAULT_SHRINK_THRESHOLD,
            primes: (DoubleHash::DEFAULT.a, DoubleHash::DEFAULT.b),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhtable::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("a", "1");
    /// map.insert("b", "2");
    /// assert!(map.len() == 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the map. This is always a prime number.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the logical size the slot count is derived from.
    ///
    /// The base capacity is doubled or halved on resize, and the map holds the
    /// smallest prime number of slots at or above it.
    #[inline]
    pub fn base_capacity(&self) -> usize {
        self.raw.base_capacity()
    }

    /// Returns the load factor of the map as an integer percentage.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhtable::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// for i in 0..10 {
    ///     map.insert(i.to_string(), "x");
    /// }
    /// // 10 * 100 / 53
    /// assert_eq!(map.load(), 18);
    /// ```
    #[inline]
    pub fn load(&self) -> usize {
        self.raw.load()
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhtable::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("apple", "red");
    /// assert_eq!(map.contains_key("apple"), true);
    /// assert_eq!(map.contains_key("pear"), false);
    /// ```
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhtable::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("apple", "red");
    /// assert_eq!(map.get("apple"), Some("red"));
    /// assert_eq!(map.get("pear"), None);
    /// ```
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw.get(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, [`None`] is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned.
    ///
    /// If the map is more than 70% full, it is first resized to twice its base
    /// capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhtable::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert("apple", "red"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// assert_eq!(map.insert("apple", "green"), Some("red".to_owned()));
    /// assert_eq!(map.get("apple"), Some("green"));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.raw.insert(key.into(), value.into())
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// If the map is less than 10% full, it is first resized to half its base
    /// capacity, unless that would take it below the minimum capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhtable::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("apple", "red");
    /// assert_eq!(map.remove("apple"), Some("red".to_owned()));
    /// assert_eq!(map.remove("apple"), None);
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.raw.remove(key)
    }

    /// Clears the map, removing all key-value pairs.
    ///
    /// The map is reset to its initial capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use dhtable::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert("apple", "red");
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear()
    }
}

impl Default for HashMap {
    fn default() -> Self {
        HashMap::new()
    }
}

impl fmt::Debug for HashMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.raw.config();

        f.debug_struct("HashMap")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("base_capacity", &self.base_capacity())
            .field("min_capacity", &config.min_capacity)
            .field("grow_threshold", &config.grow_threshold)
            .field("shrink_threshold", &config.shrink_threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let map = HashMap::new();
        assert_eq!(map.base_capacity(), 50);
        assert_eq!(map.capacity(), 53);
        assert_eq!(
            *map.raw.config(),
            Config {
                capacity: 50,
                min_capacity: 50,
                grow_threshold: 70,
                shrink_threshold: 10,
                hasher: DoubleHash { a: 151, b: 163 },
            }
        );
    }

    #[test]
    fn capacity_is_raised_to_minimum() {
        let map = HashMap::builder().capacity(10).min_capacity(20).build();
        assert_eq!(map.base_capacity(), 20);
        assert_eq!(map.capacity(), 23);

        let map = HashMap::builder().min_capacity(7).build();
        assert_eq!(map.base_capacity(), 7);
        assert_eq!(map.capacity(), 7);
    }

    #[test]
    fn rejects_invalid_config() {
        let err = |builder: HashMapBuilder| builder.try_build().unwrap_err();

        assert_eq!(
            err(HashMap::builder().min_capacity(0)),
            ConfigError::ZeroMinCapacity
        );
        assert_eq!(
            err(HashMap::builder().grow_threshold(0)),
            ConfigError::InvalidGrowThreshold(0)
        );
        assert_eq!(
            err(HashMap::builder().grow_threshold(100)),
            ConfigError::InvalidGrowThreshold(100)
        );
        assert_eq!(
            err(HashMap::builder().shrink_threshold(20)),
            ConfigError::InvalidShrinkThreshold {
                shrink: 20,
                grow: 70
            }
        );
        assert_eq!(
            err(HashMap::builder().primes(151, 150)),
            ConfigError::InvalidPrime(150)
        );
        assert_eq!(
            err(HashMap::builder().primes(127, 163)),
            ConfigError::InvalidPrime(127)
        );
        assert_eq!(
            err(HashMap::builder().primes(163, 163)),
            ConfigError::EqualPrimes(163)
        );
    }

    #[test]
    fn accepts_boundary_config() {
        let mut map = HashMap::builder()
            .grow_threshold(99)
            .shrink_threshold(24)
            .primes(131, 257)
            .min_capacity(1)
            .try_build()
            .unwrap();

        assert_eq!(map.capacity(), 2);

        for i in 0..10 {
            map.insert(i.to_string(), i.to_string());
        }
        assert!(map.capacity() > 2);
        assert_eq!(map.len(), 10);

        for i in 0..10 {
            assert_eq!(map.remove(&i.to_string()), Some(i.to_string()));
        }
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 2);
    }

    #[test]
    #[should_panic(expected = "invalid hash map configuration")]
    fn build_panics_on_invalid_config() {
        HashMap::builder().grow_threshold(0).build();
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::InvalidPrime(4).to_string(),
            "hash prime 4 must be a prime greater than 128"
        );
        assert_eq!(
            ConfigError::InvalidShrinkThreshold { shrink: 20, grow: 70 }.to_string(),
            "shrink threshold 20% must be at most a quarter of the grow threshold 70%"
        );
    }

    #[test]
    fn debug_omits_entries() {
        let mut map = HashMap::new();
        map.insert("secret", "value");

        let debug = format!("{map:?}");
        assert!(debug.contains("len: 1"));
        assert!(debug.contains("capacity: 53"));
        assert!(!debug.contains("secret"));
    }
}
