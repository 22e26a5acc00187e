// The smallest prime accepted by the hash functions.
//
// Primes at or below the size of the ASCII alphabet produce systematic
// collisions between short keys.
pub const ALPHABET: usize = 128;

// Hashes `key` into `[0, buckets)`.
//
// The key's bytes are read as the digits of a base-`prime` numeral, reduced
// modulo `buckets` after every digit.
#[inline]
pub fn hash(key: &str, prime: usize, buckets: usize) -> usize {
    debug_assert!(buckets > 0);

    let prime = prime as u128;
    let buckets = buckets as u128;

    // `h < buckets <= usize::MAX`, so `h * prime` cannot overflow a u128.
    let h = key
        .bytes()
        .fold(0u128, |h, b| (h * prime + u128::from(b)) % buckets);

    h as usize
}

// A pair of independent string hash functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoubleHash {
    // Prime for the hash selecting the first slot.
    pub a: usize,
    // Prime for the hash selecting the step size.
    pub b: usize,
}

impl DoubleHash {
    pub const DEFAULT: DoubleHash = DoubleHash { a: 151, b: 163 };

    // The first slot in the probe sequence of `key`.
    #[inline]
    pub fn first(&self, key: &str, capacity: usize) -> usize {
        hash(key, self.a, capacity)
    }

    // The distance between consecutive slots in the probe sequence of `key`.
    //
    // The second hash is taken modulo `capacity - 1`, so the step lies in
    // `[1, capacity)` and is coprime with a prime `capacity`.
    #[inline]
    pub fn step(&self, key: &str, capacity: usize) -> usize {
        if capacity < 2 {
            return 1;
        }

        // Not `hash(key, b, capacity) + 1`, which is `capacity`, a zero step,
        // whenever that hash is `capacity - 1`.
        hash(key, self.b, capacity - 1) + 1
    }

    // Returns the slot visited by `key` on the given probe attempt.
    #[cfg(test)]
    pub fn index(&self, key: &str, capacity: usize, attempt: usize) -> usize {
        let first = self.first(key, capacity) as u128;
        let step = self.step(key, capacity) as u128;

        ((first + attempt as u128 * step) % capacity as u128) as usize
    }
}

impl Default for DoubleHash {
    fn default() -> Self {
        DoubleHash::DEFAULT
    }
}

// A double-hashing probe sequence.
//
// On a table of prime capacity the sequence visits every slot exactly once
// in its first `capacity` attempts.
pub struct Probe {
    // The current index in the probe sequence.
    pub i: usize,
    // The number of attempts made so far.
    pub len: usize,
    // Distance to the next index.
    step: usize,
    // The length of the table.
    capacity: usize,
}

impl Probe {
    // Initialize the probe sequence for `key`.
    #[inline]
    pub fn start(key: &str, hasher: &DoubleHash, capacity: usize) -> Probe {
        Probe {
            i: hasher.first(key, capacity),
            len: 0,
            step: hasher.step(key, capacity),
            capacity,
        }
    }

    // Returns `true` once every slot has been visited.
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.len >= self.capacity
    }

    // Increment the probe sequence.
    #[inline]
    pub fn next(&mut self) {
        self.len += 1;

        // `i + step` without overflowing.
        let gap = self.capacity - self.step;
        if self.i >= gap {
            self.i -= gap;
        } else {
            self.i += self.step;
        }
    }
}
