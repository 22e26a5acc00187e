#![allow(dead_code)]

use dhtable::HashMap;

use std::sync::Once;

static LOGGER: Once = Once::new();

// Install a logger honoring `RUST_LOG`, once per test binary.
pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

// Run the test on different configurations of a `HashMap`.
pub fn with_map(mut test: impl FnMut(&dyn Fn() -> HashMap)) {
    init_logger();

    // Default resize policy.
    test(&(HashMap::new));

    // A tiny table that resizes constantly.
    test(
        &(|| {
            HashMap::builder()
                .min_capacity(2)
                .grow_threshold(80)
                .shrink_threshold(20)
                .build()
        }),
    );

    // The smallest table the builder accepts, two slots.
    test(&(|| HashMap::builder().min_capacity(1).build()));

    // A table that never shrinks, to let tombstones accumulate.
    test(
        &(|| {
            HashMap::builder()
                .capacity(1000)
                .shrink_threshold(0)
                .build()
        }),
    );

    // Different hash primes.
    test(&(|| HashMap::builder().primes(131, 257).build()));
}

// Returns `true` if `n` is prime.
pub fn is_prime(n: usize) -> bool {
    n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}
