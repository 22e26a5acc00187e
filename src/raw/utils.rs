// Returns `true` if `n` is prime.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }

    if n < 4 {
        return true;
    }

    if n % 2 == 0 {
        return false;
    }

    // Trial division by odd numbers up to sqrt(n).
    let mut d = 3;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }

        d += 2;
    }

    true
}

// Returns the smallest prime greater than or equal to `n`.
pub fn next_prime(n: usize) -> usize {
    let mut n = n.max(2);
    while !is_prime(n) {
        n = n.checked_add(1).expect("capacity overflow");
    }

    n
}
