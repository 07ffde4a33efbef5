//! Prime capacity maintenance and load-factor arithmetic shared by both maps

/// Returns true if `n` is prime.
///
/// Uses trial division by odd factors up to `√n`. `2` and `3` are prime, `0`, `1`
/// and every other even number are not.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }

    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    while factor.saturating_mul(factor) <= n {
        if n % factor == 0 {
            return false;
        }
        factor = factor.saturating_add(2);
    }

    true
}

/// Returns the smallest odd prime greater than or equal to `n`.
///
/// Even inputs are bumped to the next odd number first, so `next_prime(2)` is `3`.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n.saturating_add(1) } else { n };

    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}

/// Returns true once `size` entries in `capacity` slots have reached the load limit
/// expressed as `slots_per_entry` (2 for a limit of 0.5, 1 for a limit of 1.0).
#[must_use]
pub const fn at_load_limit(size: usize, capacity: usize, slots_per_entry: usize) -> bool {
    size.saturating_mul(slots_per_entry) >= capacity
}

/// Returns true if `size` entries fit into `capacity` slots without exceeding the load
/// limit expressed as `slots_per_entry`.
#[must_use]
pub const fn within_load_limit(size: usize, capacity: usize, slots_per_entry: usize) -> bool {
    size.saturating_mul(slots_per_entry) <= capacity
}

/// Adjusts a requested capacity upward until it is prime and holds `size` entries
/// within the load limit.
///
/// The two corrections alternate: a non-prime candidate is promoted to the next prime,
/// and a candidate that is too small is doubled, until both conditions hold at once.
#[must_use]
pub fn fit_capacity(requested: usize, size: usize, slots_per_entry: usize) -> usize {
    let mut capacity = requested.max(1);

    while !(is_prime(capacity) && within_load_limit(size, capacity, slots_per_entry)) {
        if !is_prime(capacity) {
            capacity = next_prime(capacity);
        }
        if !within_load_limit(size, capacity, slots_per_entry) {
            capacity = capacity.saturating_mul(2);
        }
    }

    capacity
}

/// Returns `size / capacity` as a ratio
#[must_use]
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
pub fn load_factor(size: usize, capacity: usize) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    size as f64 / capacity as f64
}
