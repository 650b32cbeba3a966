//! Primality tests across three suites, the last one failing on purpose

use xtest::{expect_false, expect_true, suite, xtest};

/// Trial division by `6k +/- 1`
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut k = 5;
    while k * k <= n {
        if n % k == 0 || n % (k + 2) == 0 {
            return false;
        }
        k += 6;
    }
    true
}

const LOW_PRIMES: &[u64] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199,
];

const BALANCED_PRIMES: &[u64] = &[
    5, 53, 157, 173, 211, 257, 263, 373, 563, 593, 607, 653, 733, 947, 977, 1103, 1123, 1187,
    1223, 1367, 1511, 1747, 1753, 1907, 2287, 2417, 2677, 2903, 2963, 3307, 3313, 3637, 3733,
    4013, 4409, 4457, 4597, 4657, 4691, 4993, 5107, 5113, 5303, 5387, 5393,
];

const BELL_PRIMES: &[u64] = &[2, 5, 877, 27_644_437];

suite!(PositiveLowPrimes);
suite!(PositiveBalancedPrimes);
suite!(DoomedToFail);

xtest!(PositiveLowPrimes, IsPrime, |ctx| {
    for &prime in LOW_PRIMES {
        expect_true!(ctx, is_prime(prime), "{} is prime", prime);
    }
});

xtest!(PositiveLowPrimes, RejectsComposites, |ctx| {
    for composite in [0, 1, 4, 9, 25, 49, 91, 121, 169] {
        expect_false!(ctx, is_prime(composite), "{} is not prime", composite);
    }
});

xtest!(PositiveBalancedPrimes, IsPrime, |ctx| {
    for &prime in BALANCED_PRIMES {
        expect_true!(ctx, is_prime(prime));
    }
});

xtest!(DoomedToFail, BellPrimesAreNotPrime, |ctx| {
    for &prime in BELL_PRIMES {
        expect_false!(ctx, is_prime(prime), "{} is a Bell prime", prime);
    }
});

xtest::main!();
