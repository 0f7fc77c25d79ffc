//! Utilities.

/// Returns floor log2
pub const fn flog2(val: usize) -> usize {
    if val <= 1 {
        0
    } else {
        1 + flog2(val >> 1)
    }
}

/// Returns `true` if `value` is a power of two. Zero is not.
pub const fn is_pow2(value: usize) -> bool { value != 0 && value & (value - 1) == 0 }

/// Returns a mask with the low `width` bits set.
pub const fn mask_u64(width: usize) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1 << width) - 1
    }
}

/// Some or executing the given expression.
#[macro_export]
macro_rules! some_or {
    ($e:expr, $err:expr) => {{
        match $e {
            Some(r) => r,
            None => $err,
        }
    }};
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(1, 0)]
    #[test_case(4, 2)]
    #[test_case(5, 2)]
    #[test_case(32, 5)]
    fn floor_log2(value: usize, expected: usize) { assert_eq!(flog2(value), expected); }

    #[test]
    fn powers_of_two() {
        assert!(!is_pow2(0));
        assert!(is_pow2(1));
        assert!(is_pow2(64));
        assert!(!is_pow2(48));
    }

    #[test]
    fn masks() {
        assert_eq!(mask_u64(0), 0);
        assert_eq!(mask_u64(4), 0xf);
        assert_eq!(mask_u64(64), u64::MAX);
    }

    #[test]
    fn some_or_takes_the_fallback() {
        let value: Option<u8> = None;
        let got = some_or!(value, 7);
        assert_eq!(got, 7);
    }
}
