//! Byte-unit conversions. Integer division truncates toward zero.

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

pub fn bytes_to_mb(bytes: u64) -> u64 {
    bytes / MIB
}

pub fn bytes_to_gb(bytes: u64) -> u64 {
    bytes / GIB
}

pub fn kb_to_mb(kb: u64) -> u64 {
    kb / 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_partial_units() {
        assert_eq!(bytes_to_mb(MIB - 1), 0);
        assert_eq!(bytes_to_mb(3 * MIB + 17), 3);
        assert_eq!(bytes_to_gb(GIB * 2 - 1), 1);
        assert_eq!(kb_to_mb(2047), 1);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        assert_eq!(bytes_to_gb(u64::MAX), u64::MAX / GIB);
    }
}
