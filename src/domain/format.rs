//! Display formatting for hashes, addresses and block timestamps

use chrono::{DateTime, Local, TimeZone};

/// Number of hash characters kept before the ellipsis
pub const HASH_DISPLAY_LEN: usize = 15;

/// Number of address characters kept before the ellipsis
pub const ADDRESS_DISPLAY_LEN: usize = 20;

const ELLIPSIS: &str = "...";

/// First 15 characters of a hash followed by `...`
pub fn truncate_hash(hash: &str) -> String {
    truncate(hash, HASH_DISPLAY_LEN)
}

/// First 20 characters of an address followed by `...`
pub fn truncate_address(address: &str) -> String {
    truncate(address, ADDRESS_DISPLAY_LEN)
}

fn truncate(value: &str, keep: usize) -> String {
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Local date/time for a backend timestamp.
///
/// `unit` is the number of backend ticks per millisecond.
pub fn format_timestamp(epoch: i64, unit: i64) -> String {
    format_timestamp_in(epoch, unit, &Local)
}

/// Same as [`format_timestamp`] in an explicit timezone.
///
/// Out-of-range instants render as an empty string.
pub fn format_timestamp_in<Tz>(epoch: i64, unit: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let millis = epoch / unit.max(1);
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_truncate_hash_long_input() {
        let hash = "0000a3f9c1d2e4b5a6f7081920abcdef";
        assert_eq!(truncate_hash(hash), "0000a3f9c1d2e4b...");
        assert_eq!(truncate_hash(hash).chars().count(), 18);
    }

    #[test]
    fn test_truncate_hash_short_input_keeps_everything() {
        assert_eq!(truncate_hash("genesis_hash"), "genesis_hash...");
        assert_eq!(truncate_hash(""), "...");
        assert_eq!(truncate_hash("exactly15chars!"), "exactly15chars!...");
    }

    #[test]
    fn test_truncate_hash_never_exceeds_eighteen_chars() {
        for len in 0..64 {
            let input: String = "é".repeat(len);
            let out = truncate_hash(&input);
            assert!(out.chars().count() <= 18, "len {len}");
            if len < HASH_DISPLAY_LEN {
                assert!(out.starts_with(&input));
            }
        }
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(
            truncate_address("0123456789abcdefghijklmnop"),
            "0123456789abcdefghij..."
        );
    }

    #[test]
    fn test_format_timestamp_nanoseconds() {
        // 2024-01-01 00:00:00 UTC in nanoseconds
        let epoch = 1_704_067_200_000_000_000;
        assert_eq!(
            format_timestamp_in(epoch, 1_000_000, &Utc),
            "1/1/2024, 12:00:00 AM"
        );
    }

    #[test]
    fn test_format_timestamp_zero_and_negative() {
        assert_eq!(format_timestamp_in(0, 1, &Utc), "1/1/1970, 12:00:00 AM");
        assert_eq!(format_timestamp_in(-1_000, 1, &Utc), "12/31/1969, 11:59:59 PM");
        // genesis timestamp in nanoseconds rounds down to the epoch
        assert_eq!(format_timestamp_in(1, 1_000_000, &Utc), "1/1/1970, 12:00:00 AM");
    }

    #[test]
    fn test_format_timestamp_never_panics() {
        for epoch in [0, 1, 999, i64::MAX / 2, i64::MAX] {
            for unit in [1, 1_000, 1_000_000, i64::MAX] {
                let _ = format_timestamp(epoch, unit);
            }
        }
        assert_eq!(format_timestamp_in(i64::MAX, 1, &Utc), "");
        assert!(!format_timestamp(1_000, 0).is_empty());
    }
}
