// CDN shard selection
//
// The shard is derived from the CRC32 of the final source path so the same
// asset always lands on the same `a<N>.` subdomain.

use flate2::Crc;

use crate::constants::CDN_SHARD_COUNT;

/// CRC32 (IEEE) checksum of the given bytes
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(bytes);
    crc.sum()
}

/// Shard number in `1..=5` for a source path
pub fn shard_for(source: &str) -> i64 {
    let checksum = i64::from(crc32(source.as_bytes()));
    (checksum % CDN_SHARD_COUNT + CDN_SHARD_COUNT) % CDN_SHARD_COUNT + 1
}

/// Subdomain label including the trailing dot, e.g. `a3.`
pub fn subdomain_for(source: &str) -> String {
    format!("a{}.", shard_for(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_known_values() {
        assert_eq!(crc32(b""), 0);
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(crc32(b"test"), 0xD87F_7E0C);
    }

    #[test]
    fn test_shard_in_range() {
        for source in ["a", "sample.jpg", "folder/test", "", "\u{1F600}"] {
            let shard = shard_for(source);
            assert!((1..=5).contains(&shard), "shard {} for {:?}", shard, source);
        }
    }

    #[test]
    fn test_shard_matches_formula() {
        // 0xCBF43926 = 3421780262, 3421780262 % 5 = 2
        assert_eq!(shard_for("123456789"), 3);
        assert_eq!(subdomain_for("123456789"), "a3.");

        // 0xD87F7E0C = 3632233996, 3632233996 % 5 = 1
        assert_eq!(subdomain_for("test"), "a2.");
    }

    #[test]
    fn test_shard_is_deterministic() {
        assert_eq!(shard_for("folder/test"), shard_for("folder/test"));
    }
}
