//! UpkeepId - opaque 256-bit upkeep identifier
//!
//! Registries key upkeeps by a 256-bit unsigned integer. The probe never
//! interprets the value; it is carried as 32 big-endian bytes and forwarded
//! verbatim on every check.

/// 256-bit upkeep identifier, stored big-endian.
///
/// Big-endian storage means the derived ordering matches numeric ordering.
/// Parses from `0x`-prefixed hex (up to 64 digits, left-padded) or from a
/// plain decimal string (`u128` range); displays as full-width `0x` hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UpkeepId([u8; 32]);

impl UpkeepId {
    /// Build an id from raw big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The id as big-endian bytes.
    pub const fn to_be_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Borrow the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<u64> for UpkeepId {
    fn from(value: u64) -> Self {
        Self::from(value as u128)
    }
}

impl From<u128> for UpkeepId {
    fn from(value: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl std::fmt::Display for UpkeepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::str::FromStr for UpkeepId {
    type Err = ParseUpkeepIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseUpkeepIdError::Empty);
        }

        if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if digits.is_empty() {
                return Err(ParseUpkeepIdError::Empty);
            }
            if digits.len() > 64 {
                return Err(ParseUpkeepIdError::TooLong(digits.len()));
            }
            let padded = format!("{:0>64}", digits);
            let decoded = hex::decode(&padded).map_err(|_| ParseUpkeepIdError::InvalidHex)?;
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(&decoded);
            Ok(Self(bytes))
        } else {
            let value = s
                .parse::<u128>()
                .map_err(|_| ParseUpkeepIdError::InvalidDecimal)?;
            Ok(Self::from(value))
        }
    }
}

/// Errors from parsing an upkeep id string
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseUpkeepIdError {
    #[error("empty upkeep id")]
    Empty,

    #[error("hex upkeep id longer than 64 digits: {0}")]
    TooLong(usize),

    #[error("invalid hex digits in upkeep id")]
    InvalidHex,

    #[error("invalid decimal upkeep id")]
    InvalidDecimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u64() {
        let id = UpkeepId::from(123u64);
        let mut expected = [0u8; 32];
        expected[31] = 123;
        assert_eq!(id.to_be_bytes(), expected);
    }

    #[test]
    fn test_display_roundtrip() {
        let id = UpkeepId::from(0xabcd_1234u64);
        let text = id.to_string();
        assert!(text.starts_with("0x"));
        assert_eq!(text.len(), 66);
        assert_eq!(text.parse::<UpkeepId>().unwrap(), id);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!("123".parse::<UpkeepId>().unwrap(), UpkeepId::from(123u64));
        assert_eq!(
            "340282366920938463463374607431768211455".parse::<UpkeepId>().unwrap(),
            UpkeepId::from(u128::MAX)
        );
    }

    #[test]
    fn test_parse_short_hex_left_pads() {
        assert_eq!("0x7b".parse::<UpkeepId>().unwrap(), UpkeepId::from(123u64));
        // Odd digit counts are accepted
        assert_eq!("0xabc".parse::<UpkeepId>().unwrap(), UpkeepId::from(0xabcu64));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("".parse::<UpkeepId>(), Err(ParseUpkeepIdError::Empty));
        assert_eq!("0x".parse::<UpkeepId>(), Err(ParseUpkeepIdError::Empty));
        assert_eq!("0xzz".parse::<UpkeepId>(), Err(ParseUpkeepIdError::InvalidHex));
        assert_eq!("12a".parse::<UpkeepId>(), Err(ParseUpkeepIdError::InvalidDecimal));
        assert_eq!(
            format!("0x{}", "f".repeat(65)).parse::<UpkeepId>(),
            Err(ParseUpkeepIdError::TooLong(65))
        );
    }

    #[test]
    fn test_ordering_matches_numeric() {
        assert!(UpkeepId::from(1u64) < UpkeepId::from(2u64));
        assert!(UpkeepId::from(u128::MAX) > UpkeepId::from(u64::MAX));
    }
}
