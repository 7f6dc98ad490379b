//! CallerAddress - 20-byte address of the checking entity
//!
//! Checks are performed on behalf of an address. The probe treats it as
//! opaque bytes and forwards it to the registry unchanged.

/// 20-byte caller address.
///
/// Parses from 40 hex digits with an optional `0x` prefix; displays as
/// `0x`-prefixed lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallerAddress([u8; 20]);

impl CallerAddress {
    /// The all-zero address.
    pub const ZERO: CallerAddress = CallerAddress([0u8; 20]);

    /// Build an address from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Borrow the underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl std::fmt::Display for CallerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl std::str::FromStr for CallerAddress {
    type Err = ParseCallerAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.len() != 40 {
            return Err(ParseCallerAddressError::InvalidLength(digits.len()));
        }

        let decoded = hex::decode(digits).map_err(|_| ParseCallerAddressError::InvalidHex)?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }
}

/// Errors from parsing a caller address string
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseCallerAddressError {
    #[error("caller address must be 40 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex digits in caller address")]
    InvalidHex,
}
