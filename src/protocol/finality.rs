// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Finality threshold types
//!
//! Reference: <https://developers.circle.com/cctp/technical-guide>

use std::fmt;

/// Finality threshold a burn message is attested at
///
/// # Examples
///
/// ```rust
/// use cctp_transfer::FinalityThreshold;
///
/// assert_eq!(FinalityThreshold::Fast.as_u32(), 1000);
/// assert_eq!(FinalityThreshold::Standard.as_u32(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FinalityThreshold {
    /// Attestation at confirmed block level (threshold: 1000)
    Fast = 1000,

    /// Attestation at finalized block level (threshold: 2000)
    Standard = 2000,
}

impl FinalityThreshold {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fast => "Fast Transfer",
            Self::Standard => "Standard Transfer",
        }
    }
}

impl From<FinalityThreshold> for u32 {
    #[inline]
    fn from(threshold: FinalityThreshold) -> Self {
        threshold.as_u32()
    }
}

impl fmt::Display for FinalityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_values() {
        assert_eq!(u32::from(FinalityThreshold::Fast), 1000);
        assert_eq!(u32::from(FinalityThreshold::Standard), 2000);
    }

    #[test]
    fn test_display() {
        assert_eq!(FinalityThreshold::Fast.to_string(), "Fast Transfer (1000)");
        assert_eq!(
            FinalityThreshold::Standard.to_string(),
            "Standard Transfer (2000)"
        );
    }
}
