//! # Provider Names
//!
//! Closed set of external API providers known to the system.
//!
//! A [`ProviderName`] is both the display key of a provider and the key used
//! to correlate a call result (and its persisted log record) back to the
//! provider that produced it.
//!
//! # Examples
//!
//! ```
//! use api_fanout::domain::value_objects::ProviderName;
//!
//! let name: ProviderName = "kakao_profile".parse().unwrap();
//! assert_eq!(name, ProviderName::KakaoProfile);
//! assert_eq!(name.to_string(), "kakao_profile");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of an external API provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderName {
    /// Kakao user profile lookup.
    KakaoProfile,
    /// Kakao "send to me" talk message.
    KakaoSendMessage,
    /// Generic integration slot A.
    ServiceA,
    /// Generic integration slot B.
    ServiceB,
    /// Generic integration slot C.
    ServiceC,
}

impl ProviderName {
    /// Every known provider, in declaration order.
    pub const ALL: [ProviderName; 5] = [
        Self::KakaoProfile,
        Self::KakaoSendMessage,
        Self::ServiceA,
        Self::ServiceB,
        Self::ServiceC,
    ];

    /// Returns the canonical string form.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KakaoProfile => "kakao_profile",
            Self::KakaoSendMessage => "kakao_send_message",
            Self::ServiceA => "service_a",
            Self::ServiceB => "service_b",
            Self::ServiceC => "service_c",
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderName {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == normalized)
            .ok_or_else(|| ParseEnumError::InvalidValue("ProviderName", s.to_string()))
    }
}

/// Error returned when parsing a domain enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The value does not name any variant of the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        for name in ProviderName::ALL {
            assert_eq!(name.to_string(), name.as_str());
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(
            "KAKAO_SEND_MESSAGE".parse::<ProviderName>().unwrap(),
            ProviderName::KakaoSendMessage
        );
        assert_eq!(
            "service_b".parse::<ProviderName>().unwrap(),
            ProviderName::ServiceB
        );
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "naver_profile".parse::<ProviderName>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid ProviderName value: 'naver_profile'"
        );
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ProviderName::KakaoProfile).unwrap();
        assert_eq!(json, "\"kakao_profile\"");

        let back: ProviderName = serde_json::from_str("\"service_c\"").unwrap();
        assert_eq!(back, ProviderName::ServiceC);
    }

    #[test]
    fn all_names_are_distinct() {
        let mut strings: Vec<_> = ProviderName::ALL.iter().map(|n| n.as_str()).collect();
        strings.sort_unstable();
        strings.dedup();
        assert_eq!(strings.len(), ProviderName::ALL.len());
    }
}
