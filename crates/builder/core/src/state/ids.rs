use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

catalog_id!(
    /// Locale-independent race identifier (e.g. `human`).
    RaceId
);
catalog_id!(
    /// Locale-independent class identifier (e.g. `fighter`).
    ClassId
);
catalog_id!(
    /// Locale-independent skill identifier (e.g. `tumble`).
    SkillId
);
catalog_id!(
    /// Locale-independent feat identifier (e.g. `weapon_focus`).
    FeatId
);

/// Surrogate identity of one taken feat occurrence on a character.
///
/// Independent of the feat definition so that repeated and specialized
/// instances of the same feat stay distinguishable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Key of a conditional effect toggle (e.g. `fighting_defensively`).
///
/// Keys are lowercase ASCII identifiers: a leading letter followed by letters,
/// digits or underscores. Parsing rejects anything else so that a typo in a
/// catalog file fails at load time instead of producing an inert toggle.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct ConditionKey(String);

/// Error returned when a string is not a well-formed [`ConditionKey`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid condition key '{0}': expected lowercase letters, digits and underscores")]
pub struct InvalidConditionKey(pub String);

impl ConditionKey {
    pub fn parse(key: &str) -> Result<Self, InvalidConditionKey> {
        let mut chars = key.chars();
        let valid_head = chars.next().is_some_and(|c| c.is_ascii_lowercase());
        let valid_tail =
            chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if valid_head && valid_tail {
            Ok(Self(key.to_owned()))
        } else {
            Err(InvalidConditionKey(key.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ConditionKey {
    type Err = InvalidConditionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ConditionKey {
    type Error = InvalidConditionKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConditionKey> for String {
    fn from(key: ConditionKey) -> Self {
        key.0
    }
}

impl Borrow<str> for ConditionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
