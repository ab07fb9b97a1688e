//! Metadata field selection.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// A single metadata column that can be collected for each node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
pub enum MetadataField {
    /// File length in bytes.
    #[strum(to_string = "size")]
    Size,
    /// Last write time (UTC).
    #[strum(to_string = "time")]
    Modified,
    /// Permission bits.
    #[strum(to_string = "perm")]
    Permissions,
    /// Owning user.
    #[strum(to_string = "owner")]
    Owner,
    /// Owning group.
    #[strum(to_string = "group")]
    Group,
}

impl MetadataField {
    /// Command-line token for this field.
    pub fn token(self) -> &'static str {
        self.into()
    }

    const fn bit(self) -> u8 {
        match self {
            MetadataField::Size => 1 << 0,
            MetadataField::Modified => 1 << 1,
            MetadataField::Permissions => 1 << 2,
            MetadataField::Owner => 1 << 3,
            MetadataField::Group => 1 << 4,
        }
    }
}

/// A set of [`MetadataField`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<MetadataField>", from = "Vec<MetadataField>")]
pub struct MetadataFields {
    bits: u8,
}

impl MetadataFields {
    /// No metadata.
    pub const NONE: Self = Self { bits: 0 };
    /// Size and modification time, what `--details` turns on.
    pub const DEFAULT: Self = Self {
        bits: MetadataField::Size.bit() | MetadataField::Modified.bit(),
    };
    /// Every field.
    pub const ALL: Self = Self { bits: 0b1_1111 };

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn contains(&self, field: MetadataField) -> bool {
        self.bits & field.bit() != 0
    }

    /// True when permissions, owner or group are requested.
    pub fn needs_ownership(&self) -> bool {
        self.contains(MetadataField::Permissions)
            || self.contains(MetadataField::Owner)
            || self.contains(MetadataField::Group)
    }

    pub fn insert(&mut self, field: MetadataField) {
        self.bits |= field.bit();
    }

    pub fn remove(&mut self, field: MetadataField) {
        self.bits &= !field.bit();
    }

    /// Same set with `field` added.
    pub fn with(mut self, field: MetadataField) -> Self {
        self.insert(field);
        self
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = MetadataField> + '_ {
        MetadataField::iter().filter(|f| self.contains(*f))
    }

    /// Parse detail tokens as given on the command line.
    ///
    /// Each entry may hold several tokens separated by `,` or `;`. `none`
    /// clears everything and stops parsing; unknown tokens are ignored.
    pub fn parse<I, S>(entries: I, include_default: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = if include_default {
            Self::DEFAULT
        } else {
            Self::NONE
        };

        for entry in entries {
            for token in entry
                .as_ref()
                .split([',', ';'])
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
            {
                match token.as_str() {
                    "default" => result = result.union(Self::DEFAULT),
                    "all" => result = Self::ALL,
                    "none" => return Self::NONE,
                    "size" | "bytes" => result.insert(MetadataField::Size),
                    "time" | "modified" | "timestamp" => result.insert(MetadataField::Modified),
                    "perm" | "perms" | "permissions" => result.insert(MetadataField::Permissions),
                    "owner" => result.insert(MetadataField::Owner),
                    "group" => result.insert(MetadataField::Group),
                    _ => {}
                }
            }
        }

        result
    }

    /// Split the set into the `--details` default flag plus explicit tokens.
    ///
    /// Size and time together collapse into the default flag; whatever is
    /// left is listed as `size`, `time`, `perm`, `owner`, `group`.
    pub fn describe(&self) -> (bool, Vec<&'static str>) {
        if self.is_empty() {
            return (false, Vec::new());
        }

        let use_default =
            self.contains(MetadataField::Size) && self.contains(MetadataField::Modified);
        let mut remaining = *self;
        if use_default {
            remaining.remove(MetadataField::Size);
            remaining.remove(MetadataField::Modified);
        }

        let tokens = remaining.iter().map(|f| f.token()).collect();
        (use_default, tokens)
    }
}

impl From<MetadataFields> for Vec<MetadataField> {
    fn from(fields: MetadataFields) -> Self {
        fields.iter().collect()
    }
}

impl From<Vec<MetadataField>> for MetadataFields {
    fn from(fields: Vec<MetadataField>) -> Self {
        fields.into_iter().collect()
    }
}

impl FromIterator<MetadataField> for MetadataFields {
    fn from_iter<T: IntoIterator<Item = MetadataField>>(iter: T) -> Self {
        let mut set = MetadataFields::NONE;
        for field in iter {
            set.insert(field);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default() {
        let fields = MetadataFields::parse(Vec::<String>::new(), true);
        assert_eq!(fields, MetadataFields::DEFAULT);
    }

    #[test]
    fn test_parse_specific_fields() {
        let fields = MetadataFields::parse(["perm,owner"], false);
        let expected = MetadataFields::NONE
            .with(MetadataField::Permissions)
            .with(MetadataField::Owner);
        assert_eq!(fields, expected);
    }

    #[test]
    fn test_parse_none_resets() {
        let fields = MetadataFields::parse(["none", "size"], true);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_parse_all_and_aliases() {
        assert_eq!(MetadataFields::parse(["all"], false), MetadataFields::ALL);
        let fields = MetadataFields::parse(["BYTES; timestamp", "bogus"], false);
        assert_eq!(fields, MetadataFields::DEFAULT);
    }

    #[test]
    fn test_describe_collapses_default() {
        let fields = MetadataFields::DEFAULT.with(MetadataField::Owner);
        let (use_default, extra) = fields.describe();
        assert!(use_default);
        assert_eq!(extra, vec!["owner"]);
    }

    #[test]
    fn test_describe_explicit_only() {
        let fields = MetadataFields::NONE
            .with(MetadataField::Modified)
            .with(MetadataField::Group);
        assert_eq!(fields.describe(), (false, vec!["time", "group"]));
        assert_eq!(MetadataFields::NONE.describe(), (false, Vec::new()));
    }

    #[test]
    fn test_field_tokens() {
        let tokens: Vec<_> = MetadataField::iter().map(MetadataField::token).collect();
        assert_eq!(tokens, vec!["size", "time", "perm", "owner", "group"]);
    }
}
