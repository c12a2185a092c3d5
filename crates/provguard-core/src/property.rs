//! Tri-state override fields and the merged settings they produce.
//!
//! A caller-supplied configuration field is a [`Property`]: not provided,
//! explicitly cleared, or set to a value. Merging resolves every field to a
//! [`Setting`], which preserves "explicitly cleared" as an observable state.
//! An explicitly cleared policy-relevant field is a violation in its own
//! right, distinct from "omitted, default applied" (uniform across kinds).

use serde::{Serialize, Serializer};

/// A caller-supplied override field.
///
/// `Unset` means the field was omitted and the template default applies.
/// `Absent` means the caller explicitly cleared the field, which overrides
/// the default rather than falling back to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property<T> {
    Unset,
    Absent,
    Value(T),
}

// Manual impl: the derive would demand `T: Default`, which override types
// holding defaultless enums cannot satisfy.
impl<T> Default for Property<T> {
    fn default() -> Self {
        Property::Unset
    }
}

impl<T> Property<T> {
    /// REPLACE merge against a template default: an explicit value wins, an
    /// explicit clear survives as [`Setting::Absent`], an omitted field
    /// falls back to the template.
    pub fn merge(self, template: T) -> Setting<T> {
        match self {
            Property::Unset => Setting::Value(template),
            Property::Absent => Setting::Absent,
            Property::Value(v) => Setting::Value(v),
        }
    }

    /// REPLACE merge for a field with no template default: omitted and
    /// cleared both resolve to [`Setting::Absent`].
    pub fn merge_optional(self) -> Setting<T> {
        match self {
            Property::Value(v) => Setting::Value(v),
            Property::Unset | Property::Absent => Setting::Absent,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Property::Unset)
    }
}

impl<T> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Property::Value(value)
    }
}

/// A merged configuration field: structurally always present, either a value
/// or an explicit absence. Immutable after the merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Setting<T> {
    Value(T),
    Absent,
}

impl<T> Setting<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Setting::Value(v) => Some(v),
            Setting::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Setting::Absent)
    }

    /// True only when the field holds exactly `expected`. Absent never
    /// matches.
    pub fn is(&self, expected: &T) -> bool
    where
        T: PartialEq,
    {
        self.value() == Some(expected)
    }
}

impl Setting<bool> {
    pub fn is_true(&self) -> bool {
        self.is(&true)
    }

    pub fn is_false(&self) -> bool {
        self.is(&false)
    }
}

impl<T: Serialize> Serialize for Setting<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Setting::Value(v) => v.serialize(serializer),
            Setting::Absent => serializer.serialize_none(),
        }
    }
}

/// A resource kind's organization default template.
///
/// Field policy is expressed structurally in the associated types: REPLACE
/// fields are [`Property`] in the override and [`Setting`] in the config;
/// DEEP fields are nested override records merged recursively by the
/// implementation so overriding one nested field preserves its siblings.
pub trait Template {
    type Override: Default;
    type Config;

    /// Compute the immutable merged configuration. Never fails, no side
    /// effects, computed exactly once at construction.
    fn merge(&self, overrides: Self::Override) -> Self::Config;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_falls_back_to_template() {
        let p: Property<bool> = Property::Unset;
        assert_eq!(p.merge(true), Setting::Value(true));
    }

    #[test]
    fn explicit_clear_overrides_the_default() {
        let p: Property<bool> = Property::Absent;
        assert_eq!(p.merge(true), Setting::Absent);
        assert!(p.merge(true).is_absent());
    }

    #[test]
    fn explicit_value_wins() {
        let p = Property::Value(false);
        assert_eq!(p.merge(true), Setting::Value(false));
    }

    #[test]
    fn optional_merge_treats_unset_and_cleared_alike() {
        assert!(Property::<String>::Unset.merge_optional().is_absent());
        assert!(Property::<String>::Absent.merge_optional().is_absent());
        assert_eq!(
            Property::Value("key".to_string()).merge_optional(),
            Setting::Value("key".to_string())
        );
    }

    #[test]
    fn absent_never_matches_a_value() {
        let s: Setting<bool> = Setting::Absent;
        assert!(!s.is_true());
        assert!(!s.is_false());
    }

    #[test]
    fn settings_serialize_as_value_or_null() {
        #[derive(Serialize)]
        struct Snapshot {
            on: Setting<bool>,
            off: Setting<bool>,
        }
        let text = serde_json::to_string(&Snapshot {
            on: Setting::Value(true),
            off: Setting::Absent,
        })
        .unwrap();
        assert_eq!(text, r#"{"on":true,"off":null}"#);
    }
}
