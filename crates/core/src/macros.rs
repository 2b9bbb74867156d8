//! Helper macro for the canonical string-backed workflow enums.
//!
//! Roles, review statuses and production stages are stored as TEXT and
//! travel as SCREAMING_SNAKE_CASE strings. Parsing is case-insensitive and
//! treats `-` and spaces as `_`, so `"Script Writer"`, `"script-writer"` and
//! `"SCRIPT_WRITER"` all resolve to the same variant. Parse once at the
//! boundary and use the enum everywhere else.

/// Normalize a raw label for comparison against canonical names.
pub(crate) fn normalize_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

macro_rules! define_workflow_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $entity:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical SCREAMING_SNAKE_CASE name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let normalized = $crate::macros::normalize_label(raw);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == normalized)
                    .ok_or_else(|| {
                        $crate::error::CoreError::Validation(format!(
                            "Invalid {} '{raw}'. Must be one of: {}",
                            $entity,
                            $name::ALL
                                .iter()
                                .map(|v| v.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        ))
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }
    };
}

pub(crate) use define_workflow_enum;
