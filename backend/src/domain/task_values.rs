//! Translation between task priority/status labels and their persisted codes.
//!
//! Labels are the external representation (`"LOW"`, `"PENDING"`, ...); codes
//! are the compact integers stored in the `tasks` table. Encoding rejects
//! unknown labels. Decoding is total over every code that encoding can
//! produce, so a failure there means the store holds data this service never
//! wrote.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sentinel status filter label meaning "no status predicate".
pub const ALL_STATUSES: &str = "ALL";

/// Label that is not part of a closed value set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value: {label}")]
pub struct InvalidDomainValue {
    /// Which value set rejected the label (`priority` or `status`).
    pub kind: &'static str,
    /// The rejected label.
    pub label: String,
}

/// Persisted code outside a closed value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code {code} in store")]
pub struct UnknownDomainCode {
    pub kind: &'static str,
    pub code: i32,
}

macro_rules! closed_value_set {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident {
            $( $variant:ident => ($label:literal, $code:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            /// Every member, in code order.
            pub const ALL: &'static [Self] = &[$( Self::$variant, )+];

            /// External label.
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            /// Persisted integer code.
            pub fn code(self) -> i32 {
                match self {
                    $( Self::$variant => $code, )+
                }
            }

            /// Decode a persisted code.
            pub fn from_code(code: i32) -> Result<Self, UnknownDomainCode> {
                match code {
                    $( $code => Ok(Self::$variant), )+
                    _ => Err(UnknownDomainCode { kind: $kind, code }),
                }
            }

            /// Encode an external label. Empty or missing labels take the
            /// lowest member.
            pub fn from_optional_label(label: Option<&str>) -> Result<Self, InvalidDomainValue> {
                match label {
                    None => Ok(Self::$default),
                    Some(raw) if raw.is_empty() => Ok(Self::$default),
                    Some(raw) => raw.parse(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl FromStr for $name {
            type Err = InvalidDomainValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $label => Ok(Self::$variant), )+
                    other => Err(InvalidDomainValue {
                        kind: $kind,
                        label: other.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

closed_value_set! {
    /// Task urgency.
    TaskPriority, "priority", default = Low {
        Low => ("LOW", 1),
        Medium => ("MEDIUM", 2),
        High => ("HIGH", 3),
    }
}

closed_value_set! {
    /// Task completion state.
    TaskStatus, "status", default = Pending {
        Pending => ("PENDING", 1),
        Completed => ("COMPLETED", 2),
    }
}

/// Status predicate for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// Parse a filter label; empty means [`StatusFilter::All`].
    ///
    /// # Examples
    /// ```
    /// use taskboard::domain::{StatusFilter, TaskStatus};
    ///
    /// assert_eq!(StatusFilter::parse("").unwrap(), StatusFilter::All);
    /// assert_eq!(StatusFilter::parse("ALL").unwrap(), StatusFilter::All);
    /// assert_eq!(
    ///     StatusFilter::parse("COMPLETED").unwrap(),
    ///     StatusFilter::Only(TaskStatus::Completed)
    /// );
    /// assert!(StatusFilter::parse("DONE").is_err());
    /// ```
    pub fn parse(label: &str) -> Result<Self, InvalidDomainValue> {
        if label.is_empty() || label == ALL_STATUSES {
            return Ok(Self::All);
        }
        label.parse().map(Self::Only)
    }

    /// Status to filter on, or `None` when no predicate applies.
    pub fn status(self) -> Option<TaskStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }

    /// Encoded status code, or `None` when no predicate applies.
    pub fn code(self) -> Option<i32> {
        self.status().map(TaskStatus::code)
    }
}
