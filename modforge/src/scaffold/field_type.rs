//! Field descriptors and the raw-type normalizer
//!
//! Catalog columns arrive loosely typed (`varchar(60)`, `DECIMAL(10, 2)`,
//! `int unsigned`, `timestamp without time zone`). This module reduces them to
//! a [`FieldDescriptor`] over a closed set of semantic types.
//!
//! # Type families
//!
//! | raw keyword                           | semantic type | default      |
//! |---------------------------------------|---------------|--------------|
//! | `varchar`, `char`, `text`, `blob`     | `string`      | `''`         |
//! | `int`, `integer`, `bigint`            | `integer`     | `0`          |
//! | `float`, `double`, `decimal`, `numeric` | `real`      | `0`          |
//! | `bit`, `tinyint`, `bool`, `boolean`   | `boolean`     | `false`      |
//! | `timestamp`, `date`, `datetime`       | `timestamp`   | `null`       |
//!
//! Any other keyword is rejected with [`ScaffoldError::UnmappedType`].

use crate::error::{Result, ScaffoldError};
use crate::schema::RawColumn;
use std::fmt;

/// Columns every table carries; excluded from mutable and validation listings
pub const COMMON_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", "deleted_at"];

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    /// Character or binary data
    String,
    /// Whole number
    Integer,
    /// Floating point or fixed precision number
    Real,
    /// Flag
    Boolean,
    /// Date or point in time
    Timestamp,
}

/// Default value of a field, rendered later to a literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// String literal
    String(String),
    /// Boolean literal
    Boolean(bool),
    /// Null literal
    Null,
    /// Numeric zero
    Zero,
}

/// Normalized, semantically typed representation of one table column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column name
    pub name: String,
    /// Semantic type
    pub semantic_type: SemanticType,
    /// Whether the column accepts null
    pub nullable: bool,
    /// Length for strings, total digit count for reals, `0` otherwise
    pub max_length: u32,
    /// Decimal digits for reals, `0` otherwise
    pub precision: u32,
    /// Default value chosen by type family
    pub default_value: DefaultValue,
}

impl SemanticType {
    /// Look up the semantic type for a lower-cased raw type keyword
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "varchar" | "char" | "text" | "blob" => Some(Self::String),
            "int" | "integer" | "bigint" => Some(Self::Integer),
            "float" | "double" | "decimal" | "numeric" => Some(Self::Real),
            "bit" | "tinyint" | "bool" | "boolean" => Some(Self::Boolean),
            "timestamp" | "date" | "datetime" => Some(Self::Timestamp),
            _ => None,
        }
    }

    /// Default value for this type family
    #[must_use]
    pub fn default_value(self) -> DefaultValue {
        match self {
            Self::String => DefaultValue::String(String::new()),
            Self::Integer | Self::Real => DefaultValue::Zero,
            Self::Boolean => DefaultValue::Boolean(false),
            Self::Timestamp => DefaultValue::Null,
        }
    }

    /// Type spelling used in generated property declarations
    #[must_use]
    pub const fn declared_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "int",
            Self::Real => "float",
            Self::Boolean => "bool",
            Self::Timestamp => "Carbon",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Real => write!(f, "real"),
            Self::Boolean => write!(f, "boolean"),
            Self::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl DefaultValue {
    /// Render the value as a source literal
    ///
    /// Strings are single-quoted without escaping embedded quotes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use modforge::DefaultValue;
    /// assert_eq!(DefaultValue::Boolean(true).to_literal(), "true");
    /// assert_eq!(DefaultValue::Null.to_literal(), "null");
    /// assert_eq!(DefaultValue::String("x".into()).to_literal(), "'x'");
    /// assert_eq!(DefaultValue::Zero.to_literal(), "0");
    /// ```
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            Self::Boolean(value) => value.to_string(),
            Self::Null => "null".to_string(),
            Self::String(value) => format!("'{value}'"),
            Self::Zero => "0".to_string(),
        }
    }
}

impl FieldDescriptor {
    /// Whether the field belongs to [`COMMON_FIELDS`]
    #[must_use]
    pub fn is_common(&self) -> bool {
        COMMON_FIELDS.contains(&self.name.as_str())
    }

    /// Build a descriptor from one catalog column
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::UnmappedType`] if the type keyword has no
    /// semantic mapping.
    pub fn from_column(column: &RawColumn) -> Result<Self> {
        let keyword = type_keyword(&column.type_string);
        let semantic_type =
            SemanticType::from_keyword(&keyword).ok_or_else(|| ScaffoldError::UnmappedType {
                column: column.name.clone(),
                raw_type: column.type_string.clone(),
            })?;
        let (max_length, precision) = match (semantic_type, parse_size(&column.type_string)) {
            (SemanticType::String, (length, _)) => (length, 0),
            (SemanticType::Real, size) => size,
            _ => (0, 0),
        };

        Ok(Self {
            name: column.name.clone(),
            semantic_type,
            nullable: column.nullable,
            max_length,
            precision,
            default_value: semantic_type.default_value(),
        })
    }
}

/// Normalize catalog columns into field descriptors, preserving order
///
/// # Errors
///
/// Fails on the first column whose type has no semantic mapping.
pub fn normalize(columns: &[RawColumn]) -> Result<Vec<FieldDescriptor>> {
    columns.iter().map(FieldDescriptor::from_column).collect()
}

/// Lower-cased type keyword: the text before any size suffix or modifier
fn type_keyword(raw: &str) -> String {
    raw.trim()
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Parse `(a,b)` into `(max_length, precision)`
///
/// Only the first parenthesis pair counts. Missing or unparsable components are `0`.
fn parse_size(raw: &str) -> (u32, u32) {
    let Some(inner) = raw
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map(|(inner, _)| inner)
    else {
        return (0, 0);
    };

    let mut parts = inner.split(',').map(|part| part.trim().parse::<u32>().unwrap_or(0));
    let max_length = parts.next().unwrap_or(0);
    let precision = parts.next().unwrap_or(0);
    (max_length, precision)
}
