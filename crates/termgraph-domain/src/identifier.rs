//! Identifier module - SCTIDs and their partition/check-digit scheme

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shortest legal SCTID: 3-digit item, 2-digit partition, check digit
const MIN_LENGTH: usize = 6;
const MAX_LENGTH: usize = 18;
/// Extension partitions embed a 7-digit namespace before the partition
const MIN_EXTENSION_LENGTH: usize = 11;

const VERHOEFF_D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const VERHOEFF_P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

const VERHOEFF_INV: [u8; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

/// Errors raised when text does not form a structurally valid SCTID
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Empty identifier column
    #[error("empty identifier")]
    Empty,

    /// Identifier contains something other than ASCII digits
    #[error("identifier '{0}' is not numeric")]
    NotNumeric(String),

    /// Identifier too short or too long for its partition
    #[error("identifier '{0}' has invalid length {1}")]
    Length(String, usize),

    /// Verhoeff check digit mismatch
    #[error("identifier '{0}' fails the check digit")]
    CheckDigit(String),

    /// Partition identifier is not a known component partition
    #[error("identifier '{0}' has unknown partition '{1}'")]
    Partition(String, String),

    /// Partition is valid but names a different component kind
    #[error("identifier {id} is a {actual} id, expected a {expected} id")]
    WrongKind {
        /// The offending identifier
        id: SctId,
        /// Kind required by the column
        expected: ComponentKind,
        /// Kind encoded in the partition
        actual: ComponentKind,
    },
}

/// Kind of component encoded in the final partition digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKind {
    /// Partition `00` / `10`
    Concept,
    /// Partition `01` / `11`
    Description,
    /// Partition `02` / `12`
    Relationship,
}

impl ComponentKind {
    fn partition_digit(self) -> u64 {
        match self {
            ComponentKind::Concept => 0,
            ComponentKind::Description => 1,
            ComponentKind::Relationship => 2,
        }
    }

    /// Lowercase name, as used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Concept => "concept",
            ComponentKind::Description => "description",
            ComponentKind::Relationship => "relationship",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated SNOMED CT identifier
///
/// Layout, read right to left: check digit, partition identifier (two digits),
/// optional 7-digit namespace, item identifier. Values are only constructed by
/// [`SctId::parse`] or [`SctId::from_parts`], so every `SctId` in the graph has
/// already passed the check-digit and partition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SctId(u64);

impl SctId {
    /// Wrap a well-known identifier. Only used for the vocabulary constants.
    pub(crate) const fn known(value: u64) -> Self {
        Self(value)
    }

    /// Parse and validate an identifier column
    ///
    /// # Examples
    ///
    /// ```
    /// use termgraph_domain::{ComponentKind, SctId};
    ///
    /// let root = SctId::parse("138875005").unwrap();
    /// assert_eq!(root.kind(), ComponentKind::Concept);
    /// assert!(SctId::parse("138875006").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        if s.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdentifierError::NotNumeric(s.to_string()));
        }
        if s.len() < MIN_LENGTH || s.len() > MAX_LENGTH || s.starts_with('0') {
            return Err(IdentifierError::Length(s.to_string(), s.len()));
        }

        let bytes = s.as_bytes();
        let partition = &s[s.len() - 3..s.len() - 1];
        let (namespace_flag, kind_digit) = (bytes[s.len() - 3] - b'0', bytes[s.len() - 2] - b'0');
        if namespace_flag > 1 || kind_digit > 2 {
            return Err(IdentifierError::Partition(s.to_string(), partition.to_string()));
        }
        if namespace_flag == 1 && s.len() < MIN_EXTENSION_LENGTH {
            return Err(IdentifierError::Length(s.to_string(), s.len()));
        }
        if !verhoeff_valid(s) {
            return Err(IdentifierError::CheckDigit(s.to_string()));
        }

        // Bounded by MAX_LENGTH digits, so this always fits in a u64
        let value = s
            .parse::<u64>()
            .map_err(|_| IdentifierError::NotNumeric(s.to_string()))?;
        Ok(Self(value))
    }

    /// Build an identifier from an item id, optional namespace and kind,
    /// computing the check digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use termgraph_domain::{ComponentKind, SctId};
    ///
    /// let id = SctId::from_parts(100, None, ComponentKind::Concept).unwrap();
    /// assert_eq!(id.to_string().len(), 6);
    /// assert_eq!(id.kind(), ComponentKind::Concept);
    /// ```
    pub fn from_parts(
        item: u64,
        namespace: Option<u32>,
        kind: ComponentKind,
    ) -> Result<Self, IdentifierError> {
        let payload = match namespace {
            Some(ns) => format!("{}{:07}1{}", item, ns, kind.partition_digit()),
            None => format!("{}0{}", item, kind.partition_digit()),
        };
        let check = verhoeff_check_digit(&payload);
        Self::parse(&format!("{}{}", payload, check))
    }

    /// Raw numeric value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Component kind encoded in the partition
    pub fn kind(&self) -> ComponentKind {
        // Partition digit is validated on construction
        match (self.0 / 10) % 10 {
            0 => ComponentKind::Concept,
            1 => ComponentKind::Description,
            _ => ComponentKind::Relationship,
        }
    }

    /// Whether the identifier carries an extension namespace
    pub fn is_extension(&self) -> bool {
        (self.0 / 100) % 10 == 1
    }

    /// Namespace identifier, for extension identifiers
    pub fn namespace(&self) -> Option<u32> {
        if self.is_extension() {
            Some(((self.0 / 1_000) % 10_000_000) as u32)
        } else {
            None
        }
    }

    /// Require the identifier to name a component of the given kind
    pub fn expect_kind(self, expected: ComponentKind) -> Result<Self, IdentifierError> {
        let actual = self.kind();
        if actual == expected {
            Ok(self)
        } else {
            Err(IdentifierError::WrongKind {
                id: self,
                expected,
                actual,
            })
        }
    }
}

impl fmt::Display for SctId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SctId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Whether a digit string (check digit last) satisfies the Verhoeff scheme
pub fn verhoeff_valid(digits: &str) -> bool {
    let mut c = 0u8;
    for (i, b) in digits.bytes().rev().enumerate() {
        if !b.is_ascii_digit() {
            return false;
        }
        c = VERHOEFF_D[c as usize][VERHOEFF_P[i % 8][(b - b'0') as usize] as usize];
    }
    c == 0
}

/// Check digit to append to a digit string
pub fn verhoeff_check_digit(payload: &str) -> u8 {
    let mut c = 0u8;
    for (i, b) in payload.bytes().rev().enumerate() {
        let digit = b.wrapping_sub(b'0') % 10;
        c = VERHOEFF_D[c as usize][VERHOEFF_P[(i + 1) % 8][digit as usize] as usize];
    }
    VERHOEFF_INV[c as usize]
}
