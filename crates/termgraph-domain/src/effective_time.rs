//! Effective time - the publication date stamped on every release row

use chrono::NaiveDate;
use std::fmt;

/// RF2 date format (`20240131`)
const RF2_DATE_FORMAT: &str = "%Y%m%d";

/// Publication state of a row
///
/// Variant order gives the total order used for supersession: every
/// published date sorts before `Unpublished`, so an unpublished edit is
/// always "later" than anything already released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectiveTime {
    /// Released on the given date
    Published(NaiveDate),

    /// Not yet released (empty column); mutable and discardable
    Unpublished,
}

impl EffectiveTime {
    /// Parse an effective time column; the empty string means unpublished
    ///
    /// # Examples
    ///
    /// ```
    /// use termgraph_domain::EffectiveTime;
    ///
    /// let t = EffectiveTime::parse("20200131").unwrap();
    /// assert!(t.is_published());
    /// assert!(EffectiveTime::parse("").unwrap() > t);
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Ok(EffectiveTime::Unpublished);
        }
        if s.len() != 8 {
            return Err(format!("Invalid effective time '{}': expected YYYYMMDD", s));
        }
        NaiveDate::parse_from_str(s, RF2_DATE_FORMAT)
            .map(EffectiveTime::Published)
            .map_err(|e| format!("Invalid effective time '{}': {}", s, e))
    }

    /// Whether the row has been released
    pub fn is_published(&self) -> bool {
        matches!(self, EffectiveTime::Published(_))
    }

    /// Publication date, if released
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            EffectiveTime::Published(date) => Some(*date),
            EffectiveTime::Unpublished => None,
        }
    }

    /// Column text as written back into a release file
    pub fn to_rf2(&self) -> String {
        match self {
            EffectiveTime::Published(date) => date.format(RF2_DATE_FORMAT).to_string(),
            EffectiveTime::Unpublished => String::new(),
        }
    }
}

impl fmt::Display for EffectiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectiveTime::Published(date) => write!(f, "{}", date.format(RF2_DATE_FORMAT)),
            EffectiveTime::Unpublished => f.write_str("<unpublished>"),
        }
    }
}
