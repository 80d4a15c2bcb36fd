//! Relationship module - attribute/value edges from a source concept

use crate::traits::SemanticEquals;
use crate::vocabulary::IS_A;
use crate::{CharacteristicType, EffectiveTime, Modifier, SctId};
use std::fmt;

/// Literal value of a concrete-domain attribute
///
/// Decimals keep their lexical form so that equality is exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConcreteValue {
    /// `#12`
    Integer(i64),
    /// `#0.5`
    Decimal(String),
    /// `"text"`
    Text(String),
}

impl ConcreteValue {
    /// Parse a value column (`#5`, `#2.5`, `"mg"`)
    ///
    /// # Examples
    ///
    /// ```
    /// use termgraph_domain::ConcreteValue;
    ///
    /// assert_eq!(ConcreteValue::parse("#250").unwrap(), ConcreteValue::Integer(250));
    /// assert_eq!(ConcreteValue::parse("\"mg\"").unwrap(), ConcreteValue::Text("mg".into()));
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        if let Some(number) = s.strip_prefix('#') {
            if let Ok(value) = number.parse::<i64>() {
                return Ok(ConcreteValue::Integer(value));
            }
            if number.parse::<f64>().is_ok() {
                return Ok(ConcreteValue::Decimal(number.to_string()));
            }
            return Err(format!("Invalid numeric value '{}'", s));
        }
        if let Some(text) = s.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
            return Ok(ConcreteValue::Text(text.to_string()));
        }
        Err(format!("Invalid concrete value '{}'", s))
    }

    /// Column text as written back into a release file
    pub fn to_rf2(&self) -> String {
        match self {
            ConcreteValue::Integer(value) => format!("#{}", value),
            ConcreteValue::Decimal(value) => format!("#{}", value),
            ConcreteValue::Text(value) => format!("\"{}\"", value),
        }
    }
}

/// Destination of a relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipTarget {
    /// Another concept
    Concept(SctId),
    /// A concrete literal
    Value(ConcreteValue),
}

impl fmt::Display for RelationshipTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipTarget::Concept(id) => write!(f, "{}", id),
            RelationshipTarget::Value(value) => f.write_str(&value.to_rf2()),
        }
    }
}

/// A relationship row
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Identifier; `None` for a relationship not yet persisted
    pub id: Option<SctId>,

    /// Publication state
    pub effective_time: EffectiveTime,

    /// Whether the relationship is current
    pub active: bool,

    /// Owning module
    pub module_id: SctId,

    /// Concept the relationship originates from
    pub source_id: SctId,

    /// Attribute type (IS-A for hierarchy edges)
    pub type_id: SctId,

    /// Destination concept or literal value
    pub target: RelationshipTarget,

    /// Role group; 0 is ungrouped
    pub group: u16,

    /// Stated, inferred or additional
    pub characteristic_type: CharacteristicType,

    /// Existential or universal restriction
    pub modifier: Modifier,
}

impl Relationship {
    /// Whether this is an IS-A edge to a concept
    pub fn is_is_a(&self) -> bool {
        self.type_id == IS_A && matches!(self.target, RelationshipTarget::Concept(_))
    }

    /// Destination concept, if the target is not a literal
    pub fn target_concept(&self) -> Option<SctId> {
        match self.target {
            RelationshipTarget::Concept(id) => Some(id),
            RelationshipTarget::Value(_) => None,
        }
    }

    /// Whether the IS-A hierarchy of this characteristic type is affected
    pub fn feeds_hierarchy(&self) -> bool {
        self.is_is_a() && self.characteristic_type.has_hierarchy()
    }
}

impl SemanticEquals for Relationship {
    /// Equal over (source, type, target-or-value, group, characteristic type, active),
    /// never over id
    fn semantic_equals(&self, other: &Self) -> bool {
        self.source_id == other.source_id
            && self.type_id == other.type_id
            && self.target == other.target
            && self.group == other.group
            && self.characteristic_type == other.characteristic_type
            && self.active == other.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::CORE_MODULE;

    fn relationship(id: &str, target: &str) -> Relationship {
        Relationship {
            id: Some(SctId::parse(id).unwrap()),
            effective_time: EffectiveTime::Unpublished,
            active: true,
            module_id: CORE_MODULE,
            source_id: SctId::parse("1000004").unwrap(),
            type_id: IS_A,
            target: RelationshipTarget::Concept(SctId::parse(target).unwrap()),
            group: 0,
            characteristic_type: CharacteristicType::Stated,
            modifier: Modifier::Existential,
        }
    }

    #[test]
    fn test_semantic_equality_ignores_id() {
        let a = relationship("1000027", "2000001");
        let b = relationship("2000029", "2000001");
        assert_ne!(a, b);
        assert!(a.semantic_equals(&b));
    }

    #[test]
    fn test_semantic_equality_respects_tuple() {
        let a = relationship("1000027", "2000001");

        let mut other_group = a.clone();
        other_group.group = 1;
        assert!(!a.semantic_equals(&other_group));

        let mut inactive = a.clone();
        inactive.active = false;
        assert!(!a.semantic_equals(&inactive));

        let mut inferred = a.clone();
        inferred.characteristic_type = CharacteristicType::Inferred;
        assert!(!a.semantic_equals(&inferred));

        let other_target = relationship("3000022", "3000005");
        assert!(!a.semantic_equals(&other_target));
    }

    #[test]
    fn test_concrete_values() {
        assert_eq!(ConcreteValue::parse("#5").unwrap(), ConcreteValue::Integer(5));
        assert_eq!(
            ConcreteValue::parse("#0.25").unwrap(),
            ConcreteValue::Decimal("0.25".to_string())
        );
        assert!(ConcreteValue::parse("#abc").is_err());
        assert!(ConcreteValue::parse("5").is_err());
        assert_eq!(ConcreteValue::Decimal("0.25".to_string()).to_rf2(), "#0.25");
    }

    #[test]
    fn test_is_a_detection() {
        let mut rel = relationship("1000027", "2000001");
        assert!(rel.is_is_a());
        assert!(rel.feeds_hierarchy());

        rel.characteristic_type = CharacteristicType::Additional;
        assert!(rel.is_is_a());
        assert!(!rel.feeds_hierarchy());

        rel.target = RelationshipTarget::Value(ConcreteValue::Integer(1));
        assert!(!rel.is_is_a());
        assert_eq!(rel.target_concept(), None);
    }
}
