//! Value-level predicates over a single scalar.
//!
//! A [`Constraint`] is one of three kinds: a closed numeric [`Interval`], an
//! enumerated [`ValueSet`], or `Unconstrained`. They are ordered by
//! [`Constraint::implies`], with `Unconstrained` on top, and [`Constraint::intersect`]
//! is the meet of that order.
//!
//! Only direct construction is validated. An intersection may produce an inverted
//! interval or an empty set, both of which denote the bottom constraint that
//! accepts no value at all.

use bigdecimal::BigDecimal;

use std::cmp::{max, min};
use std::collections::HashSet;
use std::fmt;

use crate::datatype::{OtherHasher, Value};
use crate::error::{FramelogicError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    min: BigDecimal,
    max: BigDecimal,
}
impl Interval {
    pub fn min(&self) -> &BigDecimal {
        &self.min
    }
    pub fn max(&self) -> &BigDecimal {
        &self.max
    }
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
    pub fn contains(&self, n: &BigDecimal) -> bool {
        &self.min <= n && n <= &self.max
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueSet {
    values: HashSet<Value, OtherHasher>,
}
impl ValueSet {
    pub fn values(&self) -> &HashSet<Value, OtherHasher> {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(value)
    }
    // sorted, so that printed forms are stable
    pub fn sorted(&self) -> Vec<&Value> {
        let mut values: Vec<&Value> = self.values.iter().collect();
        values.sort_unstable();
        values
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    Range(Interval),
    Enumeration(ValueSet),
    Unconstrained,
}

impl Constraint {
    /// A closed numeric range `[min, max]`. Fails with `InvalidRange` when `min > max`.
    pub fn range<L: Into<BigDecimal>, H: Into<BigDecimal>>(min: L, max: H) -> Result<Self> {
        let (min, max) = (min.into(), max.into());
        if min > max {
            return Err(FramelogicError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Constraint::Range(Interval { min, max }))
    }
    /// A set of allowed values. Fails with `EmptyEnumeration` when no value is given.
    pub fn enumeration<I, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: HashSet<Value, OtherHasher> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(FramelogicError::EmptyEnumeration);
        }
        Ok(Constraint::Enumeration(ValueSet { values }))
    }
    pub fn unconstrained() -> Self {
        Constraint::Unconstrained
    }
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::Range(_) => "Range",
            Constraint::Enumeration(_) => "Enumeration",
            Constraint::Unconstrained => "Unconstrained",
        }
    }
    /// True for the bottom constraints an intersection can produce.
    pub fn is_empty(&self) -> bool {
        match self {
            Constraint::Range(interval) => interval.is_empty(),
            Constraint::Enumeration(set) => set.is_empty(),
            Constraint::Unconstrained => false,
        }
    }
    // Type mismatches are not errors, they simply do not satisfy the constraint.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Constraint::Range(interval) => value.as_number().is_some_and(|n| interval.contains(n)),
            Constraint::Enumeration(set) => set.contains(value),
            Constraint::Unconstrained => true,
        }
    }
    /// True when `self` is at least as strict as `other`.
    pub fn implies(&self, other: &Constraint) -> bool {
        match (self, other) {
            (_, Constraint::Unconstrained) => true,
            (Constraint::Range(a), Constraint::Range(b)) => a.min >= b.min && a.max <= b.max,
            (Constraint::Enumeration(a), Constraint::Enumeration(b)) => a.values.is_subset(&b.values),
            _ => false,
        }
    }
    pub fn intersect(&self, other: &Constraint) -> Result<Constraint> {
        match (self, other) {
            (Constraint::Unconstrained, c) | (c, Constraint::Unconstrained) => Ok(c.clone()),
            (Constraint::Range(a), Constraint::Range(b)) => Ok(Constraint::Range(Interval {
                min: max(&a.min, &b.min).clone(),
                max: min(&a.max, &b.max).clone(),
            })),
            (Constraint::Enumeration(a), Constraint::Enumeration(b)) => {
                Ok(Constraint::Enumeration(ValueSet {
                    values: a.values.intersection(&b.values).cloned().collect(),
                }))
            }
            (left, right) => Err(FramelogicError::IncompatibleConstraintKinds {
                left: left.kind(),
                right: right.kind(),
            }),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Constraint::Range(interval) => write!(f, "[{}..{}]", interval.min, interval.max),
            Constraint::Enumeration(set) => {
                let mut s = String::new();
                for value in set.sorted() {
                    s += &(value.to_string() + ", ");
                }
                s.truncate(s.len().saturating_sub(2));
                write!(f, "In{{{}}}", s)
            }
            Constraint::Unconstrained => write!(f, "Any"),
        }
    }
}
