//! Classification predicates over attribute data.
//!
//! An [`AtomicConcept`] constrains a single named attribute. A [`CompositeConcept`]
//! is a named conjunction of atomic concepts, keyed by the attribute each of them
//! constrains. Both are wrapped by [`Concept`], which provides checking of data,
//! structural subsumption and conjunction (also available as `&`).

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::ops;

use tracing::{debug, trace};

use crate::constraint::Constraint;
use crate::datatype::{Attributes, Value};
use crate::error::Result;

// ------------- Atomic -------------
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomicConcept {
    attribute: String,
    constraint: Constraint,
}
impl AtomicConcept {
    pub fn new<S: Into<String>>(attribute: S, constraint: Constraint) -> Self {
        Self {
            attribute: attribute.into(),
            constraint,
        }
    }
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }
    pub fn check_value(&self, value: &Value) -> bool {
        self.constraint.check(value)
    }
    // a missing attribute fails the constraint
    pub fn check(&self, data: &Attributes) -> bool {
        data.get(&self.attribute)
            .is_some_and(|value| self.constraint.check(value))
    }
}
impl fmt::Display for AtomicConcept {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Atom({}: {})", self.attribute, self.constraint)
    }
}

// ------------- Composite -------------
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeConcept {
    name: String,
    attributes: BTreeMap<String, AtomicConcept>,
}
impl CompositeConcept {
    /// Keys every atom by the attribute it constrains. A later atom for the same
    /// attribute replaces an earlier one.
    pub fn new<S, I>(name: S, atoms: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = AtomicConcept>,
    {
        let attributes = atoms
            .into_iter()
            .map(|atom| (atom.attribute.clone(), atom))
            .collect();
        Self {
            name: name.into(),
            attributes,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn attributes(&self) -> &BTreeMap<String, AtomicConcept> {
        &self.attributes
    }
    pub fn attribute(&self, attribute: &str) -> Option<&AtomicConcept> {
        self.attributes.get(attribute)
    }
    pub fn len(&self) -> usize {
        self.attributes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
    // Attributes in the data that the concept does not mention are ignored.
    pub fn check(&self, data: &Attributes) -> bool {
        self.attributes.values().all(|atom| atom.check(data))
    }
}
impl fmt::Display for CompositeConcept {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        for atom in self.attributes.values() {
            s += &(atom.to_string() + ", ");
        }
        s.truncate(s.len().saturating_sub(2));
        write!(f, "Concept[{}]({})", self.name, s)
    }
}

// ------------- Concept -------------
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Concept {
    Atomic(AtomicConcept),
    Composite(CompositeConcept),
}

impl Concept {
    pub fn atomic<S: Into<String>>(attribute: S, constraint: Constraint) -> Self {
        Concept::Atomic(AtomicConcept::new(attribute, constraint))
    }
    pub fn composite<S, I>(name: S, atoms: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = AtomicConcept>,
    {
        Concept::Composite(CompositeConcept::new(name, atoms))
    }
    /// The attribute name of an atomic concept, the given name of a composite one.
    pub fn name(&self) -> &str {
        match self {
            Concept::Atomic(atom) => &atom.attribute,
            Concept::Composite(composite) => &composite.name,
        }
    }
    /// Renames the concept. An atomic concept is named by its attribute, so it is
    /// turned into a composite of that single atom, which checks the same data.
    pub fn with_name<S: Into<String>>(self, name: S) -> Self {
        match self {
            Concept::Atomic(atom) => Concept::composite(name, [atom]),
            Concept::Composite(composite) => Concept::Composite(CompositeConcept {
                name: name.into(),
                ..composite
            }),
        }
    }
    fn atoms(&self) -> Vec<&AtomicConcept> {
        match self {
            Concept::Atomic(atom) => vec![atom],
            Concept::Composite(composite) => composite.attributes.values().collect(),
        }
    }
    pub fn check(&self, data: &Attributes) -> bool {
        match self {
            Concept::Atomic(atom) => atom.check(data),
            Concept::Composite(composite) => composite.check(data),
        }
    }
    /// Structural subsumption: more (or narrower) constraints make a subconcept.
    pub fn is_subconcept_of(&self, other: &Concept) -> bool {
        match (self, other) {
            (Concept::Atomic(a), Concept::Atomic(b)) => {
                a.attribute == b.attribute && a.constraint.implies(&b.constraint)
            }
            // only a composite of exactly that one attribute compares with an atom
            (Concept::Composite(c), Concept::Atomic(b)) => {
                c.len() == 1
                    && c.attribute(&b.attribute)
                        .is_some_and(|a| a.constraint.implies(&b.constraint))
            }
            (Concept::Atomic(a), Concept::Composite(c)) => {
                c.len() == 1
                    && c.attribute(&a.attribute)
                        .is_some_and(|b| a.constraint.implies(&b.constraint))
            }
            (Concept::Composite(c), Concept::Composite(d)) => d.attributes.iter().all(|(key, b)| {
                c.attribute(key)
                    .is_some_and(|a| a.constraint.implies(&b.constraint))
            }),
        }
    }
    /// Conjunction of two concepts. Attributes found in both have their constraints
    /// intersected, the others are copied. The result is always a composite.
    pub fn intersect<S: Into<String>>(&self, other: &Concept, name: S) -> Result<Concept> {
        let mut attributes: BTreeMap<String, AtomicConcept> = self
            .atoms()
            .into_iter()
            .map(|atom| (atom.attribute.clone(), atom.clone()))
            .collect();
        for atom in other.atoms() {
            match attributes.entry(atom.attribute.clone()) {
                Entry::Vacant(e) => {
                    e.insert(atom.clone());
                }
                Entry::Occupied(mut e) => {
                    let narrowed = e
                        .get()
                        .constraint
                        .intersect(&atom.constraint)
                        .inspect_err(|err| {
                            debug!(left = %self.name(), right = %other.name(), attribute = %atom.attribute, %err, "concept conjunction failed")
                        })?;
                    e.get_mut().constraint = narrowed;
                }
            }
        }
        let name = name.into();
        trace!(%name, attributes = attributes.len(), "concept conjunction");
        Ok(Concept::Composite(CompositeConcept { name, attributes }))
    }
}

/// `(a^b)` for differently named operands, otherwise the shared name.
pub(crate) fn conjunction_name(left: &str, right: &str) -> String {
    if left == right {
        left.to_owned()
    } else {
        format!("({}^{})", left, right)
    }
}

impl ops::BitAnd for &Concept {
    type Output = Result<Concept>;
    fn bitand(self, other: &Concept) -> Result<Concept> {
        self.intersect(other, conjunction_name(self.name(), other.name()))
    }
}

impl From<AtomicConcept> for Concept {
    fn from(atom: AtomicConcept) -> Self {
        Concept::Atomic(atom)
    }
}
impl From<CompositeConcept> for Concept {
    fn from(composite: CompositeConcept) -> Self {
        Concept::Composite(composite)
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Concept::Atomic(atom) => fmt::Display::fmt(atom, f),
            Concept::Composite(composite) => fmt::Display::fmt(composite, f),
        }
    }
}
