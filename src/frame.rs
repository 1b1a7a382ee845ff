//! Frame schemas: named n-ary relations between concepts.
//!
//! Every variable of a [`FrameSchema`] carries a [`RoleTag`] and the [`Concept`] its
//! argument must satisfy. Schemas are combined with [`FrameSchema::intersect`] (or `&`),
//! which narrows shared variables and keeps the others.
//!
//! Subsumption between schemas is a matter of provenance. Each schema is given a
//! fresh identity when it is built and records in its ancestry the identities of every
//! schema it was combined from. `a.is_subframe_of(b)` holds when `a` descends from
//! everything `b` descends from, so schemas with the same shape that were built
//! independently are unrelated.

use roaring::RoaringTreemap;

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::ops;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::concept::Concept;
use crate::error::{FramelogicError, Result};

// ------------- Identity -------------
pub type FrameId = u64;

pub const GENESIS: FrameId = 0;

static LOWER_BOUND: AtomicU64 = AtomicU64::new(GENESIS);

fn generate() -> FrameId {
    LOWER_BOUND.fetch_add(1, Ordering::Relaxed) + 1
}

// ------------- Role -------------
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleTag {
    Initiator,
    Receiver,
    Controller,
    Managed,
    Gateway,
    Timestamp,
    Node,
    /// Any other role, compared by its label.
    Custom(String),
}
impl RoleTag {
    pub fn label(&self) -> &str {
        match self {
            RoleTag::Initiator => "Initiator",
            RoleTag::Receiver => "Receiver",
            RoleTag::Controller => "Controller",
            RoleTag::Managed => "Managed",
            RoleTag::Gateway => "Gateway",
            RoleTag::Timestamp => "Timestamp",
            RoleTag::Node => "Node",
            RoleTag::Custom(label) => label,
        }
    }
}
impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ------------- Slot -------------
/// What a frame variable requires of its argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    role: RoleTag,
    concept: Concept,
}
impl Slot {
    pub fn new(role: RoleTag, concept: Concept) -> Self {
        Self { role, concept }
    }
    pub fn role(&self) -> &RoleTag {
        &self.role
    }
    pub fn concept(&self) -> &Concept {
        &self.concept
    }
}

// ------------- FrameSchema -------------
#[derive(Clone, Debug)]
pub struct FrameSchema {
    id: FrameId,
    name: String,
    slots: BTreeMap<String, Slot>,
    ancestry: RoaringTreemap,
}

impl FrameSchema {
    /// A new schema from `(variable, role, concept)` triples. A later triple for the
    /// same variable replaces an earlier one.
    pub fn new<S, V, I>(name: S, slots: I) -> Self
    where
        S: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (V, RoleTag, Concept)>,
    {
        let slots = slots
            .into_iter()
            .map(|(variable, role, concept)| (variable.into(), Slot::new(role, concept)))
            .collect();
        Self::assemble(name.into(), slots, RoaringTreemap::new())
    }
    fn assemble(name: String, slots: BTreeMap<String, Slot>, mut ancestry: RoaringTreemap) -> Self {
        let id = generate();
        ancestry.insert(id);
        Self {
            id,
            name,
            slots,
            ancestry,
        }
    }
    pub fn id(&self) -> FrameId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn slots(&self) -> &BTreeMap<String, Slot> {
        &self.slots
    }
    pub fn slot(&self, variable: &str) -> Option<&Slot> {
        self.slots.get(variable)
    }
    pub fn variables(&self) -> Vec<&str> {
        self.slots.keys().map(String::as_str).collect()
    }
    pub fn ancestry(&self) -> &RoaringTreemap {
        &self.ancestry
    }
    /// Conjunction of two schemas. Shared variables must play the same role and have
    /// their concepts conjoined; the result descends from both operands.
    pub fn intersect<S: Into<String>>(&self, other: &FrameSchema, name: S) -> Result<FrameSchema> {
        let mut slots = self.slots.clone();
        for (variable, slot) in &other.slots {
            match slots.entry(variable.clone()) {
                Entry::Vacant(e) => {
                    e.insert(slot.clone());
                }
                Entry::Occupied(mut e) => {
                    if e.get().role != slot.role {
                        debug!(left = %self.name, right = %other.name, %variable, "role conflict");
                        return Err(FramelogicError::RoleConflict {
                            variable: variable.clone(),
                            left: e.get().role.to_string(),
                            right: slot.role.to_string(),
                        });
                    }
                    let narrowed = (&e.get().concept & &slot.concept)?;
                    e.get_mut().concept = narrowed;
                }
            }
        }
        let schema = Self::assemble(name.into(), slots, &self.ancestry | &other.ancestry);
        debug!(
            name = %schema.name,
            id = schema.id,
            variables = schema.slots.len(),
            ancestors = schema.ancestry.len(),
            "frame conjunction"
        );
        Ok(schema)
    }
    pub fn is_subframe_of(&self, other: &FrameSchema) -> bool {
        other.ancestry.is_subset(&self.ancestry)
    }
}

// identity, not shape
impl PartialEq for FrameSchema {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for FrameSchema {}

impl ops::BitAnd for &FrameSchema {
    type Output = Result<FrameSchema>;
    fn bitand(self, other: &FrameSchema) -> Result<FrameSchema> {
        self.intersect(other, format!("({}^{})", self.name, other.name))
    }
}

impl fmt::Display for FrameSchema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        for (variable, slot) in &self.slots {
            s += &format!("{}->{}:{}, ", slot.role, variable, slot.concept.name());
        }
        s.truncate(s.len().saturating_sub(2));
        write!(f, "Frame[{}]({})", self.name, s)
    }
}
