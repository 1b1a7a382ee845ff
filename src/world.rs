//! Concrete data: concept instances, frame instances and the possible worlds that own them.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::concept::Concept;
use crate::datatype::{render_attributes, Attributes, OtherHasher};
use crate::error::{FramelogicError, Result};
use crate::frame::FrameSchema;

// ------------- ConceptInstance -------------
#[derive(Debug, PartialEq, Eq)]
pub struct ConceptInstance {
    uid: String,
    data: Attributes,
}
impl ConceptInstance {
    pub fn new<S: Into<String>>(uid: S, data: Attributes) -> Self {
        Self {
            uid: uid.into(),
            data,
        }
    }
    // no setters, instances are immutable once created
    pub fn uid(&self) -> &str {
        &self.uid
    }
    pub fn data(&self) -> &Attributes {
        &self.data
    }
    pub fn is_a(&self, concept: &Concept) -> bool {
        concept.check(&self.data)
    }
}
impl fmt::Display for ConceptInstance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Inst({}, {})", self.uid, render_attributes(&self.data))
    }
}

// ------------- FrameInstance -------------
#[derive(Debug)]
pub struct FrameInstance {
    schema: Arc<FrameSchema>,
    bindings: BTreeMap<String, Arc<ConceptInstance>>,
}
impl FrameInstance {
    /// Binds every variable of the schema to an instance. This is the only place where
    /// a frame instance is validated: the bound variables must be exactly those of the
    /// schema, and each instance must satisfy the concept its variable requires.
    pub fn new<V, I>(schema: Arc<FrameSchema>, bindings: I) -> Result<Self>
    where
        V: Into<String>,
        I: IntoIterator<Item = (V, Arc<ConceptInstance>)>,
    {
        let bindings: BTreeMap<String, Arc<ConceptInstance>> = bindings
            .into_iter()
            .map(|(variable, instance)| (variable.into(), instance))
            .collect();
        let required: BTreeSet<&str> = schema.slots().keys().map(String::as_str).collect();
        let provided: BTreeSet<&str> = bindings.keys().map(String::as_str).collect();
        if required != provided {
            debug!(frame = %schema.name(), ?required, ?provided, "frame arguments mismatch");
            return Err(FramelogicError::ArgumentMismatch {
                required: required.into_iter().map(String::from).collect(),
                provided: provided.into_iter().map(String::from).collect(),
            });
        }
        for (variable, instance) in &bindings {
            // the key sets are equal, so every bound variable has a slot
            let Some(slot) = schema.slot(variable) else { continue };
            if !instance.is_a(slot.concept()) {
                debug!(frame = %schema.name(), %variable, uid = %instance.uid(), "argument violates type");
                return Err(FramelogicError::TypeViolation {
                    variable: variable.clone(),
                    uid: instance.uid().to_owned(),
                    concept: slot.concept().name().to_owned(),
                });
            }
        }
        Ok(Self { schema, bindings })
    }
    pub fn schema(&self) -> &FrameSchema {
        &self.schema
    }
    pub fn bindings(&self) -> &BTreeMap<String, Arc<ConceptInstance>> {
        &self.bindings
    }
    pub fn binding(&self, variable: &str) -> Option<Arc<ConceptInstance>> {
        self.bindings.get(variable).map(Arc::clone)
    }
    pub fn is_instance_of(&self, target: &FrameSchema) -> bool {
        self.schema.is_subframe_of(target)
    }
}
impl fmt::Display for FrameInstance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        for (variable, instance) in &self.bindings {
            if let Some(slot) = self.schema.slot(variable) {
                s += &format!("{}->{}:{}, ", slot.role(), instance.uid(), slot.concept().name());
            }
        }
        s.truncate(s.len().saturating_sub(2));
        write!(f, "FrameInstance[{}]({})", self.schema.name(), s)
    }
}

// ------------- PossibleWorld -------------
#[derive(Debug)]
pub struct PossibleWorld {
    name: String,
    // insertion order is kept, the lookup finds the position of a uid
    kept: Vec<Arc<ConceptInstance>>,
    lookup: HashMap<String, usize, OtherHasher>,
    frames: Vec<FrameInstance>,
}

impl PossibleWorld {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kept: Vec::new(),
            lookup: HashMap::default(),
            frames: Vec::new(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Adds an instance, replacing any earlier instance with the same uid in place.
    pub fn add_concept<S: Into<String>>(&mut self, uid: S, data: Attributes) -> &mut Self {
        let instance = Arc::new(ConceptInstance::new(uid, data));
        match self.lookup.get(instance.uid()) {
            Some(&position) => {
                trace!(world = %self.name, uid = %instance.uid(), "concept instance replaced");
                self.kept[position] = instance;
            }
            None => {
                trace!(world = %self.name, uid = %instance.uid(), "concept instance added");
                self.lookup.insert(instance.uid().to_owned(), self.kept.len());
                self.kept.push(instance);
            }
        }
        self
    }
    pub fn add_frame(&mut self, frame: FrameInstance) -> &mut Self {
        trace!(world = %self.name, frame = %frame.schema().name(), "frame instance added");
        self.frames.push(frame);
        self
    }
    pub fn get_concept(&self, uid: &str) -> Option<Arc<ConceptInstance>> {
        self.lookup
            .get(uid)
            .map(|&position| Arc::clone(&self.kept[position]))
    }
    pub fn concepts(&self) -> &[Arc<ConceptInstance>] {
        &self.kept
    }
    pub fn frames(&self) -> &[FrameInstance] {
        &self.frames
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    /// All instances satisfying the concept, in insertion order.
    pub fn get_extension(&self, concept: &Concept) -> Vec<Arc<ConceptInstance>> {
        self.kept
            .iter()
            .filter(|instance| instance.is_a(concept))
            .map(Arc::clone)
            .collect()
    }
    /// All frame instances whose schema descends from the given one.
    pub fn get_frame_extension(&self, schema: &FrameSchema) -> Vec<&FrameInstance> {
        self.frames
            .iter()
            .filter(|frame| frame.is_instance_of(schema))
            .collect()
    }
}
impl fmt::Display for PossibleWorld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "World<{}>", self.name)
    }
}
