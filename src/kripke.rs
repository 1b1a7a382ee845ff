//! Possible worlds linked by an accessibility relation.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::concept::Concept;
use crate::datatype::OtherHasher;
use crate::world::{ConceptInstance, PossibleWorld};

#[derive(Debug, Default)]
pub struct KripkeStructure {
    worlds: HashMap<String, PossibleWorld, OtherHasher>,
    accessibility: HashMap<String, Vec<String>, OtherHasher>,
}

impl KripkeStructure {
    pub fn new() -> Self {
        Self::default()
    }
    /// Registers a world under its name, replacing any world of the same name.
    pub fn add_world(&mut self, world: PossibleWorld) -> &mut Self {
        self.worlds.insert(world.name().to_owned(), world);
        self
    }
    /// Edges may name worlds that are not (yet) registered.
    pub fn add_access<F: Into<String>, T: Into<String>>(&mut self, from: F, to: T) -> &mut Self {
        self.accessibility
            .entry(from.into())
            .or_default()
            .push(to.into());
        self
    }
    pub fn world(&self, name: &str) -> Option<&PossibleWorld> {
        self.worlds.get(name)
    }
    pub fn world_mut(&mut self, name: &str) -> Option<&mut PossibleWorld> {
        self.worlds.get_mut(name)
    }
    pub fn len(&self) -> usize {
        self.worlds.len()
    }
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }
    pub fn accessible_from(&self, name: &str) -> &[String] {
        self.accessibility
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
    /// Breadth-first order of every world name reachable from `start`, which is always
    /// the first one. Each name appears once, however many edges lead to it.
    pub fn reachable_worlds(&self, start: &str) -> Vec<String> {
        let mut visited: HashSet<&str, OtherHasher> = HashSet::default();
        let mut queue: VecDeque<&str> = VecDeque::from([start]);
        let mut order = Vec::new();
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current.to_owned());
            for neighbour in self.accessible_from(current) {
                if !visited.contains(neighbour.as_str()) {
                    queue.push_back(neighbour.as_str());
                }
            }
        }
        order
    }
    /// The extension of the concept in every reachable world. Worlds with an empty
    /// extension are left out, as are names that were never registered.
    pub fn get_reachable_extension(
        &self,
        start: &str,
        concept: &Concept,
    ) -> BTreeMap<String, Vec<Arc<ConceptInstance>>> {
        let mut results = BTreeMap::new();
        let reachable = self.reachable_worlds(start);
        for name in &reachable {
            let Some(world) = self.worlds.get(name) else {
                trace!(world = %name, "unregistered world skipped");
                continue;
            };
            let extension = world.get_extension(concept);
            trace!(world = %name, matches = extension.len(), "extension computed");
            if !extension.is_empty() {
                results.insert(name.clone(), extension);
            }
        }
        debug!(
            %start,
            concept = %concept.name(),
            visited = reachable.len(),
            matched = results.len(),
            "reachable extension"
        );
        results
    }
}
