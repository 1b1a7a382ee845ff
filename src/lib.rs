//! Framelogic – a small concept algebra with frames and possible worlds.
//!
//! The crate is built from a handful of layers, each using only the ones before it:
//! * A [`datatype::Value`] is a scalar (number, text or boolean), and
//!   [`datatype::Attributes`] maps attribute names to values.
//! * A [`constraint::Constraint`] is a predicate over one value: a numeric range,
//!   an enumeration of allowed values, or unconstrained.
//! * A [`concept::Concept`] is either atomic (one attribute under one constraint)
//!   or composite (a named conjunction of atomic concepts). Concepts are ordered by
//!   structural subsumption and combined with `&`.
//! * A [`frame::FrameSchema`] is a named n-ary relation whose variables carry a
//!   [`frame::RoleTag`] and a required concept. Schemas are combined with `&` and
//!   ordered by provenance: a conjunction is a subframe of what it was built from.
//! * A [`world::PossibleWorld`] owns [`world::ConceptInstance`]s and validated
//!   [`world::FrameInstance`]s, and answers extension queries.
//! * A [`kripke::KripkeStructure`] links worlds through an accessibility relation
//!   and collects extensions over every world reachable from a starting one.
//!
//! Constraints, concepts and schemas are immutable values. Worlds and the Kripke
//! structure are plain single-owner containers; nothing blocks and nothing is shared
//! behind a lock.
//!
//! ## Quick Start
//! ```
//! use framelogic::attributes;
//! use framelogic::concept::Concept;
//! use framelogic::constraint::Constraint;
//! use framelogic::kripke::KripkeStructure;
//! use framelogic::world::PossibleWorld;
//!
//! let sensor = Concept::composite("Sensor", [
//!     framelogic::concept::AtomicConcept::new("protocol", Constraint::enumeration(["ZigBee"]).unwrap()),
//!     framelogic::concept::AtomicConcept::new("battery", Constraint::range(0, 100).unwrap()),
//! ]);
//! let full = Concept::atomic("battery", Constraint::range(80, 100).unwrap());
//! let reliable = (&sensor & &full).unwrap().with_name("ReliableSensor");
//! assert!(reliable.check(&attributes! { "protocol" => "ZigBee", "battery" => 90 }));
//!
//! let mut garage = PossibleWorld::new("Garage");
//! garage.add_concept("sensor_garage", attributes! { "protocol" => "ZigBee", "battery" => 85 });
//! let mut kripke = KripkeStructure::new();
//! kripke.add_world(PossibleWorld::new("Home")).add_world(garage).add_access("Home", "Garage");
//! let reachable = kripke.get_reachable_extension("Home", &reliable);
//! assert_eq!(reachable.keys().collect::<Vec<_>>(), vec!["Garage"]);
//! ```
//!
//! ## Errors
//! Every failure is a [`FramelogicError`], raised where the contract is broken:
//! building an invalid constraint, conjoining incompatible constraints or roles, or
//! binding a frame instance to the wrong arguments. Checks and extension queries
//! never fail; data of the wrong type simply does not match.
//!
//! ## Logging
//! Decisions are reported through `tracing`. See [`settings`] for a ready-made
//! subscriber configured from a file or the environment.

pub mod datatype;
pub mod constraint;
pub mod concept;
pub mod frame;
pub mod world;
pub mod kripke;
pub mod settings;
pub mod error;

pub use error::{FramelogicError, Result};
