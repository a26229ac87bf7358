//! critvec Core - criterion model and test-vector generation
//!
//! Turns a flat list of criterion definitions into validated state objects
//! and combines partial updates into test vectors for a tuning daemon:
//! - `definition`: parse `<kind> <name> : <values...>` lines
//! - `registry`: one shared variant per criterion name
//! - `criterion`: exclusive and inclusive instances with their validation rules
//! - `factory`: baseline and incremental vector generation
//! - `vector` / `suite`: named vectors, test suites, carried-over daemon state
//! - `transport`: command seam for pushing vectors to the daemon

pub mod criterion;
pub mod definition;
pub mod error;
pub mod factory;
pub mod fakes;
pub mod obs;
pub mod registry;
pub mod suite;
pub mod telemetry;
pub mod transport;
pub mod vector;

pub use criterion::{
    CriterionInstance, CriterionState, CriterionVariant, ExclusiveCriterion, InclusiveCriterion,
    NO_VALUE,
};
pub use definition::{load_definitions, parse_definitions, CriterionDefinition, CriterionKind};
pub use error::{CriterionError, Result};
pub use factory::{generate, Overrides, TestVectorFactory, DEFAULT_TEST_TYPE};
pub use obs::VectorSpan;
pub use registry::CriterionRegistry;
pub use suite::{EffectiveState, TestCase, TestSuite};
pub use telemetry::init_tracing;
pub use transport::{
    ApplyReport, CommandOutput, Transport, VectorApplier, APPLY_COMMAND, SET_CRITERION_COMMAND,
};
pub use vector::{CriterionCommand, TestVector, VectorReport};

/// critvec version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
