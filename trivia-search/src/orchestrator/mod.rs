//! Resolution orchestrator: empty-question guard, arithmetic short-circuit,
//! deadline-bound provider fallback, and the concurrent acknowledgement.

pub mod acknowledge;
pub mod resolve;

pub use acknowledge::Acknowledger;
pub use resolve::{Resolver, Stage};
