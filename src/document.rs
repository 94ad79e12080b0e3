//! Document payload model, detached signatures, and the envelope posted to the endpoint.

pub mod envelope;
pub mod model;
pub mod signature;

pub use envelope::*;
pub use model::*;
pub use signature::*;
