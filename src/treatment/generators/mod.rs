//! Concrete step generators, one per chemical concern.

pub mod algicide;
pub mod alkalinity;
pub mod chlorine;
pub mod clarifier;
pub mod ph;

pub use algicide::AlgicideGenerator;
pub use alkalinity::AlkalinityGenerator;
pub use chlorine::ChlorineGenerator;
pub use clarifier::ClarifierGenerator;
pub use ph::PhGenerator;
