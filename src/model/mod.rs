pub mod orders;
pub mod rng;
pub mod variates;
pub mod warehouse;
