pub mod layout;
pub mod precompute;
pub mod stats;
pub mod synth;
