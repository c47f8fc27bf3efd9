//! Pure price logic shared by the oracle and the proxy handlers

pub mod observation;

pub use observation::*;
