mod core_impls;

#[cfg(feature = "std")]
mod std_impls;

pub use core_impls::*;

#[cfg(feature = "std")]
pub use std_impls::*;
