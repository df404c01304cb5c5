#[cfg(target_arch = "avr")]
pub use crate::arch::avr::*;

#[cfg(not(target_arch = "avr"))]
pub use crate::arch::host::*;

#[cfg(target_arch = "avr")]
pub mod avr;

#[cfg(not(target_arch = "avr"))]
pub mod host;
