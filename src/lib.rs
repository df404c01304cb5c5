//! Transmit-only serial logging that uses no static RAM and no interrupts.
//!
//! Everything goes straight to the hardware: numbers are rendered into small
//! stack buffers sized for their worst case, strings are pushed to the
//! transmit register one byte at a time, and the calling code blocks until
//! the port has taken every byte. There is no receive path and no buffering,
//! which is exactly what makes the memory footprint zero.
//!
//! ```
//! use lite_serial::{DEC, HEX, LITE_SERIAL};
//!
//! let mut serial = LITE_SERIAL.lock();
//! serial.begin(9600);
//! serial.print_str("voltage: ");
//! serial.println_u16(3300, DEC);
//! serial.println_u8(0x2a, HEX);
//! ```

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]
#![warn(rust_2018_idioms)]

#[macro_use]
mod macros;

pub mod arch;
mod baud;
pub mod console;
pub mod log;
pub mod num;
pub mod progmem;

pub use self::baud::Divisor;
pub use self::console::{LiteSerial, LITE_SERIAL};
pub use self::num::{Radix, DEC, HEX};
pub use self::progmem::ProgmemStr;

use core::fmt;

#[doc(hidden)]
pub fn _print(args: fmt::Arguments<'_>) {
	use core::fmt::Write;

	LITE_SERIAL.lock().write_fmt(args).ok();
}
