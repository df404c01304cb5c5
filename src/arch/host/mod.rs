//! Stand-in transport for every target without the USART.
//!
//! Keeps the same surface as the hardware driver but records what would
//! have gone over the wire, which is what the host test suite asserts
//! against.

use heapless::Vec;

use crate::baud::{clock_hz, Divisor};

/// Bytes of output the stand-in retains; anything beyond is dropped.
const CAPTURE_BYTES: usize = 4096;

#[derive(Default)]
pub struct Usart {
	divisor: Option<Divisor>,
	tx: Vec<u8, CAPTURE_BYTES>,
}

impl Usart {
	pub fn init(&mut self, baud: u32) {
		self.divisor = Some(Divisor::new(clock_hz(), baud));
	}

	pub fn write_byte(&mut self, byte: u8) {
		let _ = self.tx.push(byte);
	}

	/// The divisor `init` derived, if `init` ran.
	pub fn divisor(&self) -> Option<Divisor> {
		self.divisor
	}

	/// Everything written so far, in wire order.
	pub fn output(&self) -> &[u8] {
		&self.tx
	}

	pub fn clear_output(&mut self) {
		self.tx.clear();
	}
}

pub(crate) fn read_progmem_byte(addr: *const u8) -> u8 {
	// Single address space: the program image is ordinary memory here.
	unsafe { addr.read() }
}
