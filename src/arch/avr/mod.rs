//! ATmega328-class USART0, transmit side only.

use core::hint;
use core::ptr::NonNull;

use volatile::{VolatileFieldAccess, VolatileRef};

use crate::baud::{clock_hz, Divisor};

/// USART0 register block, memory mapped at this address.
const USART0_BASE: usize = 0xC0;

const UCSR_A_U2X: u8 = 1 << 1;
const UCSR_A_UDRE: u8 = 1 << 5;

const UCSR_B_TXEN: u8 = 1 << 3;

/// 8 data bits, no parity, 1 stop bit.
const UCSR_C_8N1: u8 = 0x06;

#[repr(C)]
#[derive(VolatileFieldAccess)]
struct Usart0Registers {
	ucsr_a: u8,
	ucsr_b: u8,
	ucsr_c: u8,
	reserved: u8,
	ubrr_l: u8,
	ubrr_h: u8,
	udr: u8,
}

pub struct Usart {
	regs: VolatileRef<'static, Usart0Registers>,
}

impl Usart {
	/// Applies the divisor for `baud`, fixes the frame at 8N1 and enables
	/// the transmitter.  The receiver and every interrupt source stay off.
	pub fn init(&mut self, baud: u32) {
		let divisor = Divisor::new(clock_hz(), baud);
		let regs = self.regs.as_mut_ptr();

		regs.ucsr_a()
			.write(if divisor.double_speed { UCSR_A_U2X } else { 0 });
		regs.ubrr_h().write((divisor.setting >> 8) as u8);
		regs.ubrr_l().write(divisor.setting as u8);
		regs.ucsr_c().write(UCSR_C_8N1);
		regs.ucsr_b().write(UCSR_B_TXEN);
	}

	/// Blocks until the transmit register is empty, then hands over `byte`.
	///
	/// Wait first, then write: control returns to the caller a little
	/// sooner after the final byte of a message.  The wait is unbounded if
	/// the line never drains.
	pub fn write_byte(&mut self, byte: u8) {
		while self.regs.as_mut_ptr().ucsr_a().read() & UCSR_A_UDRE == 0 {
			hint::spin_loop();
		}

		self.regs.as_mut_ptr().udr().write(byte);
	}
}

impl Default for Usart {
	fn default() -> Self {
		Self {
			regs: unsafe {
				VolatileRef::new(NonNull::new_unchecked(USART0_BASE as *mut Usart0Registers))
			},
		}
	}
}

/// Reads one byte out of flash.  Flash sits in its own address space, so a
/// plain load through the pointer would read ram instead.
pub(crate) fn read_progmem_byte(addr: *const u8) -> u8 {
	let byte: u8;
	unsafe {
		core::arch::asm!(
			"lpm {}, Z",
			out(reg) byte,
			in("Z") addr,
			options(pure, readonly, nostack),
		);
	}
	byte
}
