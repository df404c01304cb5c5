//! The serial output writer and its process-wide instance.
//!
//! Every print operation returns the number of bytes that went out on the
//! wire.  Nothing here can fail: the transport blocks until the port has
//! taken each byte, so the only observable outcome is the count.

use core::fmt;

use one_shot_mutex::sync::OneShotMutex;

use crate::num::{self, Radix};
use crate::progmem::ProgmemStr;
use crate::{arch, progmem_str};

/// Transmit-only serial writer.
///
/// The port is shared, so the one instance lives in [`LITE_SERIAL`] behind a
/// one-shot lock; a second simultaneous writer is a bug, not a wait.  Call
/// [`begin`](Self::begin) once before any output — printing first pushes
/// bytes at an unconfigured port, and what the wire does with them is
/// undefined.
pub struct LiteSerial {
	uart: Option<arch::Usart>,
}

impl LiteSerial {
	const fn new() -> Self {
		Self { uart: None }
	}

	/// The underlying transport.
	pub fn uart(&mut self) -> &mut arch::Usart {
		self.uart.get_or_insert_with(arch::Usart::default)
	}

	/// Configures the port for `baud` bits per second, 8 data bits, no
	/// parity, 1 stop bit, transmitter only.  Call exactly once, before any
	/// other operation; there is no re-initialization path.  `baud` must be
	/// nonzero.
	pub fn begin(&mut self, baud: u32) {
		self.uart().init(baud);
	}

	/// Pushes one byte onto the port as-is.  Length is always 1.
	pub fn write(&mut self, byte: u8) -> usize {
		self.uart().write_byte(byte);
		1
	}

	fn send_bytes(&mut self, bytes: &[u8]) -> usize {
		let uart = self.uart();
		for byte in bytes.iter().copied() {
			uart.write_byte(byte);
		}
		bytes.len()
	}

	/// Prints text held in ordinary memory.
	pub fn print_str(&mut self, text: &str) -> usize {
		self.send_bytes(text.as_bytes())
	}

	/// Prints text held in the program image, reading each byte through the
	/// storage-class accessor.
	pub fn print_progmem(&mut self, text: ProgmemStr) -> usize {
		let uart = self.uart();
		for index in 0..text.len() {
			uart.write_byte(text.read_byte(index));
		}
		text.len()
	}

	// The numeric prints render into a worst-case stack buffer, then take
	// the ordinary string path.  The returned count is the text length.

	pub fn print_u8(&mut self, value: u8, radix: Radix) -> usize {
		let mut buffer = [0; num::U8_BUFFER];
		let text = num::format_u8(value, radix, &mut buffer);
		self.check_fits(text.len(), num::U8_BUFFER);
		self.print_str(text)
	}

	pub fn print_i8(&mut self, value: i8, radix: Radix) -> usize {
		let mut buffer = [0; num::I8_BUFFER];
		let text = num::format_i8(value, radix, &mut buffer);
		self.check_fits(text.len(), num::I8_BUFFER);
		self.print_str(text)
	}

	pub fn print_u16(&mut self, value: u16, radix: Radix) -> usize {
		let mut buffer = [0; num::U16_BUFFER];
		let text = num::format_u16(value, radix, &mut buffer);
		self.check_fits(text.len(), num::U16_BUFFER);
		self.print_str(text)
	}

	pub fn print_i16(&mut self, value: i16, radix: Radix) -> usize {
		let mut buffer = [0; num::I16_BUFFER];
		let text = num::format_i16(value, radix, &mut buffer);
		self.check_fits(text.len(), num::I16_BUFFER);
		self.print_str(text)
	}

	pub fn print_u32(&mut self, value: u32, radix: Radix) -> usize {
		let mut buffer = [0; num::U32_BUFFER];
		let text = num::format_u32(value, radix, &mut buffer);
		self.check_fits(text.len(), num::U32_BUFFER);
		self.print_str(text)
	}

	pub fn print_i32(&mut self, value: i32, radix: Radix) -> usize {
		let mut buffer = [0; num::I32_BUFFER];
		let text = num::format_i32(value, radix, &mut buffer);
		self.check_fits(text.len(), num::I32_BUFFER);
		self.print_str(text)
	}

	/// Prints a float as fixed-point text, space padded to 15 characters
	/// with 5 fractional digits.  Readable, not exact.
	pub fn print_f32(&mut self, value: f32) -> usize {
		let mut buffer = [0; num::F32_BUFFER];
		let text = num::format_f32(value, &mut buffer);
		self.check_fits(text.len(), num::F32_BUFFER);
		self.print_str(text)
	}

	// The println series: same as above, with a CRLF appended.  The
	// terminator is stored once in the program image and sent through the
	// constant-storage path.

	fn end_of_line(&mut self) -> usize {
		self.print_progmem(progmem_str!("\r\n"))
	}

	pub fn println_str(&mut self, text: &str) -> usize {
		let bytes_written = self.print_str(text);
		bytes_written + self.end_of_line()
	}

	pub fn println_progmem(&mut self, text: ProgmemStr) -> usize {
		let bytes_written = self.print_progmem(text);
		bytes_written + self.end_of_line()
	}

	pub fn println_u8(&mut self, value: u8, radix: Radix) -> usize {
		let bytes_written = self.print_u8(value, radix);
		bytes_written + self.end_of_line()
	}

	pub fn println_i8(&mut self, value: i8, radix: Radix) -> usize {
		let bytes_written = self.print_i8(value, radix);
		bytes_written + self.end_of_line()
	}

	pub fn println_u16(&mut self, value: u16, radix: Radix) -> usize {
		let bytes_written = self.print_u16(value, radix);
		bytes_written + self.end_of_line()
	}

	pub fn println_i16(&mut self, value: i16, radix: Radix) -> usize {
		let bytes_written = self.print_i16(value, radix);
		bytes_written + self.end_of_line()
	}

	pub fn println_u32(&mut self, value: u32, radix: Radix) -> usize {
		let bytes_written = self.print_u32(value, radix);
		bytes_written + self.end_of_line()
	}

	pub fn println_i32(&mut self, value: i32, radix: Radix) -> usize {
		let bytes_written = self.print_i32(value, radix);
		bytes_written + self.end_of_line()
	}

	pub fn println_f32(&mut self, value: f32) -> usize {
		let bytes_written = self.print_f32(value);
		bytes_written + self.end_of_line()
	}

	/// Conversions cannot outgrow their buffers; this re-checks anyway when
	/// the `debug-assert` feature is on and reports over the same channel.
	#[cfg(feature = "debug-assert")]
	fn check_fits(&mut self, len: usize, capacity: usize) {
		if len >= capacity {
			self.println_progmem(progmem_str!("ERROR: String length exceeds buffer size!"));
		}
	}

	#[cfg(not(feature = "debug-assert"))]
	fn check_fits(&mut self, _len: usize, _capacity: usize) {}
}

impl fmt::Write for LiteSerial {
	fn write_str(&mut self, s: &str) -> fmt::Result {
		self.print_str(s);
		Ok(())
	}
}

/// The process-wide writer.  Statically constructed, explicitly initialized
/// through [`LiteSerial::begin`], alive for the whole program run.
pub static LITE_SERIAL: OneShotMutex<LiteSerial> = OneShotMutex::new(LiteSerial::new());

#[cfg(test)]
mod tests {
	use core::fmt::Write;

	use crate::num::{DEC, HEX};
	use crate::{progmem_str, Divisor, LiteSerial, LITE_SERIAL};

	#[test]
	fn write_sends_one_verbatim_byte() {
		let mut serial = LiteSerial::new();
		assert_eq!(serial.write(0xab), 1);
		assert_eq!(serial.uart().output(), [0xab]);
	}

	#[test]
	fn empty_string_sends_nothing() {
		let mut serial = LiteSerial::new();
		assert_eq!(serial.print_str(""), 0);
		assert!(serial.uart().output().is_empty());
	}

	#[test]
	fn print_str_counts_what_it_sends() {
		let mut serial = LiteSerial::new();
		assert_eq!(serial.print_str("hi"), 2);
		assert_eq!(serial.uart().output(), *b"hi");
	}

	#[test]
	fn println_appends_carriage_return_line_feed() {
		let mut serial = LiteSerial::new();
		assert_eq!(serial.println_str("hi"), 4);
		assert_eq!(serial.uart().output(), *b"hi\r\n");
	}

	#[test]
	fn progmem_text_arrives_unchanged() {
		let stored = progmem_str!("stored in the program image");
		let mut serial = LiteSerial::new();
		assert_eq!(serial.print_progmem(stored), stored.len());
		assert_eq!(serial.uart().output(), *b"stored in the program image");
	}

	#[test]
	fn numeric_prints_count_the_text_length() {
		let mut serial = LiteSerial::new();
		assert_eq!(serial.print_i16(-32768, DEC), 6);
		assert_eq!(serial.print_u8(255, HEX), 2);
		assert_eq!(serial.print_u32(u32::MAX, DEC), 10);
		assert_eq!(serial.uart().output(), *b"-32768ff4294967295");
	}

	#[test]
	fn numeric_println_adds_two() {
		let mut serial = LiteSerial::new();
		assert_eq!(serial.println_u8(255, HEX), 4);
		assert_eq!(serial.uart().output(), *b"ff\r\n");
	}

	#[test]
	fn float_prints_fill_the_fixed_field() {
		let mut serial = LiteSerial::new();
		assert_eq!(serial.print_f32(1.5), 15);
		assert_eq!(serial.uart().output(), *b"        1.50000");
	}

	#[test]
	fn begin_applies_the_bootloader_exception() {
		let mut serial = LiteSerial::new();
		serial.begin(57600);
		assert_eq!(
			serial.uart().divisor(),
			Some(Divisor {
				double_speed: false,
				setting: 16,
			})
		);
	}

	#[test]
	fn formatted_output_goes_through_the_writer() {
		let mut serial = LiteSerial::new();
		write!(serial, "{}-{}", 1, 2).unwrap();
		assert_eq!(serial.uart().output(), *b"1-2");
	}

	// Everything touching the global instance lives in this one test; the
	// capture buffer is process-wide and the harness runs tests in parallel.
	#[test]
	fn global_instance_macros_and_log() {
		LITE_SERIAL.lock().uart().clear_output();

		print!("{}", 7);
		println!("ok");
		assert_eq!(LITE_SERIAL.lock().uart().output(), *b"7ok\r\n");

		let doubled = dbg!(21 * 2);
		assert_eq!(doubled, 42);
		let output = LITE_SERIAL.lock().uart().output().to_vec();
		assert!(output.ends_with(b"\r\n"));

		crate::log::init();
		log::info!("boot");
		let output = LITE_SERIAL.lock().uart().output().to_vec();
		let text = core::str::from_utf8(&output).unwrap();
		assert!(text.contains("boot"));
	}
}
