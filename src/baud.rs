//! Baud rate to clock divisor derivation.
//!
//! Kept free of register access so the selection rules stay testable on any
//! target.

/// USART clock divisor: the rate register value and which speed mode it was
/// computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Divisor {
	/// Double-speed mode halves the oversampling and doubles the timing
	/// granularity of the rate register.
	pub double_speed: bool,
	/// Value for the baud rate register.
	pub setting: u16,
}

/// The baud rate register is 12 bits wide.
const SETTING_LIMIT: u32 = 4095;

/// System clock when the build does not say otherwise.
const DEFAULT_CLOCK_HZ: u32 = 16_000_000;

/// The system clock frequency, fixed at build time through the `F_CPU`
/// environment variable.
pub(crate) fn clock_hz() -> u32 {
	option_env!("F_CPU")
		.map(|var| var.parse().unwrap())
		.unwrap_or(DEFAULT_CLOCK_HZ)
}

impl Divisor {
	/// Derives the divisor for `baud` at the given system clock.
	///
	/// Double-speed mode is preferred for its finer rate resolution.  Two
	/// cases fall back to normal speed: a doubled setting that would not
	/// fit the register, and 57600 baud on a 16 MHz clock, which must match
	/// the timing of the serial bootloaders shipped on common development
	/// boards.
	pub fn new(clock_hz: u32, baud: u32) -> Self {
		let double_setting = (clock_hz / 4 / baud - 1) / 2;

		if (clock_hz == 16_000_000 && baud == 57600) || double_setting > SETTING_LIMIT {
			Self {
				double_speed: false,
				setting: ((clock_hz / 8 / baud - 1) / 2) as u16,
			}
		} else {
			Self {
				double_speed: true,
				setting: double_setting as u16,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn common_rates_prefer_double_speed() {
		assert_eq!(
			Divisor::new(16_000_000, 9600),
			Divisor {
				double_speed: true,
				setting: 207,
			}
		);
		assert_eq!(
			Divisor::new(16_000_000, 115_200),
			Divisor {
				double_speed: true,
				setting: 16,
			}
		);
	}

	#[test]
	fn bootloader_rate_stays_at_normal_speed() {
		assert_eq!(
			Divisor::new(16_000_000, 57600),
			Divisor {
				double_speed: false,
				setting: 16,
			}
		);
	}

	#[test]
	fn the_exception_is_specific_to_the_16_mhz_clock() {
		assert_eq!(
			Divisor::new(8_000_000, 57600),
			Divisor {
				double_speed: true,
				setting: 16,
			}
		);
	}

	#[test]
	fn slow_rates_fall_back_when_the_register_would_overflow() {
		assert_eq!(
			Divisor::new(16_000_000, 300),
			Divisor {
				double_speed: false,
				setting: 3332,
			}
		);
	}
}
