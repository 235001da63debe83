#![no_std]
//! Driver for HD44780 character LCDs wired to the I2C bus through a PCF8574 I/O expander
//! ("I2C backpack"). The controller is run in 4-bit mode: the expander's upper four outputs
//! carry the data nibble, the lower four carry RS, RW, EN and the backlight transistor.
//!
//! It requires an I2C instance implementing [`embedded_hal::i2c::I2c`] and an instance to
//! delay execution with [`embedded_hal::delay::DelayNs`]. Every call blocks until the bus
//! transaction and the controller's settle time are over.
//!
//! Usage:
//! ```ignore
//! const LCD_ADDRESS: u8 = 0x27; // Address depends on hardware, see link below
//!
//! let mut i2c = /* any embedded_hal::i2c::I2c */;
//! let mut delay = /* any embedded_hal::delay::DelayNs */;
//!
//! let mut lcd = lcd_hd44780_pcf8574::LcdUninit::new(&mut i2c, &mut delay)
//!     .with_address(LCD_ADDRESS)
//!     .with_cols(16)
//!     .with_rows(2)
//!     .init()?;
//!
//! lcd.print_text("Hello World, long line")?;
//! lcd.set_cursor(0, 1)?;
//! ufmt::uwrite!(lcd, "t={}", 21)?;
//! ```
//!
//! This [site][lcd address] describes how to find the address of your LCD devices.
//!
//! [lcd address]: https://www.ardumotive.com/i2clcden.html

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

pub mod glyphs;
pub mod sync_lcd;

pub use glyphs::{HebrewLetter, SlotMap};
pub use sync_lcd::{Lcd, LcdUninit};

/// Bits of the display on/off control instruction.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DisplayControl {
    Off = 0x00,
    CursorBlink = 0x01,
    CursorOn = 0x02,
    DisplayOn = 0x04,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Backlight {
    Off = 0x00,
    On = 0x08,
}

/// Character cell size. 5x10 is only honoured by single line displays.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Font {
    Font5x8 = 0x00,
    Font5x10 = 0x04,
}

/// Register select, the lowest expander line.
#[repr(u8)]
#[derive(Copy, Clone)]
enum Mode {
    Cmd = 0x00,
    Data = 0x01,
}

/// Instruction codes, the highest set bit selects the instruction.
#[repr(u8)]
#[derive(Copy, Clone)]
enum Instruction {
    Clear = 0x01,
    ReturnHome = 0x02,
    EntrySet = 0x04,
    DisplayControl = 0x08,
    CursorShift = 0x10,
    FunctionSet = 0x20,
    CGRAMAddr = 0x40,
    DDRAMAddr = 0x80,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum BitMode {
    Bit4 = 0x0 << 4,
    Bit8 = 0x1 << 4,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum Lines {
    One = 0x00,
    Two = 0x08,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum TextDirection {
    LeftToRight = 0x02,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum DisplayShift {
    Decrement = 0x00,
    Increment = 0x01,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum ShiftTarget {
    Cursor = 0x00,
    Display = 0x08,
}

#[repr(u8)]
#[derive(Copy, Clone)]
enum ShiftDir {
    Left = 0x00,
    Right = 0x04,
}

/// Expander line wired to the controller's enable input.
const ENABLE: u8 = 0x04;

/// DDRAM start address of each physical row.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];
