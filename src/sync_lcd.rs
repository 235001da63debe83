use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use ufmt_write::uWrite;

use crate::glyphs::{HebrewLetter, SlotMap};
use crate::{
    Backlight, BitMode, DisplayControl, DisplayShift, Font, Instruction, Lines, Mode, ShiftDir,
    ShiftTarget, TextDirection, ENABLE, ROW_OFFSETS,
};

/// Address most PCF8574 backpacks ship with (A0..A2 pulled high).
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Display configuration before the power-up sequence ran.
pub struct LcdUninit<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    i2c: &'a mut I,
    delay: &'a mut D,
    address: u8,
    cols: u8,
    rows: u8,
    font: Font,
    backlight_state: Backlight,
}

impl<'a, I, D> LcdUninit<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Create new instance with only the I2C and delay instance. Defaults to a 16x2 display
    /// at [`DEFAULT_ADDRESS`] with the backlight on.
    pub fn new(i2c: &'a mut I, delay: &'a mut D) -> Self {
        Self {
            i2c,
            delay,
            address: DEFAULT_ADDRESS,
            cols: 16,
            rows: 2,
            font: Font::Font5x8,
            backlight_state: Backlight::On,
        }
    }

    /// Set I2C address, see [lcd address].
    ///
    /// [lcd address]: https://www.ardumotive.com/i2clcden.html
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn with_cols(mut self, cols: u8) -> Self {
        self.cols = cols;
        self
    }

    /// Number of physical rows, between 1 and 4.
    pub fn with_rows(mut self, rows: u8) -> Self {
        self.rows = rows;
        self
    }

    /// Only single row displays can use [`Font::Font5x10`], it is ignored otherwise.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_backlight(mut self, backlight: Backlight) -> Self {
        self.backlight_state = backlight;
        self
    }

    /// Runs the power-up sequence and hands out the usable display.
    ///
    /// The controller may be in 8 bit or 4 bit mode, possibly halfway through a byte, when we
    /// start. Three "8 bit mode" nibbles bring it to a known state before switching to 4 bit
    /// mode, see figure 24 on page 46 of the [datasheet].
    ///
    /// [datasheet]: https://www.sparkfun.com/datasheets/LCD/HD44780.pdf
    pub fn init(self) -> Result<Lcd<'a, I, D>, I::Error> {
        let rows = self.rows.clamp(1, ROW_OFFSETS.len() as u8);
        if rows != self.rows {
            debug!("rows clamped from {} to {}", self.rows, rows);
        }
        let mut lcd = Lcd {
            i2c: self.i2c,
            delay: self.delay,
            address: self.address,
            cols: self.cols.max(1),
            rows,
            font: self.font,
            backlight_state: self.backlight_state,
            display_function: 0,
            display_control: 0,
            entry_mode: 0,
            slots: SlotMap::new(),
        };
        lcd.power_up()?;
        Ok(lcd)
    }
}

/// API to write to the LCD.
///
/// `display_function`, `display_control` and `entry_mode` shadow the controller registers.
/// Every setter updates the shadow and sends it right away.
pub struct Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    i2c: &'a mut I,
    delay: &'a mut D,
    address: u8,
    cols: u8,
    rows: u8,
    font: Font,
    backlight_state: Backlight,
    display_function: u8,
    display_control: u8,
    entry_mode: u8,
    slots: SlotMap,
}

impl<'a, I, D> Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    fn power_up(&mut self) -> Result<(), I::Error> {
        debug!(
            "lcd init at {=u8:#x}: {} cols, {} rows",
            self.address, self.cols, self.rows
        );
        let lines = if self.rows > 1 { Lines::Two } else { Lines::One };
        let font = if self.rows == 1 { self.font } else { Font::Font5x8 };
        self.display_function = BitMode::Bit4 as u8 | lines as u8 | font as u8;

        // At least 40ms after Vcc rises to 2.7V.
        self.delay.delay_ms(50);

        // RS and RW low, backlight as configured.
        self.expander_write(0)?;
        self.delay.delay_ms(1000);

        let mode_8bit = Instruction::FunctionSet as u8 | BitMode::Bit8 as u8;
        self.write4bits(mode_8bit)?;
        self.delay.delay_us(4500);
        self.write4bits(mode_8bit)?;
        self.delay.delay_us(4500);
        self.write4bits(mode_8bit)?;
        self.delay.delay_us(150);

        // Switch to 4 bit mode, from here on every byte takes two nibbles.
        let mode_4bit = Instruction::FunctionSet as u8 | BitMode::Bit4 as u8;
        self.write4bits(mode_4bit)?;

        self.command(Instruction::FunctionSet as u8 | self.display_function)?;

        self.display_control = DisplayControl::DisplayOn as u8;
        self.update_display_control()?;

        self.clear()?;

        self.entry_mode = TextDirection::LeftToRight as u8 | DisplayShift::Decrement as u8;
        self.update_entry_mode()?;

        self.home()
    }

    fn expander_write(&mut self, data: u8) -> Result<(), I::Error> {
        self.i2c
            .write(self.address, &[data | self.backlight_state as u8])
    }

    fn pulse_enable(&mut self, data: u8) -> Result<(), I::Error> {
        self.expander_write(data | ENABLE)?;
        // Enable pulse must be >450ns.
        self.delay.delay_us(1);
        self.expander_write(data & !ENABLE)?;
        // Commands need >37us to settle.
        self.delay.delay_us(50);
        Ok(())
    }

    fn write4bits(&mut self, data: u8) -> Result<(), I::Error> {
        self.expander_write(data)?;
        self.pulse_enable(data)
    }

    fn send(&mut self, data: u8, mode: Mode) -> Result<(), I::Error> {
        let high_bits: u8 = data & 0xf0;
        let low_bits: u8 = (data << 4) & 0xf0;
        self.write4bits(high_bits | mode as u8)?;
        self.write4bits(low_bits | mode as u8)?;
        Ok(())
    }

    /// Send a raw instruction byte. The shadow registers are not updated, so prefer the
    /// dedicated methods for anything they cover.
    pub fn command(&mut self, data: u8) -> Result<(), I::Error> {
        self.send(data, Mode::Cmd)
    }

    fn update_display_control(&mut self) -> Result<(), I::Error> {
        self.command(Instruction::DisplayControl as u8 | self.display_control)
    }

    fn update_entry_mode(&mut self) -> Result<(), I::Error> {
        self.command(Instruction::EntrySet as u8 | self.entry_mode)
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Font in effect, which is 5x8 on multi row displays whatever was requested.
    pub fn font(&self) -> Font {
        if self.display_function & Font::Font5x10 as u8 != 0 {
            Font::Font5x10
        } else {
            Font::Font5x8
        }
    }

    /// Clear the display and return the cursor to (0, 0). With nothing left on screen all
    /// CGRAM slots are free for letters again.
    pub fn clear(&mut self) -> Result<(), I::Error> {
        self.command(Instruction::Clear as u8)?;
        self.delay.delay_us(2000);
        self.slots = SlotMap::new();
        Ok(())
    }

    /// Return cursor to upper left corner, i.e. (0,0), and undo any display shift.
    pub fn home(&mut self) -> Result<(), I::Error> {
        self.command(Instruction::ReturnHome as u8)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    /// Set the cursor to (col, row). Coordinates are zero-based.
    ///
    /// Rows past the last one land on the last row. Columns are passed through as is, past
    /// the visible width they address DDRAM outside the window.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I::Error> {
        let last_row = self.rows - 1;
        let row = if row > last_row {
            trace!("row {} clamped to {}", row, last_row);
            last_row
        } else {
            row
        };
        let address = col.wrapping_add(ROW_OFFSETS[row as usize]);
        self.command(Instruction::DDRAMAddr as u8 | address)
    }

    pub fn display(&mut self) -> Result<(), I::Error> {
        self.display_control |= DisplayControl::DisplayOn as u8;
        self.update_display_control()
    }

    /// Blank the display, DDRAM is kept.
    pub fn no_display(&mut self) -> Result<(), I::Error> {
        self.display_control &= !(DisplayControl::DisplayOn as u8);
        self.update_display_control()
    }

    /// Underline cursor.
    pub fn cursor(&mut self) -> Result<(), I::Error> {
        self.display_control |= DisplayControl::CursorOn as u8;
        self.update_display_control()
    }

    pub fn no_cursor(&mut self) -> Result<(), I::Error> {
        self.display_control &= !(DisplayControl::CursorOn as u8);
        self.update_display_control()
    }

    pub fn blink(&mut self) -> Result<(), I::Error> {
        self.display_control |= DisplayControl::CursorBlink as u8;
        self.update_display_control()
    }

    pub fn no_blink(&mut self) -> Result<(), I::Error> {
        self.display_control &= !(DisplayControl::CursorBlink as u8);
        self.update_display_control()
    }

    /// Scrolls the display one char to the left
    pub fn scroll_display_left(&mut self) -> Result<(), I::Error> {
        self.command(
            Instruction::CursorShift as u8 | ShiftTarget::Display as u8 | ShiftDir::Left as u8,
        )
    }

    /// Scrolls the display one char to the right
    pub fn scroll_display_right(&mut self) -> Result<(), I::Error> {
        self.command(
            Instruction::CursorShift as u8 | ShiftTarget::Display as u8 | ShiftDir::Right as u8,
        )
    }

    /// Moves the cursor one char to the left
    pub fn scroll_cursor_left(&mut self) -> Result<(), I::Error> {
        self.command(
            Instruction::CursorShift as u8 | ShiftTarget::Cursor as u8 | ShiftDir::Left as u8,
        )
    }

    /// Moves the cursor one char to the right
    pub fn scroll_cursor_right(&mut self) -> Result<(), I::Error> {
        self.command(
            Instruction::CursorShift as u8 | ShiftTarget::Cursor as u8 | ShiftDir::Right as u8,
        )
    }

    /// Text flows left to right, the default.
    pub fn left_to_right(&mut self) -> Result<(), I::Error> {
        self.entry_mode |= TextDirection::LeftToRight as u8;
        self.update_entry_mode()
    }

    pub fn right_to_left(&mut self) -> Result<(), I::Error> {
        self.entry_mode &= !(TextDirection::LeftToRight as u8);
        self.update_entry_mode()
    }

    /// Shift the display on every write, which 'right justifies' text at the cursor.
    pub fn autoscroll(&mut self) -> Result<(), I::Error> {
        self.entry_mode |= DisplayShift::Increment as u8;
        self.update_entry_mode()
    }

    pub fn no_autoscroll(&mut self) -> Result<(), I::Error> {
        self.entry_mode &= !(DisplayShift::Increment as u8);
        self.update_entry_mode()
    }

    /// Fill one of the eight CGRAM slots with a 5x8 bitmap. The slot index wraps, so 9 is
    /// slot 1. Writing the slot number as data shows the character afterwards.
    ///
    /// The address counter is left in CGRAM, call [`Self::set_cursor`] before writing text.
    pub fn create_char(&mut self, location: u8, charmap: &[u8; 8]) -> Result<(), I::Error> {
        let location = location & 0x7;
        self.command(Instruction::CGRAMAddr as u8 | (location << 3))?;
        for row in charmap {
            self.send(*row, Mode::Data)?;
        }
        Ok(())
    }

    pub fn backlight(&mut self) -> Result<(), I::Error> {
        self.set_backlight(true)
    }

    pub fn no_backlight(&mut self) -> Result<(), I::Error> {
        self.set_backlight(false)
    }

    /// The backlight bit rides along on every expander write, switching it is an otherwise
    /// empty write.
    pub fn set_backlight(&mut self, on: bool) -> Result<(), I::Error> {
        self.backlight_state = if on { Backlight::On } else { Backlight::Off };
        self.expander_write(0)
    }

    pub fn get_backlight(&self) -> bool {
        self.backlight_state == Backlight::On
    }

    /// Write a single character code at the cursor. Returns the number of bytes written.
    pub fn write(&mut self, data: u8) -> Result<usize, I::Error> {
        self.send(data, Mode::Data)?;
        Ok(1)
    }

    /// Write string to display.
    pub fn write_str(&mut self, data: &str) -> Result<(), I::Error> {
        for c in data.chars() {
            self.send(c as u8, Mode::Data)?;
        }
        Ok(())
    }

    /// Clear the display and write `text` from the top left corner. Characters beyond the
    /// first row continue on the second row, past its visible width too. The second row
    /// takes at most 256 characters, the rest of `text` is dropped.
    pub fn print_text(&mut self, text: &str) -> Result<(), I::Error> {
        self.clear()?;
        self.set_cursor(0, 0)?;
        let cols = self.cols as usize;
        for (i, c) in text.chars().enumerate().take(cols + 256) {
            if i >= cols {
                if i == cols {
                    trace!("text wraps after {} chars", cols);
                }
                self.set_cursor((i - cols) as u8, 1)?;
            }
            self.write(c as u8)?;
        }
        Ok(())
    }

    /// Load `glyph` into CGRAM slot 1 and show it at (col, row).
    ///
    /// Any Hebrew letter held in slot 1 is forgotten, cells already showing it change to
    /// `glyph`.
    pub fn write_custom_char(
        &mut self,
        glyph: &[u8; 8],
        col: u8,
        row: u8,
    ) -> Result<(), I::Error> {
        self.slots.release(1);
        self.create_char(1, glyph)?;
        self.set_cursor(col, row)?;
        self.write(1)?;
        Ok(())
    }

    /// Show a single Hebrew letter at (col, row), sharing CGRAM slots with [`Self::print_rtl`].
    pub fn print_hebrew_letter(
        &mut self,
        letter: HebrewLetter,
        col: u8,
        row: u8,
    ) -> Result<(), I::Error> {
        let code = self.letter_code(letter)?;
        self.set_cursor(col, row)?;
        self.write(code)?;
        Ok(())
    }

    /// Character code showing `letter`, loading its glyph first if it has no slot yet. `?`
    /// once every slot holds another letter.
    fn letter_code(&mut self, letter: HebrewLetter) -> Result<u8, I::Error> {
        match self.slots.assign(letter) {
            Some((slot, true)) => {
                self.create_char(slot, letter.glyph())?;
                Ok(slot)
            }
            Some((slot, false)) => Ok(slot),
            None => {
                debug!("no free CGRAM slot for {}", letter);
                Ok(b'?')
            }
        }
    }

    /// Write `text` right to left on `row`, starting in the last column.
    ///
    /// Hebrew letters are loaded into CGRAM, at most eight distinct ones until the next
    /// [`Self::clear`], across calls and rows. Further letters are shown as `?`. Anything
    /// else is sent as its character code. Returns the number of cells written, which is
    /// capped at the column count.
    pub fn print_rtl(&mut self, text: &str, row: u8) -> Result<usize, I::Error> {
        let mut written = 0;
        for c in text.chars().take(self.cols as usize) {
            let code = match HebrewLetter::from_char(c) {
                Some(letter) => self.letter_code(letter)?,
                None => c as u8,
            };
            let col = self.cols - 1 - written as u8;
            self.set_cursor(col, row)?;
            written += self.write(code)?;
        }
        Ok(written)
    }
}

impl<'a, I, D> uWrite for Lcd<'a, I, D>
where
    I: I2c,
    D: DelayNs,
{
    type Error = I::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_str(s)
    }
}
