//! 5x8 bitmaps for the Hebrew alphabet and bookkeeping for the eight CGRAM slots they are
//! loaded into. The HD44780 character ROM has no Hebrew, so every letter on screen has to
//! occupy one of the user-defined characters.

/// The 22 letters of the Hebrew alphabet followed by the five final forms.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HebrewLetter {
    Alef,
    Bet,
    Gimel,
    Dalet,
    He,
    Vav,
    Zayin,
    Het,
    Tet,
    Yod,
    Kaf,
    Lamed,
    Mem,
    Nun,
    Samekh,
    Ayin,
    Pe,
    Tsadi,
    Qof,
    Resh,
    Shin,
    Tav,
    FinalKaf,
    FinalMem,
    FinalNun,
    FinalPe,
    FinalTsadi,
}

/// Indexed by `HebrewLetter as usize`.
const GLYPHS: [[u8; 8]; 27] = [
    [0b10010, 0b10010, 0b01010, 0b00100, 0b01100, 0b10010, 0b10001, 0b10001],
    [0b00000, 0b00000, 0b11110, 0b00010, 0b00010, 0b00010, 0b00010, 0b11111],
    [0b00000, 0b00000, 0b11110, 0b00010, 0b00010, 0b01110, 0b10010, 0b10010],
    [0b00000, 0b00000, 0b11111, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010],
    [0b00000, 0b00000, 0b11111, 0b00001, 0b00001, 0b10001, 0b10001, 0b10001],
    [0b00000, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
    [0b00000, 0b10000, 0b01110, 0b00101, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b00000, 0b00000, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001],
    [0b00000, 0b00000, 0b10011, 0b10101, 0b10001, 0b10001, 0b10001, 0b11111],
    [0b00000, 0b00000, 0b01110, 0b00010, 0b00010, 0b00000, 0b00000, 0b00000],
    [0b00000, 0b00000, 0b11110, 0b00001, 0b00001, 0b00001, 0b00001, 0b11110],
    [0b10000, 0b10000, 0b11111, 0b00001, 0b00010, 0b00010, 0b00100, 0b01000],
    [0b00000, 0b00000, 0b10110, 0b01001, 0b10001, 0b10001, 0b10001, 0b10111],
    [0b00000, 0b00000, 0b00111, 0b00001, 0b00001, 0b00001, 0b00001, 0b11111],
    [0b00000, 0b00000, 0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
    [0b00000, 0b00000, 0b00101, 0b00101, 0b00101, 0b00101, 0b00101, 0b11111],
    [0b00000, 0b00000, 0b00000, 0b11110, 0b10010, 0b11010, 0b00010, 0b11110],
    [0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b00010, 0b00001, 0b11111],
    [0b00000, 0b11111, 0b00001, 0b00001, 0b10001, 0b10001, 0b10000, 0b10000],
    [0b00000, 0b00000, 0b11111, 0b00001, 0b00001, 0b00001, 0b00001, 0b00001],
    [0b00000, 0b00000, 0b10101, 0b10101, 0b10101, 0b10101, 0b10101, 0b01110],
    [0b00000, 0b00000, 0b01111, 0b01001, 0b01001, 0b01001, 0b01001, 0b11001],
    // finals
    [0b11110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010],
    [0b00000, 0b00000, 0b11111, 0b01001, 0b01001, 0b01001, 0b01001, 0b01111],
    [0b00110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010],
    [0b11110, 0b10010, 0b11010, 0b00010, 0b00010, 0b00010, 0b00010, 0b00000],
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00010, 0b00010, 0b00001, 0b00001],
];

/// Unicode Hebrew block, U+05D0 to U+05EA.
const LETTERS: [(char, HebrewLetter); 27] = [
    ('\u{05D0}', HebrewLetter::Alef),
    ('\u{05D1}', HebrewLetter::Bet),
    ('\u{05D2}', HebrewLetter::Gimel),
    ('\u{05D3}', HebrewLetter::Dalet),
    ('\u{05D4}', HebrewLetter::He),
    ('\u{05D5}', HebrewLetter::Vav),
    ('\u{05D6}', HebrewLetter::Zayin),
    ('\u{05D7}', HebrewLetter::Het),
    ('\u{05D8}', HebrewLetter::Tet),
    ('\u{05D9}', HebrewLetter::Yod),
    ('\u{05DA}', HebrewLetter::FinalKaf),
    ('\u{05DB}', HebrewLetter::Kaf),
    ('\u{05DC}', HebrewLetter::Lamed),
    ('\u{05DD}', HebrewLetter::FinalMem),
    ('\u{05DE}', HebrewLetter::Mem),
    ('\u{05DF}', HebrewLetter::FinalNun),
    ('\u{05E0}', HebrewLetter::Nun),
    ('\u{05E1}', HebrewLetter::Samekh),
    ('\u{05E2}', HebrewLetter::Ayin),
    ('\u{05E3}', HebrewLetter::FinalPe),
    ('\u{05E4}', HebrewLetter::Pe),
    ('\u{05E5}', HebrewLetter::FinalTsadi),
    ('\u{05E6}', HebrewLetter::Tsadi),
    ('\u{05E7}', HebrewLetter::Qof),
    ('\u{05E8}', HebrewLetter::Resh),
    ('\u{05E9}', HebrewLetter::Shin),
    ('\u{05EA}', HebrewLetter::Tav),
];

impl HebrewLetter {
    /// Looks up the letter for a Unicode codepoint, `None` for anything outside the alphabet.
    pub fn from_char(c: char) -> Option<Self> {
        LETTERS
            .iter()
            .find(|(codepoint, _)| *codepoint == c)
            .map(|(_, letter)| *letter)
    }

    pub fn to_char(self) -> char {
        LETTERS
            .iter()
            .find(|(_, letter)| *letter == self)
            .map(|(codepoint, _)| *codepoint)
            .unwrap_or('?')
    }

    /// Bitmap ready for [`crate::Lcd::create_char`], one row per byte, low five bits used.
    pub fn glyph(self) -> &'static [u8; 8] {
        &GLYPHS[self as usize]
    }
}

/// Assignment of letters to the eight CGRAM slots.
///
/// The controller renders CGRAM live, so a slot can only stand for one letter while that
/// letter is on screen. Slots are handed out in order and only come back through
/// [`SlotMap::release`] or a fresh map once the screen is cleared.
#[derive(Clone, Debug, Default)]
pub struct SlotMap {
    slots: [Option<HebrewLetter>; 8],
}

impl SlotMap {
    pub const fn new() -> Self {
        Self { slots: [None; 8] }
    }

    /// Returns the slot holding `letter` and whether it was newly assigned (and so still
    /// has to be loaded). `None` once all eight slots hold other letters.
    pub fn assign(&mut self, letter: HebrewLetter) -> Option<(u8, bool)> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            match slot {
                Some(held) if *held == letter => return Some((index as u8, false)),
                Some(_) => continue,
                None => {
                    *slot = Some(letter);
                    return Some((index as u8, true));
                }
            }
        }
        None
    }

    /// Frees `slot` (masked to 0..8) for another letter, used when something else is loaded
    /// into it.
    pub fn release(&mut self, slot: u8) {
        self.slots[(slot & 0x7) as usize] = None;
    }

    pub fn slot_of(&self, letter: HebrewLetter) -> Option<u8> {
        self.slots
            .iter()
            .position(|slot| *slot == Some(letter))
            .map(|index| index as u8)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}
