pub const OTP_LENGTH: usize = 6;

/// Six single-digit slots with a cursor, as typed on the login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpInput {
    slots: [Option<char>; OTP_LENGTH],
    cursor: usize,
}

impl OtpInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn slots(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.slots
    }

    /// Fills the current slot and advances. Non-digits are ignored.
    pub fn type_char(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        self.slots[self.cursor] = Some(c);
        if self.cursor + 1 < OTP_LENGTH {
            self.cursor += 1;
        }
        true
    }

    /// Clears the current slot, or steps back and clears when it is empty.
    pub fn backspace(&mut self) {
        if self.slots[self.cursor].is_some() {
            self.slots[self.cursor] = None;
        } else if self.cursor > 0 {
            self.cursor -= 1;
            self.slots[self.cursor] = None;
        }
    }

    /// Spreads the digits of `text` over the slots from the cursor onward.
    /// Returns how many digits were taken.
    pub fn paste(&mut self, text: &str) -> usize {
        let mut taken = 0;
        for c in text.chars().filter(char::is_ascii_digit) {
            if self.slots[self.cursor].is_some() && self.cursor + 1 == OTP_LENGTH {
                break;
            }
            self.type_char(c);
            taken += 1;
        }
        taken
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The six-digit code, only once every slot is filled.
    pub fn code(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        Some(self.slots.iter().flatten().collect())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
