//! Six-digit PIN entry state, independent of the widget that draws it.

/// Number of digits of a PIN
pub const CELL_COUNT: usize = 6;

/// Symbol shown instead of an entered digit
pub const MASK_SYMBOL: char = '*';

/// What a single cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    Empty,
    /// Text cursor in the focused empty cell
    Cursor,
    /// Entered digit hidden behind [`MASK_SYMBOL`]
    Masked,
    /// The most recently entered digit, still readable
    Symbol(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub content: CellContent,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinEvent {
    Changed,
    /// All cells filled; the field has given up focus
    Completed(String),
    /// Focus regained on a full field wiped it
    Cleared,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinCode {
    value: String,
    focused: bool,
}

impl PinCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.value.len() == CELL_COUNT
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Replace the whole value (paste, programmatic set).
    ///
    /// Non-digits are dropped and input is cut at [`CELL_COUNT`] digits.
    pub fn set_value(&mut self, text: &str) -> Option<PinEvent> {
        let digits: String = text
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(CELL_COUNT)
            .collect();
        if digits == self.value {
            return None;
        }
        self.value = digits;
        Some(self.after_edit())
    }

    /// Type one character into the next empty cell
    pub fn push(&mut self, c: char) -> Option<PinEvent> {
        if !c.is_ascii_digit() || self.is_complete() {
            return None;
        }
        self.value.push(c);
        Some(self.after_edit())
    }

    pub fn backspace(&mut self) -> Option<PinEvent> {
        self.value.pop().map(|_| PinEvent::Changed)
    }

    /// The field gained focus. A full field starts over.
    pub fn focus(&mut self) -> Option<PinEvent> {
        if self.focused {
            return None;
        }
        self.focused = true;
        if self.is_complete() {
            self.value.clear();
            Some(PinEvent::Cleared)
        } else {
            None
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Per-cell display state
    pub fn cells(&self) -> Vec<Cell> {
        let entered: Vec<char> = self.value.chars().collect();
        (0..CELL_COUNT)
            .map(|index| {
                let focused = self.focused && index == entered.len();
                let content = match entered.get(index) {
                    Some(&c) if index + 1 == entered.len() => CellContent::Symbol(c),
                    Some(_) => CellContent::Masked,
                    None if focused => CellContent::Cursor,
                    None => CellContent::Empty,
                };
                Cell {
                    index,
                    content,
                    focused,
                }
            })
            .collect()
    }

    fn after_edit(&mut self) -> PinEvent {
        if self.is_complete() {
            self.focused = false;
            PinEvent::Completed(self.value.clone())
        } else {
            PinEvent::Changed
        }
    }
}
