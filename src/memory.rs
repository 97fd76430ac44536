//! Storage for the 26 single-letter variables.

/// Number of variable slots, one per letter `A`..`Z`.
pub const VARIABLE_COUNT: usize = 26;

/// Fixed table of numeric slots, each either set or unset.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableStore {
    values: [f64; VARIABLE_COUNT],
    is_set: [bool; VARIABLE_COUNT],
}

impl VariableStore {
    /// Create a store with every slot unset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [0.0; VARIABLE_COUNT],
            is_set: [false; VARIABLE_COUNT],
        }
    }

    /// Slot index for a letter, `None` outside `A`..`Z`.
    #[must_use]
    pub const fn index_of(letter: char) -> Option<usize> {
        if letter.is_ascii_uppercase() {
            Some(letter as usize - 'A' as usize)
        } else {
            None
        }
    }

    /// Letter naming a slot index.
    #[must_use]
    pub fn letter_of(index: usize) -> Option<char> {
        u8::try_from(index)
            .ok()
            .filter(|i| usize::from(*i) < VARIABLE_COUNT)
            .map(|i| char::from(b'A' + i))
    }

    /// Store a value and mark the slot set. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: f64) {
        if index < VARIABLE_COUNT {
            self.values[index] = value;
            self.is_set[index] = true;
        }
    }

    /// Clear every slot back to unset and zero.
    pub const fn reset(&mut self) {
        self.values = [0.0; VARIABLE_COUNT];
        self.is_set = [false; VARIABLE_COUNT];
    }

    #[must_use]
    pub fn is_set(&self, index: usize) -> bool {
        self.is_set.get(index).copied().unwrap_or(false)
    }

    /// Value of a slot; zero when unset, so check [`Self::is_set`] first.
    #[must_use]
    pub fn get(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// Value bound to a letter, if that variable is set.
    #[must_use]
    pub fn lookup(&self, letter: char) -> Option<f64> {
        Self::index_of(letter)
            .filter(|&i| self.is_set(i))
            .map(|i| self.get(i))
    }

    /// Set variables in alphabetical order.
    pub fn iter_set(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        (0..VARIABLE_COUNT).filter(|&i| self.is_set[i]).filter_map(|i| {
            Self::letter_of(i).map(|letter| (letter, self.values[i]))
        })
    }

    /// Number of set variables.
    #[must_use]
    pub fn count_set(&self) -> usize {
        self.is_set.iter().filter(|&&set| set).count()
    }
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}
