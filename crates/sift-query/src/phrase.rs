//! Phrase builder used while parsing quoted text.
//!
//! A phrase is a list of slots. Each slot records how many `<>` gaps came
//! before it and holds one or more alternative words (`a|b`).

/// One slot of a phrase under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Number of `<>` gaps immediately before this slot.
    pub gap: u32,
    /// Alternative words for this slot, never empty.
    pub words: Vec<String>,
}

/// A phrase as written in the query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phrase {
    /// Slots in order.
    pub slots: Vec<Slot>,
    /// Gaps seen since the last slot was added.
    pos_inc: u32,
}

impl Phrase {
    /// Starts a phrase. A `None` word is a leading `<>` gap and is dropped.
    pub fn first_word(word: Option<String>) -> Self {
        let mut phrase = Self::default();
        if let Some(word) = word {
            phrase.slots.push(Slot {
                gap: 0,
                words: vec![word],
            });
        }
        phrase
    }

    /// Adds a slot, or a gap when `word` is `None`.
    pub fn add_word(&mut self, word: Option<String>) {
        match word {
            Some(word) => {
                self.slots.push(Slot {
                    gap: self.pos_inc,
                    words: vec![word],
                });
                self.pos_inc = 0;
            }
            None => self.pos_inc += 1,
        }
    }

    /// Adds an alternative word to the last slot, opening one if needed.
    pub fn add_multi_word(&mut self, word: String) {
        match self.slots.last_mut() {
            Some(slot) => slot.words.push(word),
            None => self.add_word(Some(word)),
        }
    }
}
