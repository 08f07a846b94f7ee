use crate::{
    lang::code::Word,
    runtime::error::{self, script_error, script_error_str},
};

/// Dictionary capacity.
pub const DICTIONARY_CAPACITY: usize = 100;

/// The ordered, index-stable dictionary of compiled words.
///
/// Lookup by name is a linear scan, last-defined wins. Redefining a word overwrites its
/// dictionary entry *in place*, preserving its index, so that any already-compiled `CALL`
/// referencing that slot picks up the new definition — this late binding by slot rather than by
/// name is intentional.
#[derive(Default)]
pub struct Dictionary {
    words: Vec<Word>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary { words: Vec::new() }
    }

    /// Number of words currently defined (including any forgotten range has already been
    /// truncated away).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Find the most recently defined word with this name, if any.
    pub fn find_index(&self, name: &str) -> Option<usize> {
        // Last-defined-wins in the face of forgetting-and-redefining a name at a different slot
        // would show up as two entries; since we overwrite in place on redefinition there is at
        // most one live entry per name, so scanning front-to-back is sufficient.
        self.words.iter().position(|word| word.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    /// Insert a new word, or overwrite an existing one of the same name in place. Returns the
    /// word's dictionary index either way.
    pub fn insert(&mut self, word: Word) -> error::Result<usize> {
        if let Some(index) = self.find_index(&word.name) {
            self.words[index] = word;
            return Ok(index);
        }

        if self.words.len() >= DICTIONARY_CAPACITY {
            return script_error_str("Dictionary full");
        }

        self.words.push(word);
        Ok(self.words.len() - 1)
    }

    /// Reserve a dictionary slot for a word that is about to be compiled (`:` creates the entry
    /// before the body is known, so that recursive `CALL`s to the word's own name resolve by
    /// index during compilation). Returns the new index.
    pub fn reserve(&mut self, name: String) -> error::Result<usize> {
        self.insert(Word::new(name))
    }

    /// Overwrite the slot reserved by `reserve` with the finished word, once `;` is reached.
    /// Unlike `insert`, this never changes which index the word lives at.
    pub fn commit(&mut self, index: usize, word: Word) {
        self.words[index] = word;
    }

    /// Truncate the dictionary to end just before `index`, per `FORGET`.
    pub fn forget(&mut self, index: usize) -> error::Result<()> {
        if index >= self.words.len() {
            return script_error(format!("FORGET: word index {} out of range", index));
        }

        self.words.truncate(index);
        Ok(())
    }

    /// Names of all currently defined words, in dictionary order, for `WORDS`.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| word.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_most_recent_definition() {
        let mut dict = Dictionary::new();
        dict.insert(Word::new("SQR".to_string())).unwrap();
        let index = dict.insert(Word::new("SQR".to_string())).unwrap();

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.find_index("SQR"), Some(index));
    }

    #[test]
    fn forget_truncates_and_hides_the_word() {
        let mut dict = Dictionary::new();
        dict.insert(Word::new("A".to_string())).unwrap();
        let b_index = dict.insert(Word::new("B".to_string())).unwrap();
        dict.insert(Word::new("C".to_string())).unwrap();

        dict.forget(b_index).unwrap();

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.find_index("B"), None);
        assert_eq!(dict.find_index("C"), None);
        assert_eq!(dict.find_index("A"), Some(0));
    }

    #[test]
    fn forget_out_of_range_is_an_error() {
        let mut dict = Dictionary::new();
        dict.insert(Word::new("A".to_string())).unwrap();
        assert!(dict.forget(5).is_err());
    }

    #[test]
    fn redefinition_preserves_index() {
        let mut dict = Dictionary::new();
        let first_index = dict.insert(Word::new("X".to_string())).unwrap();
        let second_index = dict.insert(Word::new("X".to_string())).unwrap();
        assert_eq!(first_index, second_index);
    }
}
