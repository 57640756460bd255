//! # Custom Field Registry
//!
//! Custom fields extract the raw text of any term of any sentence, including
//! sentences the parser does not decode itself. They live in a fixed arena
//! owned by the parser and are chained in ascending `(sentence name, term
//! index)` order, so all fields of one sentence form a contiguous run: the
//! candidate window that is scanned while that sentence streams in.
//!
//! Callers keep a [`CustomFieldId`] handle and read the field back through
//! [`StreamParser::custom_mut`](crate::StreamParser::custom_mut).

use core::ops::{Index, IndexMut};

use heapless::{String, Vec};

use crate::{Clock, Field, MAX_TERM_LEN, RegistryError};

/// Characters kept for the value of a custom field.
pub const MAX_CUSTOM_LEN: usize = 15;

/// Bounded text of a custom field.
pub type CustomText = String<MAX_CUSTOM_LEN>;

/// Bounded sentence identifier such as `GPGSA`.
pub type SentenceName = String<MAX_TERM_LEN>;

/// Handle of a registered custom field.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomFieldId(u8);

/// Raw text of one term of one sentence type.
#[derive(Debug, Clone)]
pub struct CustomField {
    sentence: SentenceName,
    term_index: u8,
    cell: Field<CustomText>,
    next: Option<u8>,
}

impl CustomField {
    /// Sentence identifier this field listens to, talker included.
    pub fn sentence_name(&self) -> &str {
        &self.sentence
    }

    /// Term index this field listens to, counting from 1 after the identifier.
    pub fn term_index(&self) -> u8 {
        self.term_index
    }

    pub fn is_valid(&self) -> bool {
        self.cell.is_valid()
    }

    pub fn is_updated(&self) -> bool {
        self.cell.is_updated()
    }

    /// Milliseconds since the last commit, or [`INVALID_AGE`](crate::INVALID_AGE).
    pub fn age(&self, clock: &impl Clock) -> u32 {
        self.cell.age(clock)
    }

    /// Reads the committed text and clears the updated flag.
    pub fn value(&mut self) -> &str {
        self.cell.value_ref()
    }

    /// Copies the term into the staged text, dropping what does not fit.
    fn stage(&mut self, term: &str) {
        let staged = self.cell.staged_mut();
        staged.clear();
        for c in term.chars() {
            if staged.push(c).is_err() {
                break;
            }
        }
    }
}

/// Fixed-capacity, sorted set of custom fields.
#[derive(Debug, Clone)]
pub struct Registry<const N: usize> {
    fields: Vec<CustomField, N>,
    head: Option<u8>,
    window: Option<u8>,
}

impl<const N: usize> Default for Registry<N> {
    fn default() -> Self {
        Registry::new()
    }
}

impl<const N: usize> Registry<N> {
    pub const fn new() -> Self {
        Registry {
            fields: Vec::new(),
            head: None,
            window: None,
        }
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Adds a field for term `term_index` of sentence `sentence`.
    ///
    /// The field is spliced in front of the first entry that does not order
    /// before it, so fields with the same key keep their registration order.
    pub fn register(
        &mut self,
        sentence: &str,
        term_index: u8,
    ) -> Result<CustomFieldId, RegistryError> {
        if term_index == 0 {
            return Err(RegistryError::ZeroTermIndex);
        }
        let name = SentenceName::try_from(sentence).map_err(|_| RegistryError::NameTooLong)?;
        let slot = u8::try_from(self.fields.len()).map_err(|_| RegistryError::Full)?;

        let mut prev = None;
        let mut cur = self.head;
        while let Some(idx) = cur {
            let field = &self.fields[usize::from(idx)];
            if (field.sentence.as_str(), field.term_index) >= (sentence, term_index) {
                break;
            }
            prev = Some(idx);
            cur = field.next;
        }

        self.fields
            .push(CustomField {
                sentence: name,
                term_index,
                cell: Field::default(),
                next: cur,
            })
            .map_err(|_| RegistryError::Full)?;

        match prev {
            Some(prev) => self.fields[usize::from(prev)].next = Some(slot),
            None => self.head = Some(slot),
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("custom field #{} registered for {}:{}", slot, sentence, term_index);

        Ok(CustomFieldId(slot))
    }

    pub fn get(&self, id: CustomFieldId) -> Option<&CustomField> {
        self.fields.get(usize::from(id.0))
    }

    pub fn get_mut(&mut self, id: CustomFieldId) -> Option<&mut CustomField> {
        self.fields.get_mut(usize::from(id.0))
    }

    /// Fields in registry order: by sentence name, then term index.
    pub fn iter(&self) -> impl Iterator<Item = &CustomField> {
        core::iter::successors(self.head.map(|idx| &self.fields[usize::from(idx)]), |field| {
            field.next.map(|idx| &self.fields[usize::from(idx)])
        })
    }

    /// Opens the candidate window for a sentence identifier.
    ///
    /// The window starts at the first field whose name is not less than
    /// `sentence`; when that name is not an exact match the sentence has no
    /// candidates.
    pub(crate) fn begin_sentence(&mut self, sentence: &str) {
        let mut cur = self.head;
        while let Some(idx) = cur {
            let field = &self.fields[usize::from(idx)];
            if field.sentence.as_str() >= sentence {
                break;
            }
            cur = field.next;
        }

        self.window = cur.filter(|&idx| self.fields[usize::from(idx)].sentence.as_str() == sentence);
    }

    /// Stages `term` into every candidate listening to `term_index`.
    pub(crate) fn stage(&mut self, term_index: u8, term: &str) {
        let Some(start) = self.window else {
            return;
        };

        let mut cur = Some(start);
        while let Some(idx) = cur {
            let idx = usize::from(idx);
            if self.fields[idx].sentence != self.fields[usize::from(start)].sentence
                || self.fields[idx].term_index > term_index
            {
                break;
            }
            if self.fields[idx].term_index == term_index {
                self.fields[idx].stage(term);
            }
            cur = self.fields[idx].next;
        }
    }

    /// Commits every candidate of the current sentence.
    pub(crate) fn commit_window(&mut self, now_ms: u32) {
        let Some(start) = self.window else {
            return;
        };

        let mut cur = Some(start);
        while let Some(idx) = cur {
            let idx = usize::from(idx);
            if self.fields[idx].sentence != self.fields[usize::from(start)].sentence {
                break;
            }
            self.fields[idx].cell.commit(now_ms);
            cur = self.fields[idx].next;
        }
    }

    /// Restages the committed text of every candidate and closes the window.
    pub(crate) fn discard_window(&mut self) {
        let Some(start) = self.window.take() else {
            return;
        };

        let mut cur = Some(start);
        while let Some(idx) = cur {
            let idx = usize::from(idx);
            if self.fields[idx].sentence != self.fields[usize::from(start)].sentence {
                break;
            }
            self.fields[idx].cell.discard();
            cur = self.fields[idx].next;
        }
    }
}

impl<const N: usize> Index<CustomFieldId> for Registry<N> {
    type Output = CustomField;

    fn index(&self, id: CustomFieldId) -> &CustomField {
        &self.fields[usize::from(id.0)]
    }
}

impl<const N: usize> IndexMut<CustomFieldId> for Registry<N> {
    fn index_mut(&mut self, id: CustomFieldId) -> &mut CustomField {
        &mut self.fields[usize::from(id.0)]
    }
}
