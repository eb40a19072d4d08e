use crate::qso::QsoRecord;

/// Finalized records in append order, with an optional edit cursor.
#[derive(Debug, Default)]
pub struct QsoStack {
    records: Vec<QsoRecord>,
    edit_pos: Option<usize>,
}

impl QsoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `rec` and returns its index.
    pub fn push(&mut self, rec: QsoRecord) -> usize {
        self.records.push(rec);
        self.records.len() - 1
    }

    /// Overwrites the slot at `pos`. Returns false when out of range.
    pub fn replace(&mut self, pos: usize, rec: QsoRecord) -> bool {
        match self.records.get_mut(pos) {
            Some(slot) => {
                *slot = rec;
                true
            }
            None => false,
        }
    }

    /// Removes the entry at `pos`; the edit cursor is dropped.
    pub fn remove(&mut self, pos: usize) -> Option<QsoRecord> {
        if pos >= self.records.len() {
            return None;
        }
        self.edit_pos = None;
        Some(self.records.remove(pos))
    }

    /// Removes the oldest entry.
    pub fn pop_front(&mut self) -> Option<QsoRecord> {
        self.remove(0)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.edit_pos = None;
    }

    pub fn get(&self, pos: usize) -> Option<&QsoRecord> {
        self.records.get(pos)
    }

    pub fn as_slice(&self) -> &[QsoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn edit_pos(&self) -> Option<usize> {
        self.edit_pos
    }

    pub fn deselect(&mut self) {
        self.edit_pos = None;
    }

    /// Moves the cursor back one slot, wrapping to the newest record.
    pub fn select_prev(&mut self) -> Option<usize> {
        if self.records.is_empty() {
            return None;
        }
        let last = self.records.len() - 1;
        let pos = match self.edit_pos {
            None | Some(0) => last,
            Some(p) => (p - 1).min(last),
        };
        self.edit_pos = Some(pos);
        Some(pos)
    }

    /// Moves the cursor forward one slot, wrapping to the oldest record.
    pub fn select_next(&mut self) -> Option<usize> {
        if self.records.is_empty() {
            return None;
        }
        let last = self.records.len() - 1;
        let pos = match self.edit_pos {
            Some(p) if p < last => p + 1,
            _ => 0,
        };
        self.edit_pos = Some(pos);
        Some(pos)
    }
}
