//! Field buffers and the store that owns one buffer per status field

use std::borrow::Cow;
use std::fmt;

/// Capacity of a field buffer, terminator slot included
pub const FIELD_CAPACITY: usize = 32;

/// The status fields, in the order they are rendered.
///
/// The discriminant doubles as the bit position a trigger client sets to
/// request a refresh of that field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Field {
    Time = 0,
    Load,
    Temp,
    Volume,
    Memory,
    Governor,
    Date,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Time,
        Field::Load,
        Field::Temp,
        Field::Volume,
        Field::Memory,
        Field::Governor,
        Field::Date,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Load => "load",
            Field::Temp => "temp",
            Field::Volume => "volume",
            Field::Memory => "memory",
            Field::Governor => "governor",
            Field::Date => "date",
        }
    }
}

/// Fixed-capacity byte buffer.
///
/// Holds at most `CAP - 1` bytes so the contents always fit a terminated
/// C-style slot of `CAP` bytes. Writes are clamped, never rejected.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BoundedBuf<const CAP: usize> {
    bytes: [u8; CAP],
    len: usize,
}

/// Buffer type backing every status field
pub type FieldBuf = BoundedBuf<FIELD_CAPACITY>;

impl<const CAP: usize> BoundedBuf<CAP> {
    pub const fn new() -> Self {
        Self {
            bytes: [0; CAP],
            len: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Longest value the buffer can hold
    pub const fn max_len(&self) -> usize {
        CAP.saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Lossy view for rendering; truncation may split a multi-byte character
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    pub fn clear(&mut self) {
        self.bytes.fill(0);
        self.len = 0;
    }

    /// Replace the contents, clamping to `max_len`. A trailing newline is
    /// stripped and embedded newlines become spaces.
    pub fn write(&mut self, bytes: &[u8]) {
        self.clear();
        self.push_bytes(bytes);
    }

    /// Append to the current contents. Returns how many bytes were kept.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        let before = self.len;
        let spare = self.spare_mut();
        let n = spare.len().min(bytes.len());
        spare[..n].copy_from_slice(&bytes[..n]);
        self.advance(n);
        self.normalize_newlines();
        self.len.saturating_sub(before)
    }

    pub fn push_str(&mut self, s: &str) -> usize {
        self.push_bytes(s.as_bytes())
    }

    /// Strip one trailing newline, then turn any newline left inside the
    /// value into a space so the field stays on one line
    pub fn normalize_newlines(&mut self) {
        if self.len > 0 && self.bytes[self.len - 1] == b'\n' {
            self.len -= 1;
            self.bytes[self.len] = 0;
        }
        for b in &mut self.bytes[..self.len] {
            if *b == b'\n' {
                *b = b' ';
            }
        }
    }

    /// Unfilled part of the buffer, excluding the terminator slot
    pub(crate) fn spare_mut(&mut self) -> &mut [u8] {
        let end = self.max_len();
        let start = self.len.min(end);
        &mut self.bytes[start..end]
    }

    /// Mark `n` bytes of the spare region as filled
    pub(crate) fn advance(&mut self, n: usize) {
        self.len = (self.len + n).min(self.max_len());
    }
}

impl<const CAP: usize> Default for BoundedBuf<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> fmt::Display for BoundedBuf<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl<const CAP: usize> fmt::Debug for BoundedBuf<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBuf")
            .field("capacity", &CAP)
            .field("value", &self.as_str())
            .finish()
    }
}

/// One buffer per field, indexed by field position.
///
/// Only the daemon thread touches the store, so it is a plain owned value.
#[derive(Debug, Clone)]
pub struct FieldStore {
    slots: Vec<FieldBuf>,
}

impl FieldStore {
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![FieldBuf::new(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FieldBuf> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FieldBuf> {
        self.slots.get_mut(index)
    }

    pub fn clear(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.clear();
        }
    }

    pub fn write(&mut self, index: usize, bytes: &[u8]) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.write(bytes);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldBuf> {
        self.slots.iter()
    }
}
