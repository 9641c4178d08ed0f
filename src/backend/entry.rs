//! Store Entry Module
//!
//! Defines the two kinds of value a backend key can hold.

// == Entry ==
/// A single key's value: either a byte string or a list of byte strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Plain value written by `set` or `incr`
    Bytes(Vec<u8>),
    /// Ordered list built by `rpush`
    List(Vec<Vec<u8>>),
}

impl Entry {
    // == Kind ==
    /// Short name of the entry kind, used in wrong-type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Bytes(_) => "string",
            Entry::List(_) => "list",
        }
    }

    // == Size ==
    /// Number of payload bytes held by the entry.
    pub fn size(&self) -> usize {
        match self {
            Entry::Bytes(bytes) => bytes.len(),
            Entry::List(items) => items.iter().map(Vec::len).sum(),
        }
    }
}

// == Range Resolution ==
/// Resolves inclusive, possibly negative `start..=stop` bounds against a
/// list of `len` items.
///
/// Negative indices count from the end (`-1` is the last item). Returns
/// `None` when the resolved range is empty.
pub fn resolve_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    if len == 0 {
        return None;
    }

    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len || stop < 0 {
        return None;
    }

    Some((start as usize, stop as usize))
}
