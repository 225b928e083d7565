/// A byte range requested from the target resource's representation.
///
/// `index == None` designates a suffix range: the last `size` bytes.
/// `size == None` means "up to the end of the representation".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    index: Option<u64>,
    size: Option<u64>,
}

impl Range {
    /// The whole representation.
    pub const ALL: Range = Range { index: Some(0), size: None };

    pub const fn new(index: u64, size: u64) -> Self {
        Self { index: Some(index), size: Some(size) }
    }

    /// From `index` to the end of the representation.
    pub const fn from_index(index: u64) -> Self {
        Self { index: Some(index), size: None }
    }

    /// The last `size` bytes of the representation.
    pub const fn suffix(size: u64) -> Self {
        Self { index: None, size: Some(size) }
    }

    pub fn index(&self) -> Option<u64> {
        self.index
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Returns true if the range covers the whole representation.
    pub fn is_bytes_all(&self) -> bool {
        *self == Range::ALL
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::ALL
    }
}
