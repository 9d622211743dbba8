use crate::error::BuildError;
use crate::tree::SegmentTree;
use crate::utils::DEFAULT_MAX_LEN;

/// Configures a [`SegmentTree`] before building it.
///
/// The only knob is the length cap; [`SegmentTree::build`] is the shorthand
/// for the default cap of [`DEFAULT_MAX_LEN`].
pub struct SegmentTreeBuilder<'a> {
    values: &'a [f64],
    max_len: Option<usize>,
}

impl<'a> SegmentTreeBuilder<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        Self {
            values,
            max_len: None,
        }
    }

    /// Override the maximum accepted input length.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn build(self) -> Result<SegmentTree, BuildError> {
        let max_len = self.max_len.unwrap_or(DEFAULT_MAX_LEN);
        SegmentTree::with_max_len(self.values, max_len)
    }
}
