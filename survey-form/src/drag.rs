/// Tracks the question being dragged in the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    source: Option<usize>,
}

impl DragState {
    pub fn new() -> Self {
        Self { source: None }
    }

    /// Record `index` as the drag source.
    pub fn begin(&mut self, index: usize) {
        self.source = Some(index);
    }

    /// Finish the drag over `target`.
    ///
    /// Returns the `(from, to)` move to apply, or `None` when nothing was being
    /// dragged or the question was dropped on itself. The drag ends either way.
    pub fn complete(&mut self, target: usize) -> Option<(usize, usize)> {
        let source = self.source.take()?;
        (source != target).then_some((source, target))
    }

    /// Abandon the drag without moving anything.
    pub fn cancel(&mut self) {
        self.source = None;
    }

    pub fn source(&self) -> Option<usize> {
        self.source
    }

    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }
}
