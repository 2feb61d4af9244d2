use super::{RenderCommand, RenderCommandList};

/// The compiled work of one or more render targets: an ordered sequence of
/// command lists, processed front to back.
#[derive(Debug, Default)]
pub struct RenderCommandBuffer {
    slots: Vec<RenderCommandList>,
}

impl RenderCommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: Vec<RenderCommandList>) -> Self {
        Self { slots }
    }

    /// Append a list as the last slot. Empty lists are kept so slot
    /// positions stay stable for callers that inspect them.
    pub fn push_slot(&mut self, list: RenderCommandList) {
        self.slots.push(list);
    }

    pub fn slots(&self) -> &[RenderCommandList] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<RenderCommandList> {
        self.slots
    }

    /// Move every slot of `other` to the end of this buffer.
    pub fn append(&mut self, mut other: RenderCommandBuffer) {
        self.slots.append(&mut other.slots);
    }

    /// Total commands across all slots.
    pub fn num_commands(&self) -> usize {
        self.slots.iter().map(RenderCommandList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(RenderCommandList::is_empty)
    }

    /// Every command in processing order.
    pub fn commands(&self) -> impl Iterator<Item = &RenderCommand> {
        self.slots.iter().flat_map(RenderCommandList::iter)
    }

    /// Consume the buffer, yielding every command in processing order.
    pub fn into_commands(self) -> impl Iterator<Item = RenderCommand> {
        self.slots.into_iter().flatten()
    }
}
