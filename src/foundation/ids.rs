/// Compact handle to an element in the host tree.
///
/// Handles are only meaningful for the document that issued them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Index into an arena-backed node table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
