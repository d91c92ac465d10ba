use slotmap::new_key_type;

new_key_type! {
    /// Opaque, generation-checked handle to a node stored in a [`Tree`](crate::Tree).
    pub struct NodeId;

    /// Opaque, generation-checked handle to an entry in an
    /// [`OverlayStack`](crate::OverlayStack).
    pub struct OverlayId;
}
