/// Layer filtering for entity discovery and registration.

use bitflags::bitflags;

bitflags! {
    /// Bitmask over the 32 scene layers.
    ///
    /// Bit `n` selects layer `n`. Only layer 0 carries a name;
    /// any other bit is still a valid layer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        const DEFAULT = 1 << 0;

        const _ = !0;
    }
}

impl LayerMask {
    /// Mask selecting a single layer index (0..32).
    pub fn from_layer(layer: u32) -> Self {
        if layer < 32 {
            Self::from_bits_retain(1 << layer)
        } else {
            Self::empty()
        }
    }

    /// Whether the layer index passes this mask.
    pub fn includes_layer(self, layer: u32) -> bool {
        layer < 32 && self.bits() & (1 << layer) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::all()
    }
}
