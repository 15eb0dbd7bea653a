//! Geometry
//!
//! Offset box of an element. Layout is not computed here; whoever lays the
//! page out writes these values through `DomTree::set_geometry`.

/// Element geometry state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementGeometry {
    // Offset properties (relative to offsetParent)
    pub offset_top: f64,
    pub offset_left: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

impl ElementGeometry {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            offset_left: x,
            offset_top: y,
            offset_width: width,
            offset_height: height,
        }
    }

    /// Whether the element occupies a layout box at all
    pub fn has_box(&self) -> bool {
        self.offset_width > 0.0 || self.offset_height > 0.0
    }
}
