//! Arc color palette
//!
//! Fifteen soothing hues, cycled when the population outgrows the table.

/// Opaque display color (CSS hex string)
pub type Color = &'static str;

/// Color palette with soothing variations
pub const PALETTE: [Color; 15] = [
    "#66b2b2", // Sea foam teal
    "#9b59b6", // Amethyst purple
    "#3498db", // Bright blue
    "#1abc9c", // Medium spring green
    "#e74c3c", // Soft crimson
    "#f39c12", // Amber
    "#8e44ad", // Deep purple
    "#16a085", // Deep teal
    "#d35400", // Burnt orange
    "#2980b9", // Strong blue
    "#2c3e50", // Dark slate
    "#27ae60", // Nephritis green
    "#c0392b", // Dark red
    "#7d3c98", // Royal purple
    "#2574a9", // Steel blue
];

/// Color of the central impact-axis line
pub const CENTRAL_LINE_COLOR: Color = "#4dd0e1";

/// Color for the arc at `index`, cycling past the end of the palette
#[inline]
pub fn color_for(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}
