// Horizontal split geometry - pure logic, no Tauri imports.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-sized rect at the origin. Used to park surfaces of inactive tabs.
    pub fn collapsed() -> Self {
        Self::default()
    }
}

/// Splits `area` into side-by-side columns proportional to `weights`.
///
/// The last column absorbs rounding so the columns always cover `area` exactly.
pub fn split_horizontally(area: Rect, weights: &[f64]) -> Vec<Rect> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return Vec::new();
    }

    let mut columns = Vec::with_capacity(weights.len());
    let mut x = area.x;
    for (i, weight) in weights.iter().enumerate() {
        let width = if i + 1 == weights.len() {
            area.x + area.width - x
        } else {
            (area.width * weight / total).round()
        };
        columns.push(Rect::new(x, area.y, width, area.height));
        x += width;
    }
    columns
}

/// Moves the boundary between column `divider` and `divider + 1` by `delta` pixels.
///
/// Only the two adjacent weights change. Neither column shrinks below `min_width`;
/// if they can't both fit, the weights are left alone.
pub(crate) fn move_divider(
    weights: &mut [f64],
    divider: usize,
    delta: f64,
    total_width: f64,
    min_width: f64,
) {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || total_width <= 0.0 {
        return;
    }
    let px_per_weight = total_width / total;
    let left = weights[divider] * px_per_weight;
    let right = weights[divider + 1] * px_per_weight;
    let pair = left + right;
    if pair < 2.0 * min_width {
        return;
    }

    let new_left = (left + delta).clamp(min_width, pair - min_width);
    weights[divider] = new_left / px_per_weight;
    weights[divider + 1] = (pair - new_left) / px_per_weight;
}
