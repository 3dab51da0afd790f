//! Fibonacci ratio tables (Immutable Blueprints)
//!
//! Retracement tables stay below 1.0 and extension tables at or above 1.0, except for the
//! variant tables that describe flats and diagonals.

pub mod retracement {
    pub const W2: &[f64] = &[0.382, 0.5, 0.618, 0.786];
    pub const W4: &[f64] = &[0.236, 0.382, 0.5];
    pub const A: &[f64] = &[0.382, 0.5, 0.618];
    pub const B: &[f64] = &[0.382, 0.5, 0.618, 0.786];
    pub const PRECURSOR: &[f64] = &[0.236, 0.382, 0.5, 0.618];
}

pub mod extension {
    pub const W3: &[f64] = &[1.382, 1.618, 2.0, 2.618];
    pub const W5: &[f64] = &[1.0, 1.236, 1.618];
    pub const C: &[f64] = &[1.0, 1.236, 1.618];
    pub const Y: &[f64] = &[1.0, 1.272, 1.618];
}

/// Tables selected by an externally resolved correction or diagonal type.
pub mod variant {
    // Flat B waves retrace most or all of A, sometimes beyond.
    pub const FLAT_B: &[f64] = &[0.9, 1.0, 1.236];
    pub const FLAT_C: &[f64] = &[1.0, 1.272, 1.618];
    pub const ZIGZAG_C: &[f64] = &[1.0, 1.236, 1.618];
    pub const CONTRACTING_W5: &[f64] = &[0.618, 0.786];
    pub const EXPANDING_W5: &[f64] = &[1.236, 1.618];
}

/// Wave-3 targets for a nested 1-2 setup, measured off the highest degree's wave 1.
pub mod nested {
    pub const TWO_DEGREES: &[f64] = &[1.618, 2.618, 3.618];
    pub const THREE_OR_MORE: &[f64] = &[2.618, 3.618, 4.236];
}
