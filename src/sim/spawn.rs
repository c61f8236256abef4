//! Weighted spawn-value generation and per-class radius/color tables
//!
//! Spawn values follow a geometric decay over powers of two: value `2^k`
//! carries probability mass `1/2^k`, with the tail of the series folded
//! into the largest allowed value.

use rand::Rng;

use crate::consts::{BALL_RADIUS_STEP, BASE_BALL_RADIUS, MAX_SPAWN_VALUE};
use crate::radius_class;

/// Per-class ball colors (0xRRGGBB), clamped at the last entry for classes
/// beyond the palette
pub const BALL_PALETTE: [u32; 11] = [
    0xe74c3c, // 2
    0xe67e22, // 4
    0xf1c40f, // 8
    0x2ecc71, // 16
    0x1abc9c, // 32
    0x3498db, // 64
    0x9b59b6, // 128
    0xe84393, // 256
    0x34495e, // 512
    0xd35400, // 1024
    0x2c3e50, // 2048
];

/// Draw a spawn value in `[2, max_value]`
///
/// `max_value` must be a power of two >= 2; this is asserted rather than
/// silently mis-distributing.
pub fn spawn_value<R: Rng>(rng: &mut R, max_value: u32) -> u32 {
    assert!(
        max_value >= 2 && max_value.is_power_of_two(),
        "max_value must be a power of two >= 2, got {max_value}"
    );

    let threshold = 1.0 - 1.0 / max_value as f32;
    let draw: f32 = rng.random_range(0.0..threshold);

    let mut cumulative = 0.0f32;
    let mut pow = 1u32;
    while (1u32 << pow) < max_value {
        cumulative += 1.0 / (1u32 << pow) as f32;
        if draw <= cumulative {
            return 1 << pow;
        }
        pow += 1;
    }
    // Tail mass of the geometric series
    max_value
}

/// Draw a spawn value with the default cap
pub fn spawn_value_default<R: Rng>(rng: &mut R) -> u32 {
    spawn_value(rng, MAX_SPAWN_VALUE)
}

/// Physical radius for a radius class (grows linearly)
#[inline]
pub fn radius_for_class(class: u32) -> f32 {
    BASE_BALL_RADIUS + class as f32 * BALL_RADIUS_STEP
}

/// Physical radius for a ball value
#[inline]
pub fn radius_for_value(value: u32) -> f32 {
    radius_for_class(radius_class(value))
}

/// Palette color for a radius class
#[inline]
pub fn color_for_class(class: u32) -> u32 {
    let index = (class as usize).min(BALL_PALETTE.len() - 1);
    BALL_PALETTE[index]
}
