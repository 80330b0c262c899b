// SPDX-License-Identifier: GPL-3.0-only

//! The filter registry: a fixed mapping from filter names to effect
//! descriptors.
//!
//! The registry is closed and immutable: exactly ten entries, defined at
//! compile time, iterated in definition order. The same descriptor drives
//! the live preview and the still capturer, so a captured photo always
//! matches what the preview showed.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Available visual filters
///
/// `ALL` preserves definition order, which is also the order the selection
/// UI presents the filters in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// No filter applied
    #[default]
    Normal,
    /// Brightened image
    Bright,
    /// Darkened image
    Dark,
    /// Lowered contrast with a saturation lift
    Soft,
    /// Heavily boosted saturation
    Vibrant,
    /// Warm sepia tint
    Warm,
    /// Blue color temperature via hue rotation
    Cool,
    /// Slight blur for skin smoothing
    Smooth,
    /// Boosted contrast
    Sharp,
    /// Full grayscale
    BlackWhite,
}

impl FilterType {
    /// All filters in definition order
    pub const ALL: [FilterType; 10] = [
        FilterType::Normal,
        FilterType::Bright,
        FilterType::Dark,
        FilterType::Soft,
        FilterType::Vibrant,
        FilterType::Warm,
        FilterType::Cool,
        FilterType::Smooth,
        FilterType::Sharp,
        FilterType::BlackWhite,
    ];

    /// Display name for the filter
    pub fn name(&self) -> &'static str {
        match self {
            FilterType::Normal => "Normal",
            FilterType::Bright => "Bright",
            FilterType::Dark => "Dark",
            FilterType::Soft => "Soft",
            FilterType::Vibrant => "Vibrant",
            FilterType::Warm => "Warm",
            FilterType::Cool => "Cool",
            FilterType::Smooth => "Smooth",
            FilterType::Sharp => "Sharp",
            FilterType::BlackWhite => "BlackWhite",
        }
    }

    /// Look up a filter by its registry name
    ///
    /// Fails with [`AppError::UnknownFilter`] for names outside the closed
    /// set. This should be unreachable when the caller sources names from
    /// [`FilterType::ALL`].
    pub fn from_name(name: &str) -> AppResult<Self> {
        FilterType::ALL
            .iter()
            .find(|f| f.name() == name)
            .copied()
            .ok_or_else(|| AppError::UnknownFilter(name.to_string()))
    }

    /// The effect descriptor registered for this filter
    pub fn descriptor(&self) -> &'static EffectDescriptor {
        match self {
            FilterType::Normal => &NORMAL,
            FilterType::Bright => &BRIGHT,
            FilterType::Dark => &DARK,
            FilterType::Soft => &SOFT,
            FilterType::Vibrant => &VIBRANT,
            FilterType::Warm => &WARM,
            FilterType::Cool => &COOL,
            FilterType::Smooth => &SMOOTH,
            FilterType::Sharp => &SHARP,
            FilterType::BlackWhite => &BLACK_WHITE,
        }
    }

    /// Next filter in definition order, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous filter in definition order, wrapping around
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A composable description of a visual transform
///
/// Components apply in a fixed order: brightness, contrast, saturate,
/// sepia, hue rotation, grayscale (all per-pixel), then blur (spatial).
/// Neutral values leave the image unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectDescriptor {
    /// Linear channel multiplier (1.0 = neutral)
    pub brightness: f32,
    /// Contrast around mid-gray (1.0 = neutral)
    pub contrast: f32,
    /// Saturation relative to luminance (1.0 = neutral)
    pub saturate: f32,
    /// Sepia tint amount (0.0 = none, 1.0 = full)
    pub sepia: f32,
    /// Hue rotation in degrees (0.0 = none)
    pub hue_rotate_deg: f32,
    /// Gaussian-ish box blur radius in pixels (0.0 = none)
    pub blur_px: f32,
    /// Grayscale amount (0.0 = none, 1.0 = full)
    pub grayscale: f32,
}

const NORMAL: EffectDescriptor = EffectDescriptor::IDENTITY;
const BRIGHT: EffectDescriptor = EffectDescriptor {
    brightness: 1.4,
    ..EffectDescriptor::IDENTITY
};
const DARK: EffectDescriptor = EffectDescriptor {
    brightness: 0.6,
    ..EffectDescriptor::IDENTITY
};
const SOFT: EffectDescriptor = EffectDescriptor {
    contrast: 0.8,
    saturate: 1.2,
    ..EffectDescriptor::IDENTITY
};
const VIBRANT: EffectDescriptor = EffectDescriptor {
    saturate: 1.8,
    ..EffectDescriptor::IDENTITY
};
const WARM: EffectDescriptor = EffectDescriptor {
    sepia: 0.4,
    ..EffectDescriptor::IDENTITY
};
const COOL: EffectDescriptor = EffectDescriptor {
    hue_rotate_deg: 200.0,
    ..EffectDescriptor::IDENTITY
};
const SMOOTH: EffectDescriptor = EffectDescriptor {
    blur_px: 1.0,
    ..EffectDescriptor::IDENTITY
};
const SHARP: EffectDescriptor = EffectDescriptor {
    contrast: 1.4,
    ..EffectDescriptor::IDENTITY
};
const BLACK_WHITE: EffectDescriptor = EffectDescriptor {
    grayscale: 1.0,
    ..EffectDescriptor::IDENTITY
};

impl EffectDescriptor {
    /// The no-op descriptor
    pub const IDENTITY: EffectDescriptor = EffectDescriptor {
        brightness: 1.0,
        contrast: 1.0,
        saturate: 1.0,
        sepia: 0.0,
        hue_rotate_deg: 0.0,
        blur_px: 0.0,
        grayscale: 0.0,
    };

    /// Whether this descriptor leaves pixels unchanged
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Apply the per-pixel color components to one normalized RGB value
    ///
    /// Blur is spatial and handled separately by [`apply_rgba`]; at terminal
    /// preview resolution a sub-pixel blur radius is below cell size, so the
    /// preview samples through this function alone.
    ///
    /// [`apply_rgba`]: EffectDescriptor::apply_rgba
    pub fn shade(&self, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
        let (mut r, mut g, mut b) = (r, g, b);

        if self.brightness != 1.0 {
            r *= self.brightness;
            g *= self.brightness;
            b *= self.brightness;
        }

        if self.contrast != 1.0 {
            r = (r - 0.5) * self.contrast + 0.5;
            g = (g - 0.5) * self.contrast + 0.5;
            b = (b - 0.5) * self.contrast + 0.5;
        }

        if self.saturate != 1.0 {
            let lum = luminance(r, g, b);
            r = lum + (r - lum) * self.saturate;
            g = lum + (g - lum) * self.saturate;
            b = lum + (b - lum) * self.saturate;
        }

        if self.sepia > 0.0 {
            let sr = 0.393 * r + 0.769 * g + 0.189 * b;
            let sg = 0.349 * r + 0.686 * g + 0.168 * b;
            let sb = 0.272 * r + 0.534 * g + 0.131 * b;
            r += (sr - r) * self.sepia;
            g += (sg - g) * self.sepia;
            b += (sb - b) * self.sepia;
        }

        if self.hue_rotate_deg != 0.0 {
            let rad = self.hue_rotate_deg.to_radians();
            let (sin, cos) = rad.sin_cos();
            // Standard hue rotation matrix around the luminance axis
            let nr = (0.213 + cos * 0.787 - sin * 0.213) * r
                + (0.715 - cos * 0.715 - sin * 0.715) * g
                + (0.072 - cos * 0.072 + sin * 0.928) * b;
            let ng = (0.213 - cos * 0.213 + sin * 0.143) * r
                + (0.715 + cos * 0.285 + sin * 0.140) * g
                + (0.072 - cos * 0.072 - sin * 0.283) * b;
            let nb = (0.213 - cos * 0.213 - sin * 0.787) * r
                + (0.715 - cos * 0.715 + sin * 0.715) * g
                + (0.072 + cos * 0.928 + sin * 0.072) * b;
            r = nr;
            g = ng;
            b = nb;
        }

        if self.grayscale > 0.0 {
            let lum = luminance(r, g, b);
            r += (lum - r) * self.grayscale;
            g += (lum - g) * self.grayscale;
            b += (lum - b) * self.grayscale;
        }

        (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Apply the per-pixel components to an 8-bit RGB value
    pub fn shade_u8(&self, r: u8, g: u8, b: u8) -> (u8, u8, u8) {
        let (r, g, b) = self.shade(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        );
        ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    /// Apply the full effect (color components plus blur) to a tightly
    /// packed RGBA buffer in place
    ///
    /// Alpha is left untouched.
    pub fn apply_rgba(&self, data: &mut [u8], width: u32, height: u32) {
        if self.is_identity() {
            return;
        }

        for px in data.chunks_exact_mut(4) {
            let (r, g, b) = self.shade_u8(px[0], px[1], px[2]);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        }

        if self.blur_px > 0.0 {
            let radius = self.blur_px.ceil() as i64;
            box_blur_rgba(data, width, height, radius);
        }
    }
}

/// BT.601 luminance, matching the rest of the capture path
#[inline]
fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Separable box blur over a tightly packed RGBA buffer
///
/// Edge pixels clamp to the border. Alpha is blurred along with color,
/// which is correct for the opaque frames the camera produces.
fn box_blur_rgba(data: &mut [u8], width: u32, height: u32, radius: i64) {
    if radius <= 0 || width == 0 || height == 0 {
        return;
    }
    let w = width as i64;
    let h = height as i64;
    let window = (radius * 2 + 1) as u32;

    // Horizontal pass
    let src = data.to_vec();
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u32; 4];
            for dx in -radius..=radius {
                let sx = (x + dx).clamp(0, w - 1);
                let idx = ((y * w + sx) * 4) as usize;
                for c in 0..4 {
                    acc[c] += src[idx + c] as u32;
                }
            }
            let idx = ((y * w + x) * 4) as usize;
            for c in 0..4 {
                data[idx + c] = (acc[c] / window) as u8;
            }
        }
    }

    // Vertical pass
    let src = data.to_vec();
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u32; 4];
            for dy in -radius..=radius {
                let sy = (y + dy).clamp(0, h - 1);
                let idx = ((sy * w + x) * 4) as usize;
                for c in 0..4 {
                    acc[c] += src[idx + c] as u32;
                }
            }
            let idx = ((y * w + x) * 4) as usize;
            for c in 0..4 {
                data[idx + c] = (acc[c] / window) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_ten_filters() {
        assert_eq!(FilterType::ALL.len(), 10);
    }

    #[test]
    fn test_registry_order_is_stable() {
        let names: Vec<&str> = FilterType::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            [
                "Normal",
                "Bright",
                "Dark",
                "Soft",
                "Vibrant",
                "Warm",
                "Cool",
                "Smooth",
                "Sharp",
                "BlackWhite"
            ]
        );
    }

    #[test]
    fn test_from_name_roundtrip() {
        for filter in FilterType::ALL {
            assert_eq!(FilterType::from_name(filter.name()).unwrap(), filter);
        }
    }

    #[test]
    fn test_unknown_filter_fails_loudly() {
        let err = FilterType::from_name("Glow").unwrap_err();
        assert!(matches!(err, AppError::UnknownFilter(ref name) if name == "Glow"));
    }

    #[test]
    fn test_normal_is_identity() {
        assert!(FilterType::Normal.descriptor().is_identity());
        assert_eq!(
            FilterType::Normal.descriptor().shade(0.2, 0.4, 0.6),
            (0.2, 0.4, 0.6)
        );
    }

    #[test]
    fn test_sharp_contrast_value() {
        let desc = FilterType::Sharp.descriptor();
        assert_eq!(desc.contrast, 1.4);
        assert_eq!(desc.brightness, 1.0);
        assert_eq!(desc.saturate, 1.0);
        assert_eq!(desc.grayscale, 0.0);
    }

    #[test]
    fn test_descriptor_values_match_design() {
        assert_eq!(FilterType::Bright.descriptor().brightness, 1.4);
        assert_eq!(FilterType::Dark.descriptor().brightness, 0.6);
        assert_eq!(FilterType::Soft.descriptor().contrast, 0.8);
        assert_eq!(FilterType::Soft.descriptor().saturate, 1.2);
        assert_eq!(FilterType::Vibrant.descriptor().saturate, 1.8);
        assert_eq!(FilterType::Warm.descriptor().sepia, 0.4);
        assert_eq!(FilterType::Cool.descriptor().hue_rotate_deg, 200.0);
        assert_eq!(FilterType::Smooth.descriptor().blur_px, 1.0);
        assert_eq!(FilterType::BlackWhite.descriptor().grayscale, 1.0);
    }

    #[test]
    fn test_grayscale_equalizes_channels() {
        let (r, g, b) = FilterType::BlackWhite.descriptor().shade(0.9, 0.2, 0.5);
        assert!((r - g).abs() < 1e-6);
        assert!((g - b).abs() < 1e-6);
    }

    #[test]
    fn test_brightness_scales_channels() {
        let (r, g, b) = FilterType::Bright.descriptor().shade(0.5, 0.25, 0.1);
        assert!((r - 0.7).abs() < 1e-6);
        assert!((g - 0.35).abs() < 1e-6);
        assert!((b - 0.14).abs() < 1e-6);
    }

    #[test]
    fn test_shade_clamps_output() {
        let (r, _, _) = FilterType::Bright.descriptor().shade(0.9, 0.9, 0.9);
        assert_eq!(r, 1.0);
    }

    #[test]
    fn test_blur_preserves_buffer_layout() {
        let mut data = vec![0u8; 8 * 8 * 4];
        // single white pixel in the middle of a black frame
        let center = (4 * 8 + 4) * 4;
        data[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

        FilterType::Smooth.descriptor().apply_rgba(&mut data, 8, 8);

        assert_eq!(data.len(), 8 * 8 * 4);
        // energy spread to a neighbor
        let neighbor = (4 * 8 + 5) * 4;
        assert!(data[neighbor] > 0);
    }

    #[test]
    fn test_filter_cycling_wraps() {
        assert_eq!(FilterType::Normal.prev(), FilterType::BlackWhite);
        assert_eq!(FilterType::BlackWhite.next(), FilterType::Normal);

        let mut f = FilterType::Normal;
        for _ in 0..FilterType::ALL.len() {
            f = f.next();
        }
        assert_eq!(f, FilterType::Normal);
    }
}
