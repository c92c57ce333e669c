//! sRGB transfer functions (encoded ↔ linear light).
//!
//! Two variants of the same curve are in use: the IEC 61966-2-1 form used
//! for deficiency simulation, and the WCAG 2.x form whose decode threshold
//! is the historical 0.03928 used by relative luminance.

/// A transfer function that converts between linear and non-linear encodings.
pub trait TransferFunction {
    /// Convert from non-linear (encoded) to linear light.
    fn to_linear(&self, encoded: f64) -> f64;

    /// Convert from linear light to non-linear (encoded).
    fn to_encoded(&self, linear: f64) -> f64;
}

/// sRGB transfer function per IEC 61966-2-1.
///
/// ```text
/// to_linear:   V <= 0.04045 → V / 12.92
///              V >  0.04045 → ((V + 0.055) / 1.055) ^ 2.4
///
/// from_linear: L <= 0.0031308 → L × 12.92
///              L >  0.0031308 → 1.055 × L^(1/2.4) − 0.055
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SrgbTransfer;

impl TransferFunction for SrgbTransfer {
    fn to_linear(&self, encoded: f64) -> f64 {
        if encoded <= 0.04045 {
            encoded / 12.92
        } else {
            ((encoded + 0.055) / 1.055).powf(2.4)
        }
    }

    fn to_encoded(&self, linear: f64) -> f64 {
        if linear <= 0.003_130_8 {
            linear * 12.92
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    }
}

/// sRGB curve as written in WCAG 2.x relative luminance.
///
/// ```text
/// to_linear: V <= 0.03928 → V / 12.92
///            V >  0.03928 → ((V + 0.055) / 1.055) ^ 2.4
/// ```
///
/// The two thresholds differ by less than one 8-bit code value, so the
/// inverse is shared with [`SrgbTransfer`].
#[derive(Debug, Clone, Copy)]
pub struct WcagTransfer;

impl TransferFunction for WcagTransfer {
    fn to_linear(&self, encoded: f64) -> f64 {
        if encoded <= 0.03928 {
            encoded / 12.92
        } else {
            ((encoded + 0.055) / 1.055).powf(2.4)
        }
    }

    fn to_encoded(&self, linear: f64) -> f64 {
        SrgbTransfer.to_encoded(linear)
    }
}
