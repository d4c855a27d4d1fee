/// Device independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

/// Scaled pixels, used for text and text-relative spacing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Sp(pub f32);

/// Converts `Dp` and `Sp` into physical pixels for the current window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub px_per_dp: f32,
    pub px_per_sp: f32,
}

impl Metric {
    pub fn new(scale_factor: f64) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor as f32
        } else {
            1.0
        };
        Metric {
            px_per_dp: scale,
            px_per_sp: scale,
        }
    }

    pub fn dp(&self, v: Dp) -> f32 {
        (v.0 * self.px_per_dp).round()
    }

    pub fn sp(&self, v: Sp) -> f32 {
        (v.0 * self.px_per_sp).round()
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::new(1.0)
    }
}
