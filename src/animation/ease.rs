use std::f64::consts::PI;

/// Easing curves mapping normalized time to normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// `t`.
    Linear,
    /// Cubic ease-out.
    EaseOut,
    /// Quadratic ease-in-out.
    #[default]
    EaseInOut,
    /// Exponentially damped overshoot that settles on 1.
    Elastic,
}

impl Ease {
    /// Every curve, in declaration order.
    pub const ALL: [Ease; 4] = [Ease::Linear, Ease::EaseOut, Ease::EaseInOut, Ease::Elastic];

    /// Evaluate the curve; `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::Elastic => {
                // Endpoints are pinned; the formula only approaches them.
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    let c4 = (2.0 * PI) / 3.0;
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
            }
        }
    }
}

impl std::str::FromStr for Ease {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "linear" => Ok(Self::Linear),
            "easeout" => Ok(Self::EaseOut),
            "easeinout" => Ok(Self::EaseInOut),
            "elastic" => Ok(Self::Elastic),
            other => Err(format!("unknown easing '{other}'")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
