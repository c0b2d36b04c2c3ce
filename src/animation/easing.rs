use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Easing curves mapping raw progress in [0, 1] to eased progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    Bounce,
}

impl Easing {
    pub const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Bounce,
    ];

    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Bounce => bounce_out(t),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "easeIn",
            Easing::EaseOut => "easeOut",
            Easing::EaseInOut => "easeInOut",
            Easing::Bounce => "bounce",
        }
    }
}

/// Standard bounce-out curve
fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| format!("unknown easing '{}'", s))
    }
}

/// Linear interpolation between `start` and `end`
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_endpoints() {
        for easing in Easing::ALL {
            assert!(close(easing.apply(0.0), 0.0), "{} at 0", easing);
            assert!(close(easing.apply(1.0), 1.0), "{} at 1", easing);
        }
    }

    #[test]
    fn test_quadratic_curves() {
        assert!(close(Easing::Linear.apply(0.3), 0.3));
        assert!(close(Easing::EaseIn.apply(0.5), 0.25));
        assert!(close(Easing::EaseOut.apply(0.5), 0.75));
        assert!(close(Easing::EaseInOut.apply(0.25), 0.125));
        assert!(close(Easing::EaseInOut.apply(0.5), 0.5));
        assert!(close(Easing::EaseInOut.apply(0.75), 0.875));
    }

    #[test]
    fn test_bounce_segments() {
        // First segment: 7.5625 * t^2
        assert!(close(Easing::Bounce.apply(0.2), 7.5625 * 0.04));
        // Each segment lands on its plateau at the offset point
        assert!(close(Easing::Bounce.apply(1.5 / 2.75), 0.75));
        assert!(close(Easing::Bounce.apply(2.25 / 2.75), 0.9375));
        assert!(close(Easing::Bounce.apply(2.625 / 2.75), 0.984375));
        // Continuous at the first threshold
        let t = 1.0 / 2.75;
        assert!((Easing::Bounce.apply(t - 1e-9) - Easing::Bounce.apply(t)).abs() < 1e-6);
    }

    #[test]
    fn test_names_round_trip() {
        for easing in Easing::ALL {
            assert_eq!(easing.name().parse::<Easing>(), Ok(easing));
        }
        assert!("elastic".parse::<Easing>().is_err());
        assert_eq!(Easing::default(), Easing::EaseInOut);
    }

    #[test]
    fn test_lerp() {
        assert!(close(lerp(0.0, 100.0, 0.5), 50.0));
        assert!(close(lerp(10.0, -10.0, 0.25), 5.0));
    }
}
