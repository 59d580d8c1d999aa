//! Easing curves for tweens.
//!
//! Every curve maps progress in `[0, 1]` onto an interpolation factor with
//! `apply(0) == 0` and `apply(1) == 1` exactly. In between the factor may
//! overshoot (`BackOut`, `ElasticOut`).

use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Ease {
    /// Constant speed
    #[default]
    None,
    /// Cubic deceleration
    Power2Out,
    /// Quartic deceleration
    Power3Out,
    /// Slow start and end
    SineInOut,
    /// Overshoots the end by an amount controlled by `overshoot`, then settles
    BackOut(f64),
    /// Decaying oscillation around the end value
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    pub const BACK: f64 = 1.70158;

    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::None => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Ease::BackOut(s) => {
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
            Ease::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    let a = amplitude.max(1.0);
    let p = period / amplitude.min(1.0).max(f64::EPSILON);
    let shift = p / (2.0 * PI) * (1.0 / a).asin();
    a * 2f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI / p)).sin() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 6] = [
        Ease::None,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::SineInOut,
        Ease::BackOut(1.1),
        Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.6,
        },
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
            assert_eq!(ease.apply(-3.0), 0.0, "{ease:?}");
            assert_eq!(ease.apply(7.0), 1.0, "{ease:?}");
        }
    }

    #[test]
    fn test_out_curves_lead_linear() {
        assert!(Ease::Power2Out.apply(0.5) > 0.5);
        assert!(Ease::Power3Out.apply(0.5) > Ease::Power2Out.apply(0.5));
        assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_back_overshoots() {
        let max = (1..100)
            .map(|i| Ease::BackOut(Ease::BACK).apply(i as f64 / 100.0))
            .fold(0.0, f64::max);
        assert!(max > 1.0);
    }

    #[test]
    fn test_elastic_starts_near_zero() {
        let e = Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.6,
        };
        assert!(e.apply(1e-9).abs() < 1e-6);
        assert!((e.apply(0.99) - 1.0).abs() < 0.01);
    }
}
