//! Trajectory control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::TrajCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for trajectory control, the geometry of the robot and of the
/// arcs it follows.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Params {
    /// Distance between the two driven wheels.
    ///
    /// Units: meters
    pub track_width_m: f64,

    /// Radius of the arc followed while correcting a small drift.
    ///
    /// Units: meters
    pub correction_radius_m: f64,

    /// Radius of the arc followed in a sharp turn.
    ///
    /// Units: meters
    pub turn_radius_m: f64,

    /// Radius of the arc followed while leaving a sharp turn.
    ///
    /// Units: meters
    pub exit_radius_m: f64,
}

/// Wheel speed coefficients derived from the geometry.
///
/// Each coefficient is the inner wheel multiplier for one arc, its inverse is
/// the outer wheel multiplier. All lie strictly between 0 and 1.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SpeedCoefs {
    /// Coefficient for drift corrections
    pub correction: f64,

    /// Coefficient for sharp turns
    pub turn: f64,

    /// Coefficient for leaving sharp turns
    pub exit: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Compute the speed coefficients, rejecting geometries where a radius
    /// does not exceed half the track width.
    pub fn speed_coefs(&self) -> Result<SpeedCoefs, TrajCtrlError> {
        if !(self.track_width_m.is_finite() && self.track_width_m > 0.0) {
            return Err(TrajCtrlError::InvalidTrackWidth(self.track_width_m));
        }

        Ok(SpeedCoefs {
            correction: arc_coef("correction", self.correction_radius_m, self.track_width_m)?,
            turn: arc_coef("turn", self.turn_radius_m, self.track_width_m)?,
            exit: arc_coef("exit", self.exit_radius_m, self.track_width_m)?,
        })
    }
}

impl Default for SpeedCoefs {
    /// Unit coefficients, both wheels at the same speed in every state.
    fn default() -> Self {
        Self {
            correction: 1.0,
            turn: 1.0,
            exit: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Inner wheel speed ratio for an arc of the given radius.
fn arc_coef(name: &'static str, radius_m: f64, track_width_m: f64) -> Result<f64, TrajCtrlError> {
    let half_track_m = track_width_m / 2.0;

    if !(radius_m.is_finite() && radius_m > half_track_m) {
        return Err(TrajCtrlError::InvalidGeometry {
            name,
            radius_m,
            half_track_m,
        });
    }

    Ok(((radius_m - half_track_m) / (radius_m + half_track_m)).sqrt())
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use util::maths::approx_eq;

    const TEST_PARAMS: Params = Params {
        track_width_m: 0.2,
        correction_radius_m: 0.6,
        turn_radius_m: 0.5,
        exit_radius_m: 0.3,
    };

    #[test]
    fn test_speed_coefs() {
        let coefs = TEST_PARAMS.speed_coefs().unwrap();

        assert!(approx_eq(coefs.correction, (0.5f64 / 0.7).sqrt(), 1e-12));
        assert!(approx_eq(coefs.turn, (0.4f64 / 0.6).sqrt(), 1e-12));
        assert!(approx_eq(coefs.exit, (0.2f64 / 0.4).sqrt(), 1e-12));

        assert!(approx_eq(coefs.correction, 0.8452, 1e-4));
        assert!(approx_eq(coefs.turn, 0.8165, 1e-4));
        assert!(approx_eq(coefs.exit, 0.7071, 1e-4));
    }

    #[test]
    fn test_coefs_in_unit_interval() {
        let track_widths = [0.05, 0.1, 0.2, 0.35];

        for &w in track_widths.iter() {
            for k in 1..50 {
                let r = w / 2.0 + 0.01 * k as f64;
                let params = Params {
                    track_width_m: w,
                    correction_radius_m: r,
                    turn_radius_m: r * 2.0,
                    exit_radius_m: r * 10.0,
                };
                let coefs = params.speed_coefs().unwrap();
                for c in [coefs.correction, coefs.turn, coefs.exit].iter() {
                    assert!(*c > 0.0 && *c < 1.0, "coef {} out of (0, 1) for w={} r={}", c, w, r);
                }
            }
        }
    }

    #[test]
    fn test_invalid_geometry() {
        // Radius equal to half the track width
        let p = Params { exit_radius_m: 0.1, ..TEST_PARAMS };
        match p.speed_coefs() {
            Err(TrajCtrlError::InvalidGeometry { name, .. }) => assert_eq!(name, "exit"),
            r => panic!("Expected invalid geometry, got {:?}", r),
        }

        // Radius smaller than half the track width
        let p = Params { correction_radius_m: 0.05, ..TEST_PARAMS };
        match p.speed_coefs() {
            Err(TrajCtrlError::InvalidGeometry { name, .. }) => assert_eq!(name, "correction"),
            r => panic!("Expected invalid geometry, got {:?}", r),
        }

        let p = Params { turn_radius_m: f64::NAN, ..TEST_PARAMS };
        assert!(matches!(p.speed_coefs(), Err(TrajCtrlError::InvalidGeometry { .. })));

        let p = Params { track_width_m: 0.0, ..TEST_PARAMS };
        assert!(matches!(p.speed_coefs(), Err(TrajCtrlError::InvalidTrackWidth(_))));
    }

    #[test]
    fn test_load_toml() {
        let p: Params = util::params::from_str(
            "track_width_m = 0.2\n\
             correction_radius_m = 0.6\n\
             turn_radius_m = 0.5\n\
             exit_radius_m = 0.3\n",
        )
        .unwrap();

        assert_eq!(p.speed_coefs().unwrap(), TEST_PARAMS.speed_coefs().unwrap());
    }
}
