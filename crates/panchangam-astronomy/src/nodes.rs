//! Ascending node of the Moon's orbit (Meeus ch. 47).
//!
//! Longitudes are tropical, mean equinox of date, in degrees.

use crate::julian::centuries_since_j2000;

/// Mean longitude of the ascending node.
pub fn mean_node_deg(jd_tt: f64) -> f64 {
    let t = centuries_since_j2000(jd_tt);
    let omega = 125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t * t + t * t * t / 467_441.0
        - t * t * t * t / 60_616_000.0;
    omega.rem_euclid(360.0)
}

/// True longitude of the ascending node: the mean node plus its five
/// largest periodic terms.
pub fn true_node_deg(jd_tt: f64) -> f64 {
    let t = centuries_since_j2000(jd_tt);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    // Moon's mean elongation, Sun's and Moon's mean anomalies, argument of latitude
    let d = (297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0 - t4 / 113_065_000.0)
        .to_radians();
    let m = (357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0).to_radians();
    let m_moon = (134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0 - t4 / 14_712_000.0)
        .to_radians();
    let f = (93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0 + t4 / 863_310_000.0)
        .to_radians();

    let correction = -1.4979 * (2.0 * (d - f)).sin() - 0.1500 * m.sin() - 0.1226 * (2.0 * d).sin()
        + 0.1176 * (2.0 * f).sin()
        - 0.0801 * (2.0 * (m_moon - f)).sin();
    (mean_node_deg(jd_tt) + correction).rem_euclid(360.0)
}
