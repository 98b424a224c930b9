use std::f64::consts::PI;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

#[cfg(test)]
mod tests {
    use super::deg_to_rad;
    use crate::testing::assert_eq_approx;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn converts_degrees() {
        assert_eq!(deg_to_rad(0.), 0.);
        assert_eq_approx(deg_to_rad(90.), FRAC_PI_2, 1e-12);
        assert_eq_approx(deg_to_rad(-180.), -PI, 1e-12);
    }
}
