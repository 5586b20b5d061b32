use std::cmp::Ordering;

#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct TotalF64(pub f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.total_cmp(&other.0))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Allow implicit promotion from f64 → TotalF64
impl From<f64> for TotalF64 {
    fn from(x: f64) -> Self {
        TotalF64(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order_of_plain_values() {
        assert!(TotalF64(-1.2) < TotalF64(0.0));
        assert!(TotalF64(0.5) < TotalF64(1.5));
        assert_eq!(TotalF64(0.25), TotalF64(0.25));
    }

    #[test]
    fn test_infinities_sort_to_the_ends() {
        assert!(TotalF64(f64::NEG_INFINITY) < TotalF64(-1e300));
        assert!(TotalF64(1e300) < TotalF64(f64::INFINITY));
    }

    #[test]
    fn test_nan_is_largest() {
        // total_cmp places NaN above +inf, so an inf-seeded minimum scan
        // is never confused by a stray NaN cost.
        assert!(TotalF64(f64::INFINITY) < TotalF64(f64::NAN));
    }

    #[test]
    fn test_from_f64() {
        let x: TotalF64 = 3.25.into();
        assert_eq!(x, TotalF64(3.25));
    }
}
