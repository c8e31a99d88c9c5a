use crate::domain::model::AccessLevel;

/// Inclusive lower bound of each level, highest first.
const THRESHOLDS: [(f64, AccessLevel); 4] = [
    (1000.0, AccessLevel::VeryHigh),
    (500.0, AccessLevel::High),
    (200.0, AccessLevel::Moderate),
    (100.0, AccessLevel::Low),
];

pub fn classify(value: f64) -> AccessLevel {
    THRESHOLDS
        .iter()
        .find(|(bound, _)| value >= *bound)
        .map(|(_, level)| *level)
        .unwrap_or(AccessLevel::VeryLow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(classify(1000.0), AccessLevel::VeryHigh);
        assert_eq!(classify(999.999), AccessLevel::High);
        assert_eq!(classify(500.0), AccessLevel::High);
        assert_eq!(classify(499.9), AccessLevel::Moderate);
        assert_eq!(classify(200.0), AccessLevel::Moderate);
        assert_eq!(classify(199.9), AccessLevel::Low);
        assert_eq!(classify(100.0), AccessLevel::Low);
        assert_eq!(classify(99.9), AccessLevel::VeryLow);
    }

    #[test]
    fn test_total_over_extreme_values() {
        assert_eq!(classify(-5.0), AccessLevel::VeryLow);
        assert_eq!(classify(f64::MAX), AccessLevel::VeryHigh);
        assert_eq!(classify(f64::NEG_INFINITY), AccessLevel::VeryLow);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = classify(-1.0);
        let mut value = -1.0;
        while value < 1500.0 {
            let level = classify(value);
            assert!(level >= previous, "{} dropped to {:?}", value, level);
            previous = level;
            value += 7.5;
        }
    }
}
