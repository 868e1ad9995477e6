use crate::{
    traits::BackgroundClassifier,
    types::{Predicate, ThresholdConfig},
};

/// Background when every channel lies in `lower..=upper`
#[derive(Debug, Clone)]
pub struct InclusiveRangeClassifier {
    pub threshold: ThresholdConfig,
}

impl Default for InclusiveRangeClassifier {
    fn default() -> Self {
        Self { threshold: ThresholdConfig::default() }
    }
}

impl BackgroundClassifier for InclusiveRangeClassifier {
    #[inline]
    fn is_background(&self, rgb: [u8; 3]) -> bool {
        let ThresholdConfig { lower, upper } = self.threshold;
        (lower[0]..=upper[0]).contains(&rgb[0])
            && (lower[1]..=upper[1]).contains(&rgb[1])
            && (lower[2]..=upper[2]).contains(&rgb[2])
    }
}

/// Background when every channel is strictly above its lower bound and at
/// most its upper bound
#[derive(Debug, Clone)]
pub struct StrictRangeClassifier {
    pub threshold: ThresholdConfig,
}

impl Default for StrictRangeClassifier {
    fn default() -> Self {
        Self { threshold: ThresholdConfig::default() }
    }
}

impl BackgroundClassifier for StrictRangeClassifier {
    #[inline]
    fn is_background(&self, rgb: [u8; 3]) -> bool {
        let ThresholdConfig { lower, upper } = self.threshold;
        rgb.iter()
            .zip(lower.iter().zip(upper.iter()))
            .all(|(value, (lo, hi))| value > lo && value <= hi)
    }
}

/// Build the classifier matching a predicate
pub fn classifier_for(
    predicate: Predicate,
    threshold: ThresholdConfig,
) -> Box<dyn BackgroundClassifier> {
    match predicate {
        Predicate::Inclusive => Box::new(InclusiveRangeClassifier { threshold }),
        Predicate::Strict => Box::new(StrictRangeClassifier { threshold }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_boundaries() {
        let classifier = InclusiveRangeClassifier::default();
        assert!(classifier.is_background([240, 240, 240]));
        assert!(classifier.is_background([255, 255, 255]));
        assert!(classifier.is_background([241, 241, 241]));
        assert!(!classifier.is_background([239, 255, 255]));
        assert!(!classifier.is_background([255, 239, 255]));
        assert!(!classifier.is_background([0, 0, 0]));
    }

    #[test]
    fn test_strict_boundaries() {
        let classifier = StrictRangeClassifier::default();
        assert!(!classifier.is_background([240, 240, 240]));
        assert!(!classifier.is_background([241, 241, 240]));
        assert!(classifier.is_background([241, 241, 241]));
        assert!(classifier.is_background([255, 255, 255]));
    }

    #[test]
    fn test_strict_matches_greater_than_reference() {
        let classifier = StrictRangeClassifier::default();
        for value in 0..=255u8 {
            let expected = value > 240;
            assert_eq!(classifier.is_background([value, value, value]), expected, "value {value}");
        }
    }

    #[test]
    fn test_custom_box() {
        let threshold = ThresholdConfig::new([0, 100, 200], [10, 110, 210])
            .expect("Should build threshold");
        let classifier = classifier_for(Predicate::Inclusive, threshold);
        assert!(classifier.is_background([5, 105, 205]));
        assert!(!classifier.is_background([5, 105, 211]));
        assert!(!classifier.is_background([11, 105, 205]));
    }

    #[test]
    fn test_classifier_for_predicate() {
        let threshold = ThresholdConfig::default();
        let inclusive = classifier_for(Predicate::Inclusive, threshold);
        let strict = classifier_for(Predicate::Strict, threshold);
        assert!(inclusive.is_background([240, 240, 240]));
        assert!(!strict.is_background([240, 240, 240]));
    }
}
