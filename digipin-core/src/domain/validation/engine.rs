// digipin-core/src/domain/validation/engine.rs

use crate::domain::validation::checks::{
    AddressCheck, AddressCompleteness, CoordinateValidity, DigipinMatch, OfflineReverseMatch,
};
use crate::domain::validation::model::{ValidationCheck, ValidationRequest};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub is_valid: bool,
    pub confidence_score: f64,
}

/// Ordered battery of independent checks plus the aggregation rule.
pub struct ValidationEngine {
    checks: Vec<Box<dyn AddressCheck>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl ValidationEngine {
    /// The four offline checks, in reporting order.
    pub fn standard() -> Self {
        Self::empty()
            .with_check(CoordinateValidity)
            .with_check(DigipinMatch)
            .with_check(AddressCompleteness)
            .with_check(OfflineReverseMatch)
    }

    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn with_check(mut self, check: impl AddressCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Runs every check; a failing check never prevents the next one.
    pub fn run_checks(&self, request: &ValidationRequest) -> Vec<ValidationCheck> {
        self.checks.iter().map(|check| check.run(request)).collect()
    }

    /// Validity is the conjunction of `passed`; the score is the mean
    /// confidence rounded to two decimals and is informational only.
    pub fn aggregate(checks: &[ValidationCheck]) -> Verdict {
        if checks.is_empty() {
            return Verdict {
                is_valid: false,
                confidence_score: 0.0,
            };
        }

        let mean = checks.iter().map(|c| c.confidence).sum::<f64>() / checks.len() as f64;
        Verdict {
            is_valid: checks.iter().all(|c| c.passed),
            confidence_score: (mean * 100.0).round() / 100.0,
        }
    }

    pub fn evaluate(&self, request: &ValidationRequest) -> (Vec<ValidationCheck>, Verdict) {
        let checks = self.run_checks(request);
        let verdict = Self::aggregate(&checks);
        (checks, verdict)
    }
}
