// digipin-core/src/domain/validation/checks.rs

use crate::domain::geo::GridCoder;
use crate::domain::validation::model::{ValidationCheck, ValidationRequest};

pub const COORDINATE_VALIDITY: &str = "coordinate_validity";
pub const DIGIPIN_MATCH: &str = "digipin_match";
pub const ADDRESS_COMPLETENESS: &str = "address_completeness";
pub const GEOCODING_REVERSE_MATCH: &str = "geocoding_reverse_match";

/// Minimum number of non-blank address fields for `address_completeness`.
pub const MIN_ADDRESS_PARTS: usize = 3;

/// One independent check of the validation battery.
///
/// Checks never short-circuit each other: each one sees the raw request and
/// always produces a result.
pub trait AddressCheck: Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, request: &ValidationRequest) -> ValidationCheck;
}

pub struct CoordinateValidity;

impl AddressCheck for CoordinateValidity {
    fn name(&self) -> &'static str {
        COORDINATE_VALIDITY
    }

    fn run(&self, request: &ValidationRequest) -> ValidationCheck {
        let coordinate = request.coordinate();
        if coordinate.is_valid() {
            ValidationCheck::new(
                self.name(),
                true,
                1.0,
                "Coordinates are within valid range",
            )
        } else {
            ValidationCheck::new(
                self.name(),
                false,
                1.0,
                format!("Coordinates ({coordinate}) are out of range"),
            )
        }
    }
}

/// Compares the supplied code with the one derived from the coordinate.
///
/// When the request carries no code the derived one is used and the check
/// matches trivially. The confidence stays at 0.95 either way; `details`
/// records which case applied.
pub struct DigipinMatch;

impl AddressCheck for DigipinMatch {
    fn name(&self) -> &'static str {
        DIGIPIN_MATCH
    }

    fn run(&self, request: &ValidationRequest) -> ValidationCheck {
        const CONFIDENCE: f64 = 0.95;

        let derived = match GridCoder::encode(request.coordinate()) {
            Ok(cell) => cell.code,
            Err(e) => {
                return ValidationCheck::new(
                    self.name(),
                    false,
                    CONFIDENCE,
                    format!("No DIGIPIN can be derived: {e}"),
                );
            }
        };

        match request.supplied_digipin() {
            Some(supplied) if supplied == derived => ValidationCheck::new(
                self.name(),
                true,
                CONFIDENCE,
                "DIGIPIN matches coordinate grid",
            ),
            Some(supplied) => ValidationCheck::new(
                self.name(),
                false,
                CONFIDENCE,
                format!("DIGIPIN {supplied} does not match coordinate grid {derived}"),
            ),
            None => ValidationCheck::new(
                self.name(),
                true,
                CONFIDENCE,
                format!("No DIGIPIN supplied; derived {derived} from coordinates (not independently verified)"),
            ),
        }
    }
}

pub struct AddressCompleteness;

impl AddressCheck for AddressCompleteness {
    fn name(&self) -> &'static str {
        ADDRESS_COMPLETENESS
    }

    fn run(&self, request: &ValidationRequest) -> ValidationCheck {
        let filled = request.address_parts.filled_count();
        let passed = filled >= MIN_ADDRESS_PARTS;
        let details = if passed {
            format!("Address has sufficient components ({filled})")
        } else {
            format!("Address has {filled} component(s), at least {MIN_ADDRESS_PARTS} required")
        };
        ValidationCheck::new(self.name(), passed, 0.85, details)
    }
}

/// Offline stand-in: no reverse geocoder is available locally, so the
/// location is accepted. Online, the backend runs its own version.
pub struct OfflineReverseMatch;

impl AddressCheck for OfflineReverseMatch {
    fn name(&self) -> &'static str {
        GEOCODING_REVERSE_MATCH
    }

    fn run(&self, _request: &ValidationRequest) -> ValidationCheck {
        ValidationCheck::new(
            self.name(),
            true,
            0.88,
            "Reverse geocoding unavailable offline; location accepted",
        )
    }
}
