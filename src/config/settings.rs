//! Runtime settings for gastos
//!
//! Settings come from defaults and command-line flags only; nothing is
//! persisted besides the data file.

use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::IdScheme;

/// Largest batch the generator accepts
pub const MAX_GENERATE_COUNT: usize = 1000;

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// How new expense ids are assigned
    pub id_scheme: IdScheme,

    /// Currency symbol used for display
    pub currency_symbol: String,

    /// Default number of fake expenses to generate
    pub generate_count: usize,

    /// Number of bins in the amount histogram
    pub histogram_bins: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id_scheme: IdScheme::default(),
            currency_symbol: "$".to_string(),
            generate_count: 100,
            histogram_bins: 12,
        }
    }
}

impl Settings {
    /// Default settings with a specific id scheme
    pub fn with_scheme(id_scheme: IdScheme) -> Self {
        Self {
            id_scheme,
            ..Self::default()
        }
    }

    /// Check that counts are within range
    pub fn validate(&self) -> ExpenseResult<()> {
        if !(1..=MAX_GENERATE_COUNT).contains(&self.generate_count) {
            return Err(ExpenseError::Config(format!(
                "generate count must be between 1 and {}",
                MAX_GENERATE_COUNT
            )));
        }
        if self.histogram_bins == 0 {
            return Err(ExpenseError::Config(
                "histogram needs at least one bin".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.id_scheme, IdScheme::Sequential);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.generate_count, 100);
        assert_eq!(settings.histogram_bins, 12);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        let mut settings = Settings::with_scheme(IdScheme::Uuid);
        assert_eq!(settings.id_scheme, IdScheme::Uuid);

        settings.generate_count = 0;
        assert!(settings.validate().is_err());
        settings.generate_count = 1001;
        assert!(settings.validate().is_err());
        settings.generate_count = 10;
        settings.histogram_bins = 0;
        assert!(settings.validate().is_err());
    }
}
