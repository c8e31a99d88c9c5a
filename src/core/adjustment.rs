use crate::domain::region::{adjustment_factor, is_target_country};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjusted {
    pub prediction: f64,
    /// `None` when the country is not in the target region.
    pub factor: Option<f64>,
    /// Unadjusted oracle output, only kept when a factor was applied.
    pub baseline: Option<f64>,
}

pub fn adjust(raw_prediction: f64, country: &str) -> Adjusted {
    if !is_target_country(country) {
        return Adjusted {
            prediction: raw_prediction,
            factor: None,
            baseline: None,
        };
    }

    let factor = adjustment_factor(country);
    tracing::debug!(
        "Applying regional factor {} for {} to {}",
        factor,
        country,
        raw_prediction
    );

    Adjusted {
        prediction: raw_prediction * factor,
        factor: Some(factor),
        baseline: Some(raw_prediction),
    }
}
