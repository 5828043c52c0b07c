use fit_model::quantity::{Quantity, Unit};

pub const NOT_AVAILABLE: &str = "Not available";

/// Energy in kilocalories with two decimals, or [`NOT_AVAILABLE`].
pub fn format_energy(joules: Option<f64>) -> String {
    joules
        .and_then(|joules| Quantity::new(joules, Unit::Joule).value_in(Unit::Kilocalorie))
        .map_or_else(
            || NOT_AVAILABLE.to_string(),
            |kcal| format!("{:.2} {}", kcal, Unit::Kilocalorie),
        )
}

pub fn format_value<T: std::fmt::Display>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(value) => format!("{} {}", value, unit),
        None => NOT_AVAILABLE.to_string(),
    }
}
