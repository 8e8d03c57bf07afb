use serde::{Deserialize, Serialize};

/// A resolved Dutch address in the canonical shape shared by all providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    /// House number as reported by the provider (or as requested when the
    /// provider does not echo it).
    pub house_number: String,
    pub house_number_addition: Option<String>,
    /// Formatted with one space, e.g. `"9711 AC"`.
    pub postcode: String,
    pub city: String,
    pub municipality: Option<String>,
    pub province: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Opaque identifier assigned by the provider, if any.
    pub provider_id: Option<String>,
    /// Name of the provider that produced this address.
    pub source: String,
}

impl Address {
    /// Single-line address: `"Street 10A, 9711 AC City"`.
    ///
    /// Every part appears once; missing parts are left out without leaving
    /// doubled separators behind.
    #[must_use]
    pub fn full_address(&self) -> String {
        let number = match self.house_number_addition.as_deref().map(str::trim) {
            Some(addition) if !addition.is_empty() => {
                if addition.chars().all(char::is_alphabetic) {
                    format!("{}{addition}", self.house_number.trim())
                } else {
                    format!("{}-{addition}", self.house_number.trim())
                }
            }
            _ => self.house_number.trim().to_string(),
        };

        let first_line = join_non_empty(&[self.street.trim(), number.as_str()], " ");
        let second_line = join_non_empty(&[self.postcode.trim(), self.city.trim()], " ");
        join_non_empty(&[first_line.as_str(), second_line.as_str()], ", ")
    }

    /// `(latitude, longitude)` when the provider reported both.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}
