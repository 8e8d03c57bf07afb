//! Field-alias mapping from loosely-shaped provider JSON into [`Address`].
//!
//! Each provider names the same fields differently (`street` vs `straat`,
//! `geo.lat` vs `lat`). An [`AliasTable`] lists, per canonical field, the
//! keys to try in order. Keys may be dotted paths into nested objects.

use serde_json::Value;

use nladdr_core::{Address, HouseNumber, Postcode};

/// Ordered key lists for each canonical address field.
#[derive(Debug, Clone, Copy)]
pub struct AliasTable {
    pub street: &'static [&'static str],
    pub house_number: &'static [&'static str],
    pub addition: &'static [&'static str],
    pub postcode: &'static [&'static str],
    pub city: &'static [&'static str],
    pub municipality: &'static [&'static str],
    pub province: &'static [&'static str],
    pub latitude: &'static [&'static str],
    pub longitude: &'static [&'static str],
    pub id: &'static [&'static str],
}

impl AliasTable {
    /// Maps one provider object into an [`Address`].
    ///
    /// Returns `None` when the object lacks a street or a city; an address
    /// without either is not a usable answer. Missing house number and
    /// postcode fall back to the requested values.
    #[must_use]
    pub fn map_address(
        &self,
        obj: &Value,
        source: &str,
        requested_postcode: &Postcode,
        requested_number: &HouseNumber,
    ) -> Option<Address> {
        let street = first_text(obj, self.street)?;
        let city = first_text(obj, self.city)?;

        let (requested_num, requested_addition) = requested_number.split();
        let house_number =
            first_text(obj, self.house_number).unwrap_or_else(|| requested_num.to_string());
        let house_number_addition = first_text(obj, self.addition)
            .or_else(|| requested_addition.map(str::to_string));

        let postcode = first_text(obj, self.postcode)
            .and_then(|raw| Postcode::parse(&raw).ok())
            .unwrap_or_else(|| requested_postcode.clone());

        Some(Address {
            street,
            house_number,
            house_number_addition,
            postcode: postcode.formatted(),
            city,
            municipality: first_text(obj, self.municipality),
            province: first_text(obj, self.province),
            latitude: first_f64(obj, self.latitude),
            longitude: first_f64(obj, self.longitude),
            provider_id: first_text(obj, self.id),
            source: source.to_string(),
        })
    }
}

/// Resolves a dotted path (`"geo.lat"`) against nested objects.
fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.as_object()?.get(key))
}

/// First alias that yields non-blank text. Numbers are stringified so that a
/// provider returning `"number": 10` and one returning `"number": "10"` agree.
#[must_use]
pub fn first_text(value: &Value, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| match lookup_path(value, alias)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First alias that yields a finite float, either as a JSON number or a
/// numeric string.
#[must_use]
pub fn first_f64(value: &Value, aliases: &[&str]) -> Option<f64> {
    aliases.iter().find_map(|alias| {
        let parsed = match lookup_path(value, alias)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    })
}
