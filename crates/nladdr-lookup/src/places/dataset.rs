//! Built-in fallback list of Dutch settlements.
//!
//! Coordinates are approximate town centres (WGS84).

use nladdr_core::PlaceRecord;

/// `(id, name, municipality, province, latitude, longitude)`
const BUILTIN: &[(&str, &str, &str, &str, f64, f64)] = &[
    ("wp-amsterdam", "Amsterdam", "Amsterdam", "Noord-Holland", 52.3731, 4.8922),
    ("wp-rotterdam", "Rotterdam", "Rotterdam", "Zuid-Holland", 51.9225, 4.4792),
    ("wp-den-haag", "Den Haag", "Den Haag", "Zuid-Holland", 52.0799, 4.3113),
    ("wp-utrecht", "Utrecht", "Utrecht", "Utrecht", 52.0907, 5.1214),
    ("wp-eindhoven", "Eindhoven", "Eindhoven", "Noord-Brabant", 51.4416, 5.4697),
    ("wp-groningen", "Groningen", "Groningen", "Groningen", 53.2194, 6.5665),
    ("wp-tilburg", "Tilburg", "Tilburg", "Noord-Brabant", 51.5555, 5.0913),
    ("wp-almere", "Almere", "Almere", "Flevoland", 52.3508, 5.2647),
    ("wp-breda", "Breda", "Breda", "Noord-Brabant", 51.5719, 4.7683),
    ("wp-nijmegen", "Nijmegen", "Nijmegen", "Gelderland", 51.8126, 5.8372),
    ("wp-apeldoorn", "Apeldoorn", "Apeldoorn", "Gelderland", 52.2112, 5.9699),
    ("wp-arnhem", "Arnhem", "Arnhem", "Gelderland", 51.9851, 5.8987),
    ("wp-haarlem", "Haarlem", "Haarlem", "Noord-Holland", 52.3874, 4.6462),
    ("wp-enschede", "Enschede", "Enschede", "Overijssel", 52.2215, 6.8937),
    ("wp-amersfoort", "Amersfoort", "Amersfoort", "Utrecht", 52.1561, 5.3878),
    ("wp-zaandam", "Zaandam", "Zaanstad", "Noord-Holland", 52.4389, 4.8264),
    ("wp-s-hertogenbosch", "'s-Hertogenbosch", "'s-Hertogenbosch", "Noord-Brabant", 51.6978, 5.3037),
    ("wp-zwolle", "Zwolle", "Zwolle", "Overijssel", 52.5168, 6.0830),
    ("wp-leiden", "Leiden", "Leiden", "Zuid-Holland", 52.1601, 4.4970),
    ("wp-maastricht", "Maastricht", "Maastricht", "Limburg", 50.8514, 5.6910),
    ("wp-dordrecht", "Dordrecht", "Dordrecht", "Zuid-Holland", 51.8133, 4.6901),
    ("wp-zoetermeer", "Zoetermeer", "Zoetermeer", "Zuid-Holland", 52.0575, 4.4931),
    ("wp-leeuwarden", "Leeuwarden", "Leeuwarden", "Fryslân", 53.2012, 5.7999),
    ("wp-delft", "Delft", "Delft", "Zuid-Holland", 52.0116, 4.3571),
    ("wp-alkmaar", "Alkmaar", "Alkmaar", "Noord-Holland", 52.6324, 4.7534),
    ("wp-venlo", "Venlo", "Venlo", "Limburg", 51.3704, 6.1724),
    ("wp-deventer", "Deventer", "Deventer", "Overijssel", 52.2550, 6.1639),
    ("wp-hilversum", "Hilversum", "Hilversum", "Noord-Holland", 52.2292, 5.1669),
    ("wp-amstelveen", "Amstelveen", "Amstelveen", "Noord-Holland", 52.3114, 4.8701),
    ("wp-assen", "Assen", "Assen", "Drenthe", 52.9925, 6.5649),
    ("wp-emmen", "Emmen", "Emmen", "Drenthe", 52.7792, 6.9069),
    ("wp-nieuw-amsterdam", "Nieuw-Amsterdam", "Emmen", "Drenthe", 52.7167, 6.8500),
    ("wp-driemond", "Driemond", "Amsterdam", "Noord-Holland", 52.3033, 5.0144),
    ("wp-lelystad", "Lelystad", "Lelystad", "Flevoland", 52.5185, 5.4714),
    ("wp-middelburg", "Middelburg", "Middelburg", "Zeeland", 51.4988, 3.6110),
    ("wp-vlissingen", "Vlissingen", "Vlissingen", "Zeeland", 51.4426, 3.5736),
    ("wp-heerlen", "Heerlen", "Heerlen", "Limburg", 50.8882, 5.9795),
    ("wp-sneek", "Sneek", "Súdwest-Fryslân", "Fryslân", 53.0326, 5.6589),
    ("wp-gouda", "Gouda", "Gouda", "Zuid-Holland", 52.0115, 4.7105),
    ("wp-hoorn", "Hoorn", "Hoorn", "Noord-Holland", 52.6424, 5.0597),
];

/// Materialises the built-in dataset.
#[must_use]
pub fn builtin_places() -> Vec<PlaceRecord> {
    BUILTIN
        .iter()
        .map(
            |&(id, name, municipality, province, latitude, longitude)| PlaceRecord {
                id: id.to_string(),
                name: name.to_string(),
                municipality: municipality.to_string(),
                province: province.to_string(),
                latitude: Some(latitude),
                longitude: Some(longitude),
            },
        )
        .collect()
}
