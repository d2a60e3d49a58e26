//! Background colors for interval labels.
//!
//! Colors are assigned by position so the same table always renders the same way; labels
//! beyond the palette length wrap around.

use std::collections::BTreeMap;

use serde::Serialize;
use statsheet_stats::interval::Interval;

pub const PALETTE: [&str; 10] = [
    "#f1f8fd", "#e3f9e0", "#fffde7", "#fff3e0", "#fde4ec", "#e8f5e9", "#ede7f6", "#e0f7fa",
    "#fef2f3", "#f7f6f3",
];

/// Map from interval label to a palette color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorMap(BTreeMap<String, &'static str>);

impl ColorMap {
    #[must_use]
    pub fn new<'a, I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        let map = intervals
            .into_iter()
            .enumerate()
            .map(|(i, interval)| (interval.label(), PALETTE[i % PALETTE.len()]))
            .collect();
        Self(map)
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&'static str> {
        self.0.get(label).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_follow_position_and_wrap() {
        let intervals = (0..12)
            .map(|i| Interval::discrete(f64::from(i)).unwrap())
            .collect::<Vec<_>>();
        let map = ColorMap::new(&intervals);
        assert_eq!(map.get("0"), Some(PALETTE[0]));
        assert_eq!(map.get("9"), Some(PALETTE[9]));
        assert_eq!(map.get("10"), Some(PALETTE[0]));
        assert_eq!(map.get("42"), None);
    }

    #[test]
    fn test_keyed_by_canonical_label() {
        let intervals = [Interval::grouped(10.0, 20.0).unwrap()];
        let json = serde_json::to_value(ColorMap::new(&intervals)).unwrap();
        assert_eq!(json["10–20"], PALETTE[0]);
    }
}
