//! Real Las Vegas / Henderson locations for realistic delivery fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Where drivers start their shift.
pub const DEPOTS: &[Location] = &[
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("MGM Grand", 36.1023654, -115.1688720),
    Location::new("Longhorn Casino", 36.1070664, -115.0591256),
];

pub const STRIP_DROPS: &[Location] = &[
    Location::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Location::new("SW Steakhouse", 36.1262145, -115.1669146),
    Location::new("Sinatra", 36.1300035, -115.1654850),
    Location::new("Public House", 36.1219193, -115.1689317),
    Location::new("Brooklyn Bowl", 36.1175388, -115.1695094),
    Location::new("Gordon Ramsay BurGR", 36.1107195, -115.1720818),
    Location::new("Spago by Wolfgang Puck", 36.1139368, -115.1741462),
    Location::new("Rao's", 36.1163982, -115.1763053),
    Location::new("Il Fornaio", 36.1024474, -115.1740110),
    Location::new("Charlie Palmer Steak", 36.0910624, -115.1743364),
];

pub const HENDERSON_DROPS: &[Location] = &[
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
    Location::new("Naga", 36.0137634, -114.9928676),
    Location::new("RibCage", 35.9949754, -115.0999810),
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Location::new("Sunset Station Area", 36.0614, -115.0631),
];

pub const NORTH_VEGAS_DROPS: &[Location] = &[
    Location::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Location::new("Monarca Mexican Restaurant", 36.1440711, -115.0634197),
    Location::new("La Costa del Sol", 36.1470458, -115.0644345),
    Location::new("Beers and Bets", 36.1428945, -115.1573836),
];

/// All drop-off locations, spread over the valley.
pub fn all_drops() -> Vec<&'static Location> {
    STRIP_DROPS
        .iter()
        .chain(HENDERSON_DROPS)
        .chain(NORTH_VEGAS_DROPS)
        .collect()
}
