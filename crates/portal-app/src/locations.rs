//! Static catalog of service locations shown on the map.

use portal_common::{NotificationKind, NotificationSink};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub coords: LatLng,
    pub description: &'static str,
    pub services: &'static [&'static str],
}

impl Location {
    /// Popup heading for the location's marker.
    pub fn title(&self) -> String {
        format!("{} Service Center", self.name)
    }
}

/// What the map should show after a centering request.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub label: &'static str,
    pub center: LatLng,
    pub zoom: u8,
}

pub const CITY_NAME: &str = "Bangalore";
pub const CITY_CENTER: LatLng = LatLng {
    lat: 12.9716,
    lng: 77.5946,
};
pub const CITY_ZOOM: u8 = 11;
pub const LOCATION_ZOOM: u8 = 14;

pub static LOCATIONS: [Location; 3] = [
    Location {
        name: "Whitefield",
        coords: LatLng {
            lat: 12.9699,
            lng: 77.7500,
        },
        description: "IT Hub with comprehensive smart services",
        services: &[
            "Smart Parking Available",
            "Traffic Management",
            "Municipal Services",
        ],
    },
    Location {
        name: "KR Puram",
        coords: LatLng {
            lat: 12.9904,
            lng: 77.6710,
        },
        description: "Residential area with community services",
        services: &[
            "Community Services",
            "Public Transport",
            "Emergency Services",
        ],
    },
    Location {
        name: "Thippasandra",
        coords: LatLng {
            lat: 12.9789,
            lng: 77.6412,
        },
        description: "Mixed development with diverse services",
        services: &[
            "Commercial Services",
            "Digital Services",
            "Waste Management",
        ],
    },
];

/// Case-insensitive lookup by location name.
pub fn find(name: &str) -> Option<&'static Location> {
    let name = name.trim();
    LOCATIONS.iter().find(|l| l.name.eq_ignore_ascii_case(name))
}

/// Resolve a city or location name to a map view and announce it.
/// Unknown names yield `None` and no notification.
pub fn center_on(name: &str, notifier: &dyn NotificationSink) -> Option<MapView> {
    let view = if name.trim().eq_ignore_ascii_case(CITY_NAME) {
        MapView {
            label: CITY_NAME,
            center: CITY_CENTER,
            zoom: CITY_ZOOM,
        }
    } else {
        let location = find(name)?;
        MapView {
            label: location.name,
            center: location.coords,
            zoom: LOCATION_ZOOM,
        }
    };

    notifier.notify(
        &format!("Centered map on {}", view.label),
        NotificationKind::Success,
    );
    Some(view)
}
