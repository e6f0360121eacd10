//! Pixel-to-coordinate mapping for the report map.
//!
//! The map image is treated as a flat rectangle spanning a fixed geographic
//! box. A click is converted by linear interpolation over that box; this is
//! an approximation for locating a report, not a map projection.

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Geographic box covered by the map surface.
///
/// `north`/`west` is the coordinate under the top-left pixel. Latitude
/// decreases by `lat_span` towards the bottom edge and longitude increases by
/// `long_span` towards the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub north: f64,
    pub west: f64,
    pub lat_span: f64,
    pub long_span: f64,
}

impl MapBounds {
    /// Approximate extent of Soacha: lat 4.57 to 4.59, long -74.22 to -74.20.
    pub const SOACHA: Self = Self {
        north: 4.59,
        west: -74.22,
        lat_span: 0.02,
        long_span: 0.02,
    };

    /// Map a click on `surface` to a coordinate pair.
    pub fn locate(&self, surface: &Surface, click: MapClick) -> Result<Coordinates, MapError> {
        surface.validate()?;
        if !surface.contains(click) {
            return Err(MapError::OutsideSurface {
                x: click.x,
                y: click.y,
            });
        }

        let lat = self.north - (click.y / surface.height) * self.lat_span;
        let long = self.west + (click.x / surface.width) * self.long_span;

        Ok(Coordinates::from_degrees(lat, long))
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self::SOACHA
    }
}

/// Geometry of the clickable map element, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Client-space x of the left edge.
    pub left: f64,
    /// Client-space y of the top edge.
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Surface {
    /// A surface anchored at the client origin.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Convert a client-space click into an offset from the top-left corner.
    #[must_use]
    pub fn offset_of(&self, client_x: f64, client_y: f64) -> MapClick {
        MapClick {
            x: client_x - self.left,
            y: client_y - self.top,
        }
    }

    fn validate(&self) -> Result<(), MapError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(MapError::DegenerateSurface {
                width: self.width,
                height: self.height,
            })
        }
    }

    fn contains(&self, click: MapClick) -> bool {
        (0.0..=self.width).contains(&click.x) && (0.0..=self.height).contains(&click.y)
    }
}

/// A click position relative to the top-left corner of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapClick {
    pub x: f64,
    pub y: f64,
}

/// Latitude and longitude as the form fields hold them: decimal strings with
/// exactly four fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    /// Round both components to four decimal places.
    #[must_use]
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: format!("{latitude:.4}"),
            longitude: format!("{longitude:.4}"),
        }
    }
}

/// Map a click at `(x, y)` on a `width` x `height` surface over the Soacha box.
pub fn get_coords(x: f64, y: f64, width: f64, height: f64) -> Result<Coordinates, MapError> {
    MapBounds::SOACHA.locate(&Surface::new(width, height), MapClick { x, y })
}
