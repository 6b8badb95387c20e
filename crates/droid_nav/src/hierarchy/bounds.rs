//! Geometry strings of the form `[x1,y1][x2,y2]`

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

lazy_static! {
    static ref BOUNDS_RE: Regex = Regex::new(r"^\[(\d+),(\d+)\]\[(\d+),(\d+)\]$").unwrap();
}

/// Axis-aligned rectangle in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub center_x: i32,
    pub center_y: i32,
}

impl Bounds {
    /// Build from corner coordinates. Returns `None` for negative or inverted corners.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Self> {
        if x1 < 0 || y1 < 0 || x2 < x1 || y2 < y1 {
            return None;
        }
        let width = x2 - x1;
        let height = y2 - y1;
        Some(Self {
            x: x1,
            y: y1,
            width,
            height,
            // floor((x1 + x2) / 2) without the overflowing sum
            center_x: x1 + width / 2,
            center_y: y1 + height / 2,
        })
    }

    /// Parse a geometry attribute. Anything but `[x1,y1][x2,y2]` is `None`.
    pub fn resolve(geometry: &str) -> Option<Self> {
        let caps = BOUNDS_RE.captures(geometry.trim())?;
        let coord = |i: usize| caps.get(i)?.as_str().parse::<i32>().ok();
        Self::from_corners(coord(1)?, coord(2)?, coord(3)?, coord(4)?)
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}][{},{}]", self.x, self.y, self.right(), self.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_well_formed() {
        let b = Bounds::resolve("[100,200][300,260]").unwrap();
        assert_eq!((b.x, b.y, b.width, b.height), (100, 200, 200, 60));
        assert_eq!(b.center(), (200, 230));
    }

    #[test]
    fn test_center_uses_floor_division() {
        let b = Bounds::resolve("[0,0][5,3]").unwrap();
        assert_eq!(b.center(), (2, 1));

        let b = Bounds::resolve("[1,1][2,2]").unwrap();
        assert_eq!(b.center(), (1, 1));
    }

    #[test]
    fn test_center_matches_midpoint_formula() {
        for (x1, y1, x2, y2) in [(0, 0, 1080, 2400), (7, 13, 8, 13), (99, 1, 1000, 1001)] {
            let b = Bounds::from_corners(x1, y1, x2, y2).unwrap();
            assert_eq!(b.center_x, (x1 + x2) / 2);
            assert_eq!(b.center_y, (y1 + y2) / 2);
        }
    }

    #[test]
    fn test_zero_area_is_still_bounds() {
        let b = Bounds::resolve("[0,0][0,0]").unwrap();
        assert!(b.is_empty());
        assert_eq!(b.center(), (0, 0));
    }

    #[test]
    fn test_malformed_is_absent() {
        for geometry in [
            "",
            "[10,10]",
            "[10,10][20]",
            "10,10,20,20",
            "[a,b][c,d]",
            "[-1,0][10,10]",
            "[10,10][20,20]x",
            "[10,10][20,20][30,30]",
            "[ 10,10][20,20]",
            "[99999999999,0][1,1]",
        ] {
            assert_eq!(Bounds::resolve(geometry), None, "{geometry:?}");
        }
    }

    #[test]
    fn test_inverted_corners_are_absent() {
        assert_eq!(Bounds::resolve("[300,200][100,260]"), None);
        assert_eq!(Bounds::resolve("[100,260][300,200]"), None);
    }

    #[test]
    fn test_display_round_trips_geometry() {
        let b = Bounds::resolve("[100,200][300,260]").unwrap();
        assert_eq!(b.to_string(), "[100,200][300,260]");
    }
}
