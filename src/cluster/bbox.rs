use super::point::Coord;

/// Axis-aligned rectangle in longitude/latitude space
///
/// `x` is longitude and `y` is latitude. Bounds are inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// The whole lon/lat plane, used for indexes built over no points
    pub const WORLD: BoundingBox = BoundingBox {
        min_x: -180.0,
        min_y: -90.0,
        max_x: 180.0,
        max_y: 90.0,
    };

    /// Creates a box, swapping bounds that were passed in the wrong order
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// Square box of half-side `radius` centered on `center`
    pub fn around(center: &Coord, radius: f64) -> Self {
        BoundingBox::new(
            center.lon() - radius,
            center.lat() - radius,
            center.lon() + radius,
            center.lat() + radius,
        )
    }

    /// Returns the minimal box covering all coordinates, or `None` if there are none
    pub fn covering(coords: impl IntoIterator<Item = Coord>) -> Option<Self> {
        let mut coords = coords.into_iter();
        let first = coords.next()?;
        let mut b = BoundingBox {
            min_x: first.lon(),
            min_y: first.lat(),
            max_x: first.lon(),
            max_y: first.lat(),
        };
        for c in coords {
            b.min_x = b.min_x.min(c.lon());
            b.min_y = b.min_y.min(c.lat());
            b.max_x = b.max_x.max(c.lon());
            b.max_y = b.max_y.max(c.lat());
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Coord {
        Coord([
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        ])
    }

    /// True when the box collapses to a single coordinate
    pub fn is_point(&self) -> bool {
        self.width() <= 0.0 && self.height() <= 0.0
    }

    pub fn contains(&self, c: &Coord) -> bool {
        c.lon() >= self.min_x && c.lon() <= self.max_x && c.lat() >= self.min_y && c.lat() <= self.max_y
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }

    /// Splits the box into four equal quadrants
    ///
    /// Child order: 0 = (x < cx, y < cy), 1 = (x >= cx, y < cy),
    /// 2 = (x < cx, y >= cy), 3 = (x >= cx, y >= cy).
    pub fn quadrants(&self) -> [BoundingBox; 4] {
        let c = self.center();
        let (cx, cy) = (c.lon(), c.lat());
        [
            BoundingBox { min_x: self.min_x, min_y: self.min_y, max_x: cx, max_y: cy },
            BoundingBox { min_x: cx, min_y: self.min_y, max_x: self.max_x, max_y: cy },
            BoundingBox { min_x: self.min_x, min_y: cy, max_x: cx, max_y: self.max_y },
            BoundingBox { min_x: cx, min_y: cy, max_x: self.max_x, max_y: self.max_y },
        ]
    }

    /// Index of the quadrant (see [`BoundingBox::quadrants`]) that holds `c`
    pub fn quadrant_of(&self, c: &Coord) -> usize {
        let center = self.center();
        let x_ge = (c.lon() >= center.lon()) as usize;
        let y_ge = (c.lat() >= center.lat()) as usize;
        (y_ge << 1) | x_ge
    }
}
