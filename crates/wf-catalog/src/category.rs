//! Accessibility feature categories.

use std::fmt;

/// The kind of accessibility feature a point represents.
///
/// Feature types outside the known set are kept verbatim in
/// [`Category::Other`] so they still produce a (generic) alert.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    Ramp,
    Elevator,
    Bathroom,
    Parking,
    Braille,
    Audio,
    Tactile,
    Stairs,
    Obstacle,
    Other(String),
}

impl Category {
    /// Every known (non-`Other`) category.
    pub const KNOWN: [Category; 9] = [
        Category::Ramp,
        Category::Elevator,
        Category::Bathroom,
        Category::Parking,
        Category::Braille,
        Category::Audio,
        Category::Tactile,
        Category::Stairs,
        Category::Obstacle,
    ];

    /// Parse a `featureType` string.  Case-insensitive, surrounding whitespace
    /// ignored.  Never fails.
    pub fn parse(s: &str) -> Category {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "ramp"     => Category::Ramp,
            "elevator" => Category::Elevator,
            "bathroom" => Category::Bathroom,
            "parking"  => Category::Parking,
            "braille"  => Category::Braille,
            "audio"    => Category::Audio,
            "tactile"  => Category::Tactile,
            "stairs"   => Category::Stairs,
            "obstacle" => Category::Obstacle,
            _          => Category::Other(s.to_owned()),
        }
    }

    /// The wire name (`featureType` value) of this category.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Ramp     => "ramp",
            Category::Elevator => "elevator",
            Category::Bathroom => "bathroom",
            Category::Parking  => "parking",
            Category::Braille  => "braille",
            Category::Audio    => "audio",
            Category::Tactile  => "tactile",
            Category::Stairs   => "stairs",
            Category::Obstacle => "obstacle",
            Category::Other(s) => s,
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::parse(s))
    }
}
