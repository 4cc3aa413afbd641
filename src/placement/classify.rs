//! Furniture classification from free-text labels

/// Labels that get wall-seeking couch orientation
const COUCH_WORDS: &[&str] = &["couch", "sofa"];

/// Labels that must never face straight into a wall
const FURNITURE_WORDS: &[&str] = &[
    "couch",
    "sofa",
    "chair",
    "armchair",
    "bench",
    "stool",
    "bed",
    "desk",
    "table",
    "dining",
    "dresser",
    "cabinet",
    "shelf",
    "bookshelf",
    "tv",
    "stand",
];

/// How the orientation rules treat an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FurnitureKind {
    /// Couches and sofas: pushed against a wall, facing into the room
    Couch,
    /// Other furniture with a front side
    Furniture,
    /// Plants, lamps, decor and anything unrecognised
    Other,
}

impl FurnitureKind {
    /// Classify a label by case-insensitive substring match
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if COUCH_WORDS.iter().any(|w| label.contains(w)) {
            FurnitureKind::Couch
        } else if FURNITURE_WORDS.iter().any(|w| label.contains(w)) {
            FurnitureKind::Furniture
        } else {
            FurnitureKind::Other
        }
    }

    pub fn is_couch(self) -> bool {
        self == FurnitureKind::Couch
    }

    /// Couches count as furniture too
    pub fn is_furniture(self) -> bool {
        matches!(self, FurnitureKind::Couch | FurnitureKind::Furniture)
    }
}

impl std::fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FurnitureKind::Couch => write!(f, "couch"),
            FurnitureKind::Furniture => write!(f, "furniture"),
            FurnitureKind::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_couch_labels() {
        assert_eq!(FurnitureKind::classify("couch"), FurnitureKind::Couch);
        assert_eq!(FurnitureKind::classify("Green Velvet SOFA"), FurnitureKind::Couch);
        assert_eq!(FurnitureKind::classify("sofa table"), FurnitureKind::Couch);
    }

    #[test]
    fn test_furniture_labels() {
        for label in ["chair", "Oak Dining Set", "TV stand", "bookshelf", "bar stool", "Bed"] {
            assert_eq!(
                FurnitureKind::classify(label),
                FurnitureKind::Furniture,
                "label {:?}",
                label
            );
        }
    }

    #[test]
    fn test_other_labels() {
        assert_eq!(FurnitureKind::classify("plant"), FurnitureKind::Other);
        assert_eq!(FurnitureKind::classify("floor lamp"), FurnitureKind::Other);
        assert_eq!(FurnitureKind::classify(""), FurnitureKind::Other);
    }

    #[test]
    fn test_flags() {
        assert!(FurnitureKind::Couch.is_couch());
        assert!(FurnitureKind::Couch.is_furniture());
        assert!(!FurnitureKind::Furniture.is_couch());
        assert!(FurnitureKind::Furniture.is_furniture());
        assert!(!FurnitureKind::Other.is_furniture());
    }
}
