use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two database sets a database or table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Legacy,
    Modern,
}

impl Side {
    pub fn as_str(&self) -> &str {
        match self {
            Side::Legacy => "legacy",
            Side::Modern => "modern",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Side::Legacy => "Legacy",
            Side::Modern => "Modern",
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::Legacy => Side::Modern,
            Side::Modern => Side::Legacy,
        }
    }

    pub fn all() -> [Side; 2] {
        [Side::Legacy, Side::Modern]
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_side_flips() {
        assert_eq!(Side::Legacy.other(), Side::Modern);
        assert_eq!(Side::Modern.other(), Side::Legacy);
    }

    #[test]
    fn test_side_serializes_lowercase() {
        let json = serde_json::to_string(&Side::Modern).unwrap();
        assert_eq!(json, "\"modern\"");
    }
}
