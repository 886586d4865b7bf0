//! Begin/end markers recorded during a test.

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// A recorded capture point.
///
/// `Start` opens a block and may carry a label naming it for direct template
/// reference; `End` closes the most recent open block of the same method.
/// Ordering between markers is defined solely by their line numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Start {
        location: Location,
        label: Option<String>,
    },
    End {
        location: Location,
    },
}

impl Marker {
    pub fn start(location: Location) -> Self {
        Marker::Start {
            location,
            label: None,
        }
    }

    pub fn start_labeled(location: Location, label: impl Into<String>) -> Self {
        Marker::Start {
            location,
            label: Some(label.into()),
        }
    }

    pub fn end(location: Location) -> Self {
        Marker::End { location }
    }

    pub fn location(&self) -> &Location {
        match self {
            Marker::Start { location, .. } => location,
            Marker::End { location } => location,
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Marker::Start {
                location,
                label: Some(label),
            } => write!(f, "start[{}] at {}", label, location),
            Marker::Start {
                location,
                label: None,
            } => write!(f, "start at {}", location),
            Marker::End { location } => write!(f, "end at {}", location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line_number: usize) -> Location {
        Location::new("src/lib.rs", "testdoc", "some_method", line_number)
    }

    #[test]
    fn test_location_of_either_variant() {
        assert_eq!(Marker::start(at(3)).location().line_number(), 3);
        assert_eq!(Marker::end(at(9)).location().line_number(), 9);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Marker::start(at(3)).to_string(),
            "start at src/lib.rs:3 in some_method"
        );
        assert_eq!(
            Marker::start_labeled(at(3), "named").to_string(),
            "start[named] at src/lib.rs:3 in some_method"
        );
        assert_eq!(
            Marker::end(at(9)).to_string(),
            "end at src/lib.rs:9 in some_method"
        );
    }
}
