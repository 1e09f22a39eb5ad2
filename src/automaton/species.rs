//! Species codes and the cyclic dominance relation.
//!
//! Three active species form a cycle: A beats B, B beats C, C beats A.
//! Every active species may also colonise an empty cell.

/// Code stored in a cell that holds no species.
pub const EMPTY: u8 = 0;

/// One value of the tool enumeration, and the code it writes into a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Species {
    #[default]
    Empty = 0,
    A = 19,
    B = 29,
    C = 39,
}

impl Species {
    pub const ALL: [Species; 4] = [Species::Empty, Species::A, Species::B, Species::C];

    /// The byte written into the grid for this species.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a cell byte. Unknown codes return `None`.
    #[inline]
    pub fn from_code(code: u8) -> Option<Species> {
        match code {
            0 => Some(Species::Empty),
            19 => Some(Species::A),
            29 => Some(Species::B),
            39 => Some(Species::C),
            _ => None,
        }
    }

    /// Tool selected by a character key: '0' empty, '1'..'3' species A..C.
    pub fn from_tool_char(ch: char) -> Option<Species> {
        match ch {
            '0' => Some(Species::Empty),
            '1' => Some(Species::A),
            '2' => Some(Species::B),
            '3' => Some(Species::C),
            _ => None,
        }
    }

    /// The species this one takes cells from.
    pub fn prey(self) -> Option<Species> {
        match self {
            Species::Empty => None,
            Species::A => Some(Species::B),
            Species::B => Some(Species::C),
            Species::C => Some(Species::A),
        }
    }

    /// Whether `self` overtakes a cell holding `other`.
    pub fn beats(self, other: Species) -> bool {
        match self {
            Species::Empty => false,
            _ => other == Species::Empty || self.prey() == Some(other),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Species::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for species in Species::ALL {
            assert_eq!(Species::from_code(species.code()), Some(species));
        }
        assert_eq!(Species::from_code(1), None);
        assert_eq!(Species::from_code(255), None);
    }

    #[test]
    fn test_cycle() {
        assert!(Species::A.beats(Species::B));
        assert!(Species::B.beats(Species::C));
        assert!(Species::C.beats(Species::A));

        assert!(!Species::B.beats(Species::A));
        assert!(!Species::C.beats(Species::B));
        assert!(!Species::A.beats(Species::C));

        // No species beats itself
        for species in Species::ALL {
            assert!(!species.beats(species));
        }
    }

    #[test]
    fn test_empty_is_colonised_but_never_wins() {
        assert!(Species::A.beats(Species::Empty));
        assert!(Species::B.beats(Species::Empty));
        assert!(Species::C.beats(Species::Empty));
        for species in Species::ALL {
            assert!(!Species::Empty.beats(species));
        }
    }

    #[test]
    fn test_tool_chars() {
        assert_eq!(Species::from_tool_char('0'), Some(Species::Empty));
        assert_eq!(Species::from_tool_char('1'), Some(Species::A));
        assert_eq!(Species::from_tool_char('2'), Some(Species::B));
        assert_eq!(Species::from_tool_char('3'), Some(Species::C));
        assert_eq!(Species::from_tool_char('4'), None);
        assert_eq!(Species::from_tool_char('c'), None);
    }
}
