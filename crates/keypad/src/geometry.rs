//! Matrix geometries and their scan tables.
//!
//! Each geometry fixes the PCF8574 wiring: which port mask probes the rows,
//! which readings correspond to a single row pulled low, and the same for
//! columns. A reading that matches no table entry means two keys were pressed
//! at once (or the bus glitched) and always decodes as `Fail` — never a
//! default key.

/// Closed set of supported keypad layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixGeometry {
    /// 4 rows × 4 columns (the stock telephone keypad).
    FourByFour,
    /// 5 rows × 3 columns.
    FiveByThree,
    /// 6 rows × 2 columns.
    SixByTwo,
    /// 8 rows, no column pass.
    EightByOne,
}

impl MatrixGeometry {
    /// Configuration byte for 4×4.
    pub const CONFIG_4X4: u8 = 44;
    /// Configuration byte for 5×3.
    pub const CONFIG_5X3: u8 = 53;
    /// Configuration byte for 6×2.
    pub const CONFIG_6X2: u8 = 62;
    /// Configuration byte for 8×1.
    pub const CONFIG_8X1: u8 = 81;

    /// Select a geometry from its configuration byte.
    ///
    /// Unrecognized values fall back to 4×4 for compatibility with fielded
    /// devices; the second element reports that fallback so the caller can
    /// log it instead of silently proceeding.
    pub fn from_config(value: u8) -> (Self, bool) {
        match value {
            Self::CONFIG_4X4 => (Self::FourByFour, false),
            Self::CONFIG_5X3 => (Self::FiveByThree, false),
            Self::CONFIG_6X2 => (Self::SixByTwo, false),
            Self::CONFIG_8X1 => (Self::EightByOne, false),
            _ => (Self::FourByFour, true),
        }
    }

    /// Configuration byte for this geometry.
    pub const fn config(self) -> u8 {
        match self {
            Self::FourByFour => Self::CONFIG_4X4,
            Self::FiveByThree => Self::CONFIG_5X3,
            Self::SixByTwo => Self::CONFIG_6X2,
            Self::EightByOne => Self::CONFIG_8X1,
        }
    }

    /// Number of rows; the column index is scaled by this when combining.
    pub const fn row_count(self) -> u8 {
        match self {
            Self::FourByFour => 4,
            Self::FiveByThree => 5,
            Self::SixByTwo => 6,
            Self::EightByOne => 8,
        }
    }

    /// Port mask that sets rows as inputs (pull-up) and columns as outputs.
    ///
    /// The same value read back means every row is still high: no key.
    pub const fn row_probe(self) -> u8 {
        match self {
            Self::FourByFour => 0xF0,
            Self::FiveByThree => 0xF8,
            Self::SixByTwo => 0xFC,
            Self::EightByOne => 0xFF,
        }
    }

    /// Port mask for the column pass; `None` for 8×1 (no columns wired).
    pub const fn col_probe(self) -> Option<u8> {
        match self {
            Self::FourByFour => Some(0x0F),
            Self::FiveByThree => Some(0x07),
            Self::SixByTwo => Some(0x03),
            Self::EightByOne => None,
        }
    }

    /// Map a row reading to its row index; `None` for unrecognized patterns.
    pub fn row_index(self, reading: u8) -> Option<u8> {
        let table: &[(u8, u8)] = match self {
            Self::FourByFour => &[(0xE0, 0), (0xD0, 1), (0xB0, 2), (0x70, 3)],
            Self::FiveByThree => &[(0xF0, 0), (0xE8, 1), (0xD8, 2), (0xB8, 3), (0x78, 4)],
            Self::SixByTwo => &[
                (0xF8, 0),
                (0xF4, 1),
                (0xEC, 2),
                (0xDC, 3),
                (0xBC, 4),
                (0x7C, 5),
            ],
            Self::EightByOne => &[
                (0xFE, 0),
                (0xFD, 1),
                (0xFB, 2),
                (0xF7, 3),
                (0xEF, 4),
                (0xDF, 5),
                (0xBF, 6),
                (0x7F, 7),
            ],
        };
        lookup(table, reading)
    }

    /// Map a column reading to its column index; `None` when unrecognized.
    ///
    /// Always `None` for 8×1, which has no column pass.
    pub fn col_index(self, reading: u8) -> Option<u8> {
        let table: &[(u8, u8)] = match self {
            Self::FourByFour => &[(0x0E, 0), (0x0D, 1), (0x0B, 2), (0x07, 3)],
            Self::FiveByThree => &[(0x06, 0), (0x05, 1), (0x03, 2)],
            Self::SixByTwo => &[(0x02, 0), (0x01, 1)],
            Self::EightByOne => &[],
        };
        lookup(table, reading)
    }

    /// Inverse of [`row_index`](Self::row_index): the reading a single press
    /// in `row` produces. Used to synthesize scripted bus traffic in tests.
    pub fn row_reading(self, row: u8) -> Option<u8> {
        let probe = self.row_probe();
        (row < self.row_count()).then(|| {
            // Clear the one row line that the pressed key pulls low.
            let bit = match self {
                Self::FourByFour => 0x10u8.wrapping_shl(u32::from(row)),
                Self::FiveByThree => 0x08u8.wrapping_shl(u32::from(row)),
                Self::SixByTwo => 0x04u8.wrapping_shl(u32::from(row)),
                Self::EightByOne => 0x01u8.wrapping_shl(u32::from(row)),
            };
            probe & !bit
        })
    }

    /// Inverse of [`col_index`](Self::col_index); `None` for 8×1.
    pub fn col_reading(self, col: u8) -> Option<u8> {
        let probe = self.col_probe()?;
        let col_count = match self {
            Self::FourByFour => 4,
            Self::FiveByThree => 3,
            Self::SixByTwo => 2,
            Self::EightByOne => 0,
        };
        (col < col_count).then(|| probe & !(0x01u8.wrapping_shl(u32::from(col))))
    }
}

fn lookup(table: &[(u8, u8)], reading: u8) -> Option<u8> {
    table
        .iter()
        .find(|(pattern, _)| *pattern == reading)
        .map(|(_, index)| *index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_config_falls_back_to_4x4_and_reports_it() {
        let (geometry, fell_back) = MatrixGeometry::from_config(0);
        assert_eq!(geometry, MatrixGeometry::FourByFour);
        assert!(fell_back);

        let (geometry, fell_back) = MatrixGeometry::from_config(MatrixGeometry::CONFIG_6X2);
        assert_eq!(geometry, MatrixGeometry::SixByTwo);
        assert!(!fell_back);
    }

    #[test]
    fn row_reading_round_trips_through_row_index() {
        for geometry in [
            MatrixGeometry::FourByFour,
            MatrixGeometry::FiveByThree,
            MatrixGeometry::SixByTwo,
            MatrixGeometry::EightByOne,
        ] {
            for row in 0..geometry.row_count() {
                let reading = geometry.row_reading(row).expect("row in range");
                assert_eq!(geometry.row_index(reading), Some(row), "{geometry:?} row {row}");
            }
        }
    }

    #[test]
    fn col_reading_round_trips_through_col_index() {
        for (geometry, cols) in [
            (MatrixGeometry::FourByFour, 4),
            (MatrixGeometry::FiveByThree, 3),
            (MatrixGeometry::SixByTwo, 2),
        ] {
            for col in 0..cols {
                let reading = geometry.col_reading(col).expect("col in range");
                assert_eq!(geometry.col_index(reading), Some(col), "{geometry:?} col {col}");
            }
        }
        assert_eq!(MatrixGeometry::EightByOne.col_reading(0), None);
    }

    #[test]
    fn two_rows_low_at_once_is_unrecognized() {
        // Rows 0 and 1 both pulled low on a 4×4: 0xF0 & !0x10 & !0x20 = 0xC0.
        assert_eq!(MatrixGeometry::FourByFour.row_index(0xC0), None);
    }

    #[test]
    fn all_high_pattern_is_not_in_any_table() {
        for geometry in [
            MatrixGeometry::FourByFour,
            MatrixGeometry::FiveByThree,
            MatrixGeometry::SixByTwo,
            MatrixGeometry::EightByOne,
        ] {
            assert_eq!(geometry.row_index(geometry.row_probe()), None);
        }
    }
}
