// src/export/style.rs
//
// Row classification shared by the XLSX and PDF exporters, so both documents
// always band rows with the same colors.

use crate::export::model::CheckMark;

/// Header background used by both documents.
pub(crate) const HEADER_RGB: u32 = 0x4CAF50;
pub(crate) const HEADER_TEXT_RGB: u32 = 0xFFFFFF;

/// Background band of a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowBand {
    PaleGreen,
    PaleRed,
}

impl RowBand {
    pub fn for_check(check: CheckMark) -> Self {
        match check {
            CheckMark::Accepted => RowBand::PaleGreen,
            CheckMark::Rejected => RowBand::PaleRed,
        }
    }

    pub fn rgb(&self) -> u32 {
        match self {
            RowBand::PaleGreen => 0xC6EFCE,
            RowBand::PaleRed => 0xFFC7CE,
        }
    }
}

/// Split 0xRRGGBB into the 0..1 components PDF content streams expect.
pub(crate) fn rgb_components(rgb: u32) -> (f32, f32, f32) {
    let r = ((rgb >> 16) & 0xFF) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xFF) as f32 / 255.0;
    let b = (rgb & 0xFF) as f32 / 255.0;
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_rows_are_green_rejected_red() {
        assert_eq!(RowBand::for_check(CheckMark::Accepted).rgb(), 0xC6EFCE);
        assert_eq!(RowBand::for_check(CheckMark::Rejected).rgb(), 0xFFC7CE);
    }

    #[test]
    fn splits_rgb_components() {
        assert_eq!(rgb_components(0xFF0000), (1.0, 0.0, 0.0));
        let (r, g, b) = rgb_components(HEADER_RGB);
        assert!((r - 0x4C as f32 / 255.0).abs() < f32::EPSILON);
        assert!((g - 0xAF as f32 / 255.0).abs() < f32::EPSILON);
        assert!((b - 0x50 as f32 / 255.0).abs() < f32::EPSILON);
    }
}
