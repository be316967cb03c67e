//! Page formats, margins, header bands, and content-area arithmetic.
//!
//! All lengths are millimeters. A sheet is split into three horizontal
//! zones, top to bottom: the header text band, the header motif band
//! (where the target image is shown), and the body content area that the
//! placers fill. The body span runs from the bottom of the header to the
//! bottom page edge; each row's trailing padding advance keeps images
//! clear of the bottom margin.
//!
//! # Example
//!
//! ```
//! use zenseek::{SheetArea, SheetFormat, SheetOrientation};
//!
//! let a4 = SheetArea::new(SheetFormat::A4, SheetOrientation::Portrait);
//! assert_eq!(a4.content_width(), 190.0);
//! assert_eq!(a4.content_height(), 227.0);
//! ```

/// Fixed page margin on each edge, in millimeters.
pub const MARGIN_MM: f64 = 10.0;

/// Height of the header text band, in millimeters.
pub const HEADER_TEXT_MM: f64 = 20.0;

/// Height of the header band showing the target motif, in millimeters.
pub const HEADER_MOTIF_MM: f64 = 40.0;

/// Inter-image padding on both axes, in millimeters.
pub const PADDING_MM: f64 = 10.0;

/// ISO paper format of a sheet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SheetFormat {
    /// 210 × 297 mm.
    #[default]
    A4,
    /// 297 × 420 mm.
    A3,
}

impl SheetFormat {
    /// Portrait page dimensions in millimeters, `(width, height)`.
    pub const fn portrait_mm(self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
        }
    }
}

/// Which way the sheet is turned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SheetOrientation {
    /// Height exceeds width.
    #[default]
    Portrait,
    /// Width exceeds height; the portrait dimensions swapped.
    Landscape,
}

/// Physical geometry of one sheet: page dimensions, margins, and header
/// bands. Derived purely from format and orientation; immutable per sheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetArea {
    /// Page width in millimeters.
    pub width: f64,
    /// Page height in millimeters.
    pub height: f64,
    /// Left margin in millimeters.
    pub margin_left: f64,
    /// Right margin in millimeters.
    pub margin_right: f64,
    /// Top margin in millimeters.
    pub margin_top: f64,
    /// Bottom margin in millimeters. The body span runs to the bottom page
    /// edge; the final row's padding advance provides the clearance here.
    pub margin_bottom: f64,
    /// Header text band height in millimeters.
    pub header_text: f64,
    /// Header motif band height in millimeters.
    pub header_motif: f64,
}

impl SheetArea {
    /// Standard sheet geometry for a format and orientation.
    pub const fn new(format: SheetFormat, orientation: SheetOrientation) -> Self {
        let (pw, ph) = format.portrait_mm();
        let (width, height) = match orientation {
            SheetOrientation::Portrait => (pw, ph),
            SheetOrientation::Landscape => (ph, pw),
        };
        Self {
            width,
            height,
            margin_left: MARGIN_MM,
            margin_right: MARGIN_MM,
            margin_top: MARGIN_MM,
            margin_bottom: MARGIN_MM,
            header_text: HEADER_TEXT_MM,
            header_motif: HEADER_MOTIF_MM,
        }
    }

    /// Total header height: text band plus motif band.
    pub const fn header_height(&self) -> f64 {
        self.header_text + self.header_motif
    }

    /// Left edge of the body content area, mm from the page's left edge.
    pub const fn content_left(&self) -> f64 {
        self.margin_left
    }

    /// Top edge of the body content area, mm from the page's top edge.
    pub const fn content_top(&self) -> f64 {
        self.margin_top + self.header_height()
    }

    /// Width of the body content area.
    pub const fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Height of the body content area: everything below the header.
    pub const fn content_height(&self) -> f64 {
        self.height - self.content_top()
    }
}
