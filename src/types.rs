#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
        }
    }

    pub fn letter() -> Self {
        // 8.5in x 11in at 72pt/in.
        Self {
            width: 612.0,
            height: 792.0,
        }
    }

    pub fn from_inches(width_in: f64, height_in: f64) -> Self {
        Self {
            width: width_in * 72.0,
            height: height_in * 72.0,
        }
    }

    pub fn from_mm(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width: width_mm * 72.0 / 25.4,
            height: height_mm * 72.0 / 25.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
