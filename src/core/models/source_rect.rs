/// A rectangle in source image pixels, half-open: `[x1, x2) × [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl SourceRect {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn has_area(&self) -> bool {
        self.x2 > self.x1 && self.y2 > self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_and_height_follow_corners() {
        let rect = SourceRect::new(200, 100, 400, 300);

        assert_eq!(rect.width(), 200);
        assert_eq!(rect.height(), 200);
        assert!(rect.has_area());
    }

    #[test]
    fn test_zero_width_rect_has_no_area() {
        let rect = SourceRect::new(10, 10, 10, 50);

        assert_eq!(rect.width(), 0);
        assert!(!rect.has_area());
    }
}
