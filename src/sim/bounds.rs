//! Rectangular world limits

use crate::Rect;

/// Edge of the world crossed by a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Left,
    Right,
    Top,
    Bottom,
}

/// Axis-aligned clamp/probe helper used for border handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub rect: Rect,
}

impl WorldBounds {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// First border crossed by `r`, horizontal edges checked first
    pub fn probe(&self, r: &Rect) -> Option<Border> {
        if r.x < self.rect.x {
            Some(Border::Left)
        } else if r.right() > self.rect.right() {
            Some(Border::Right)
        } else if r.y < self.rect.y {
            Some(Border::Top)
        } else if r.bottom() > self.rect.bottom() {
            Some(Border::Bottom)
        } else {
            None
        }
    }

    /// Clamp horizontally. Returns true if the rectangle was moved.
    pub fn clamp_x(&self, r: &mut Rect) -> bool {
        let max_x = self.rect.right() - r.width;
        let x = r.x.clamp(self.rect.x, max_x.max(self.rect.x));
        let moved = x != r.x;
        r.x = x;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WorldBounds {
        WorldBounds::new(Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn test_probe_edges() {
        let b = bounds();
        assert_eq!(b.probe(&Rect::new(-1.0, 10.0, 10.0, 10.0)), Some(Border::Left));
        assert_eq!(b.probe(&Rect::new(95.0, 10.0, 10.0, 10.0)), Some(Border::Right));
        assert_eq!(b.probe(&Rect::new(10.0, -5.0, 10.0, 10.0)), Some(Border::Top));
        assert_eq!(b.probe(&Rect::new(10.0, 95.0, 10.0, 10.0)), Some(Border::Bottom));
        assert_eq!(b.probe(&Rect::new(10.0, 10.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_clamp_x_clears_horizontal_probe() {
        let b = bounds();
        let mut r = Rect::new(-20.0, 10.0, 10.0, 10.0);
        assert!(b.clamp_x(&mut r));
        assert_eq!(r.x, 0.0);
        assert_eq!(b.probe(&r), None);
        assert!(!b.clamp_x(&mut r));
    }

    #[test]
    fn test_clamp_x_leaves_y() {
        let b = bounds();
        let mut r = Rect::new(95.0, -50.0, 10.0, 10.0);
        assert!(b.clamp_x(&mut r));
        assert_eq!(r.x, 90.0);
        assert_eq!(r.y, -50.0);
    }
}
