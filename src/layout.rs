//! Layout system - rectangles and flex-based positioning

/// Rectangle bounds in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Create rectangle from terminal dimensions (fills entire screen)
    pub fn fullscreen(cols: u16, rows: u16) -> Self {
        Rect::new(0, 0, cols, rows)
    }

    /// Get right edge x-coordinate
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Get bottom edge y-coordinate
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if point is inside rectangle
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Create a subrect with padding applied on every side
    pub fn inner(&self, padding: u16) -> Self {
        let padding2 = padding.saturating_mul(2);
        Rect {
            x: self.x.saturating_add(padding),
            y: self.y.saturating_add(padding),
            width: self.width.saturating_sub(padding2),
            height: self.height.saturating_sub(padding2),
        }
    }

    /// A rect of the given size centered in this one, clamped to fit
    pub fn centered(&self, width: u16, height: u16) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect {
            x: self.x + (self.width - width) / 2,
            y: self.y + (self.height - height) / 2,
            width,
            height,
        }
    }

    /// Split horizontally into top and bottom
    pub fn split_horizontal(&self, top_height: u16) -> (Rect, Rect) {
        let top_height = top_height.min(self.height);
        let top = Rect {
            height: top_height,
            ..*self
        };
        let bottom = Rect {
            y: self.y.saturating_add(top_height),
            height: self.height - top_height,
            ..*self
        };
        (top, bottom)
    }
}

/// Flex direction for container layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

/// Main-axis placement of children when they don't fill the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Start,
    Center,
    End,
}

/// Size constraint for flex children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    /// Fixed size in cells
    Fixed(u16),
    /// Proportional size (flex grow factor)
    Flex(u16),
}

/// Flex container layout calculator
#[derive(Debug, Clone)]
pub struct FlexLayout {
    direction: FlexDirection,
    gap: u16,
    padding: u16,
    justify: Justify,
}

impl FlexLayout {
    pub fn new(direction: FlexDirection) -> Self {
        FlexLayout {
            direction,
            gap: 0,
            padding: 0,
            justify: Justify::Start,
        }
    }

    /// Set gap between children
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Set padding around container
    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    /// Set main-axis justification (only matters without flex children)
    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Calculate child rectangles for given container and sizes
    pub fn layout(&self, container: Rect, sizes: &[Size]) -> Vec<Rect> {
        if sizes.is_empty() {
            return Vec::new();
        }

        let inner = container.inner(self.padding);
        let main_size = match self.direction {
            FlexDirection::Row => inner.width,
            FlexDirection::Column => inner.height,
        };

        let total_gap = self
            .gap
            .saturating_mul(sizes.len().saturating_sub(1) as u16);
        let available = main_size.saturating_sub(total_gap);

        let mut fixed_space = 0u16;
        let mut flex_units = 0u16;
        for size in sizes {
            match size {
                Size::Fixed(s) => fixed_space = fixed_space.saturating_add(*s),
                Size::Flex(f) => flex_units = flex_units.saturating_add(*f),
            }
        }

        let free = available.saturating_sub(fixed_space);
        let flex_unit = if flex_units > 0 { free / flex_units } else { 0 };

        let mut offset = if flex_units > 0 {
            0
        } else {
            match self.justify {
                Justify::Start => 0,
                Justify::Center => free / 2,
                Justify::End => free,
            }
        };

        let mut rects = Vec::with_capacity(sizes.len());
        for size in sizes {
            let child_main = match size {
                Size::Fixed(s) => *s,
                Size::Flex(f) => flex_unit.saturating_mul(*f),
            };
            let rect = match self.direction {
                FlexDirection::Row => {
                    Rect::new(inner.x.saturating_add(offset), inner.y, child_main, inner.height)
                }
                FlexDirection::Column => {
                    Rect::new(inner.x, inner.y.saturating_add(offset), inner.width, child_main)
                }
            };
            rects.push(rect);
            offset = offset.saturating_add(child_main).saturating_add(self.gap);
        }

        rects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(15, 15));
        assert!(r.contains(10, 10)); // edge
        assert!(!r.contains(30, 30)); // outside
        assert!(!r.contains(5, 15));
    }

    #[test]
    fn test_rect_centered() {
        let screen = Rect::fullscreen(80, 24);
        assert_eq!(screen.centered(40, 10), Rect::new(20, 7, 40, 10));

        // Larger than the container: clamped
        assert_eq!(screen.centered(100, 30), Rect::new(0, 0, 80, 24));
    }

    #[test]
    fn test_rect_split_horizontal() {
        let r = Rect::new(0, 0, 80, 24);
        let (top, bottom) = r.split_horizontal(3);

        assert_eq!(top, Rect::new(0, 0, 80, 3));
        assert_eq!(bottom, Rect::new(0, 3, 80, 21));
    }

    #[test]
    fn test_flex_layout_row() {
        let container = Rect::new(0, 0, 100, 10);
        let layout = FlexLayout::new(FlexDirection::Row);

        let rects = layout.layout(container, &[Size::Fixed(20), Size::Flex(1), Size::Fixed(20)]);

        assert_eq!(rects.len(), 3);
        assert_eq!(rects[1].width, 60);
        assert_eq!(rects[2].x, 80);
    }

    #[test]
    fn test_flex_layout_justify_end_with_gap() {
        let container = Rect::new(0, 0, 30, 1);
        let layout = FlexLayout::new(FlexDirection::Row)
            .gap(2)
            .justify(Justify::End);

        let rects = layout.layout(container, &[Size::Fixed(8), Size::Fixed(6)]);

        // 30 - (8 + 2 + 6) = 14 cells of free space in front
        assert_eq!(rects[0], Rect::new(14, 0, 8, 1));
        assert_eq!(rects[1], Rect::new(24, 0, 6, 1));
    }

    #[test]
    fn test_flex_layout_column() {
        let container = Rect::new(0, 0, 40, 10);
        let layout = FlexLayout::new(FlexDirection::Column).gap(1);

        let rects = layout.layout(container, &[Size::Flex(1), Size::Fixed(1)]);
        assert_eq!(rects[0].height, 8);
        assert_eq!(rects[1].y, 9);
    }
}
