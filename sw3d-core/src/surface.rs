/// 2D drawing surfaces the pipeline renders onto
use crate::projection::ScreenPoint;

/// The 2D primitives a frontend has to provide.
///
/// Coordinates are relative to the surface centre with y growing downward,
/// as produced by [`crate::projection::project_to_screen`]. Colors are CSS
/// color strings such as `white` or `rgb(0,178,255)`.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Fill a triangle and stroke its outline in the same color.
    fn fill_triangle(&mut self, p1: ScreenPoint, p2: ScreenPoint, p3: ScreenPoint, color: &str);

    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f64, color: &str);

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: &str);

    fn fill_text(&mut self, position: ScreenPoint, text: &str, color: &str, font: &str);
}

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Triangle {
        points: [ScreenPoint; 3],
        color: String,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        width: f64,
        color: String,
    },
    Circle {
        center: ScreenPoint,
        radius: f64,
        color: String,
    },
    Text {
        position: ScreenPoint,
        text: String,
        color: String,
        font: String,
    },
}

/// A surface that records draw calls instead of painting them
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn triangles(&self) -> impl Iterator<Item = (&[ScreenPoint; 3], &str)> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Triangle { points, color } => Some((points, color.as_str())),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Line { .. }))
    }
}

impl Surface for DisplayList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_triangle(&mut self, p1: ScreenPoint, p2: ScreenPoint, p3: ScreenPoint, color: &str) {
        self.calls.push(DrawCall::Triangle {
            points: [p1, p2, p3],
            color: color.to_string(),
        });
    }

    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f64, color: &str) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            width,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: &str) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, position: ScreenPoint, text: &str, color: &str, font: &str) {
        self.calls.push(DrawCall::Text {
            position,
            text: text.to_string(),
            color: color.to_string(),
            font: font.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mut list = DisplayList::new(100, 50);
        list.fill_circle(ScreenPoint::new(1.0, 2.0), 3.0, "white");
        list.stroke_line(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(5.0, 5.0), 1.0, "red");
        list.fill_text(ScreenPoint::new(0.0, 0.0), "7", "royalblue", "30px Arial");

        assert_eq!(list.width(), 100);
        assert_eq!(list.height(), 50);
        assert_eq!(list.calls().len(), 3);
        assert!(matches!(&list.calls()[0], DrawCall::Circle { radius, .. } if *radius == 3.0));
        assert!(matches!(&list.calls()[2], DrawCall::Text { text, .. } if text == "7"));
        assert_eq!(list.lines().count(), 1);
        assert_eq!(list.triangles().count(), 0);
    }
}
