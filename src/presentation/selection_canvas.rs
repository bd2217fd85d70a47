use iced::mouse;
use iced::widget::canvas;
use iced::{Color, Point, Rectangle, Size};

use crate::core::models::{DisplayPoint, DisplayRect};

const SELECTION_STROKE_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionMessage {
    PointerPressed(DisplayPoint),
    PointerMoved(DisplayPoint),
    /// `None` when the pointer position is unknown at release time.
    PointerReleased(Option<DisplayPoint>),
}

/// Transparent layer over the preview that reports drag gestures and
/// outlines the current selection.
pub struct SelectionOverlay {
    selection: Option<DisplayRect>,
    is_dragging: bool,
}

impl SelectionOverlay {
    pub fn build(selection: Option<DisplayRect>, is_dragging: bool) -> Self {
        Self {
            selection,
            is_dragging,
        }
    }

    fn interpret_mouse_event(
        &self,
        mouse_event: &mouse::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<SelectionMessage> {
        match mouse_event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => cursor
                .position_in(bounds)
                .map(|position| SelectionMessage::PointerPressed(to_display_point(position))),
            mouse::Event::CursorMoved { .. } if self.is_dragging => cursor
                .position_from(bounds.position())
                .map(|position| SelectionMessage::PointerMoved(to_display_point(position))),
            mouse::Event::ButtonReleased(mouse::Button::Left) if self.is_dragging => {
                Some(SelectionMessage::PointerReleased(
                    cursor.position_from(bounds.position()).map(to_display_point),
                ))
            }
            _ => None,
        }
    }
}

fn to_display_point(position: Point) -> DisplayPoint {
    DisplayPoint::new(position.x, position.y)
}

impl canvas::Program<SelectionMessage> for SelectionOverlay {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<SelectionMessage>> {
        match event {
            iced::Event::Mouse(mouse_event) => self
                .interpret_mouse_event(mouse_event, bounds, cursor)
                .map(|message| canvas::Action::publish(message).and_capture()),
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry<iced::Renderer>> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        if let Some(selection) = self.selection {
            let (left, top, right, bottom) = selection.normalized_bounds();
            let outline = canvas::Path::rectangle(
                Point::new(left, top),
                Size::new(right - left, bottom - top),
            );
            frame.stroke(
                &outline,
                canvas::Stroke::default()
                    .with_color(Color::from_rgb(1.0, 0.0, 0.0))
                    .with_width(SELECTION_STROKE_WIDTH),
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview_bounds() -> Rectangle {
        Rectangle::new(Point::new(50.0, 40.0), Size::new(600.0, 400.0))
    }

    #[test]
    fn test_press_inside_preview_reports_relative_position() {
        let overlay = SelectionOverlay::build(None, false);

        let message = overlay.interpret_mouse_event(
            &mouse::Event::ButtonPressed(mouse::Button::Left),
            preview_bounds(),
            mouse::Cursor::Available(Point::new(150.0, 90.0)),
        );

        assert_eq!(
            message,
            Some(SelectionMessage::PointerPressed(DisplayPoint::new(100.0, 50.0)))
        );
    }

    #[test]
    fn test_press_outside_preview_is_ignored() {
        let overlay = SelectionOverlay::build(None, false);

        let message = overlay.interpret_mouse_event(
            &mouse::Event::ButtonPressed(mouse::Button::Left),
            preview_bounds(),
            mouse::Cursor::Available(Point::new(10.0, 10.0)),
        );

        assert_eq!(message, None);
    }

    #[test]
    fn test_moves_are_ignored_unless_dragging() {
        let idle = SelectionOverlay::build(None, false);
        let dragging = SelectionOverlay::build(None, true);
        let moved = mouse::Event::CursorMoved {
            position: Point::new(700.0, 500.0),
        };
        let cursor = mouse::Cursor::Available(Point::new(700.0, 500.0));

        assert_eq!(
            idle.interpret_mouse_event(&moved, preview_bounds(), cursor),
            None
        );
        assert_eq!(
            dragging.interpret_mouse_event(&moved, preview_bounds(), cursor),
            Some(SelectionMessage::PointerMoved(DisplayPoint::new(650.0, 460.0)))
        );
    }

    #[test]
    fn test_release_without_cursor_reports_unknown_position() {
        let overlay = SelectionOverlay::build(None, true);

        let message = overlay.interpret_mouse_event(
            &mouse::Event::ButtonReleased(mouse::Button::Left),
            preview_bounds(),
            mouse::Cursor::Unavailable,
        );

        assert_eq!(message, Some(SelectionMessage::PointerReleased(None)));
    }

    #[test]
    fn test_right_button_is_ignored() {
        let overlay = SelectionOverlay::build(None, true);

        let message = overlay.interpret_mouse_event(
            &mouse::Event::ButtonPressed(mouse::Button::Right),
            preview_bounds(),
            mouse::Cursor::Available(Point::new(150.0, 90.0)),
        );

        assert_eq!(message, None);
    }
}
