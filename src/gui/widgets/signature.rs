use iced::{
    Color, Element, Length, Rectangle, Renderer, Theme, mouse,
    widget::canvas::{self, Action, Event, Frame, Geometry, Path, Stroke},
};

use crate::core::gate::{Point, SignatureGate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenEvent {
    Down(Point),
    Move(Point),
    Up,
}

struct SignaturePad<'a, Message> {
    gate: &'a SignatureGate,
    on_pen: fn(PenEvent) -> Message,
}

fn local(position: iced::Point) -> Point {
    Point::new(position.x, position.y)
}

impl<Message> canvas::Program<Message> for SignaturePad<'_, Message> {
    /// Whether the left button went down inside the pad.
    type State = bool;

    fn update(
        &self,
        pressed: &mut bool,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        let Event::Mouse(event) = event else {
            return None;
        };
        match event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let position = cursor.position_in(bounds)?;
                *pressed = true;
                Some(Action::publish((self.on_pen)(PenEvent::Down(local(position)))).and_capture())
            }
            mouse::Event::CursorMoved { .. } if *pressed => {
                let position = cursor.position_in(bounds)?;
                Some(Action::publish((self.on_pen)(PenEvent::Move(local(position)))).and_capture())
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if *pressed => {
                *pressed = false;
                Some(Action::publish((self.on_pen)(PenEvent::Up)))
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _pressed: &bool,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(iced::Point::ORIGIN, bounds.size(), Color::WHITE);

        let pen = Stroke::default().with_width(2.0).with_color(Color::BLACK);
        let pending = self.gate.pending_stroke();
        for stroke in self.gate.strokes().iter().map(Vec::as_slice).chain(pending) {
            let Some((first, rest)) = stroke.split_first() else {
                continue;
            };
            let path = Path::new(|b| {
                b.move_to(iced::Point::new(first.x, first.y));
                for point in rest {
                    b.line_to(iced::Point::new(point.x, point.y));
                }
            });
            frame.stroke(&path, pen);
        }

        if self.gate.is_auto_filled() {
            frame.fill_text(canvas::Text {
                content: "Signed electronically".to_string(),
                position: iced::Point::new(20.0, bounds.height / 2.0 - 14.0),
                size: 28.0.into(),
                color: Color::BLACK,
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _pressed: &bool,
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

/// Free-hand drawing area backed by `gate`.
pub fn signature_pad<'a, Message: 'a>(
    gate: &'a SignatureGate,
    on_pen: fn(PenEvent) -> Message,
) -> Element<'a, Message> {
    canvas::Canvas::new(SignaturePad { gate, on_pen })
        .width(Length::Fill)
        .height(180)
        .into()
}
