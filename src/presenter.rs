//! Live description of the shape being drawn.

use std::fmt;

use crate::session::DrawingSession;
use crate::style::DrawingStyle;
use crate::surface::ShapeDescription;

/// Identifies a subscription for [`Presenter::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ShapeDescription)>;

/// Derives the renderable in-progress shape from a [`DrawingSession`] and
/// pushes every new description to its subscribers.
pub struct Presenter {
    style: DrawingStyle,
    current: ShapeDescription,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Presenter {
    pub fn new(style: DrawingStyle) -> Self {
        let current = describe(&style, &DrawingSession::new());
        Self {
            style,
            current,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn style(&self) -> &DrawingStyle {
        &self.style
    }

    /// The most recent description.
    pub fn current(&self) -> &ShapeDescription {
        &self.current
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ShapeDescription) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Rebuild the description from `session` and notify each subscriber
    /// once, in subscription order.
    pub fn recompute(&mut self, session: &DrawingSession) -> &ShapeDescription {
        self.current = describe(&self.style, session);
        for (_, listener) in &mut self.listeners {
            listener(&self.current);
        }
        &self.current
    }
}

impl fmt::Debug for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn describe(style: &DrawingStyle, session: &DrawingSession) -> ShapeDescription {
    let closed = session.is_closed();
    ShapeDescription {
        points: session.flattened(),
        closed,
        fill: style.live_fill(closed),
        stroke: style.stroke,
        stroke_width: style.stroke_width,
    }
}
