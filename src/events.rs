//! Notifications emitted by the controller and its selections.
//!
//! Every notification goes through [`Emitter::emit`], which runs the registered
//! handlers in registration order. A handler that returns an error is logged and
//! skipped; the remaining handlers for the same notification still run.

use crate::geometry::Rect;
use crate::selection::SelectionId;
use crate::surface::NodeId;
use serde::Serialize;
use tracing::error;

/// A notification and its payload.
///
/// Rects carried by `Start`, `Move` and `End` are in true (source image) scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CropEvent {
    #[serde(rename = "cropinit")]
    Init,
    #[serde(rename = "cropcreate")]
    Create { selection: SelectionId },
    #[serde(rename = "cropstart")]
    Start { selection: SelectionId, rect: Rect },
    #[serde(rename = "cropmove")]
    Move { selection: SelectionId, rect: Rect },
    #[serde(rename = "cropend")]
    End { selection: SelectionId, rect: Rect },
    #[serde(rename = "cropfocus")]
    Focus { selection: SelectionId },
    #[serde(rename = "cropblur")]
    Blur { selection: SelectionId },
    #[serde(rename = "cropremove")]
    Remove { selection: SelectionId },
    #[serde(rename = "cropimage")]
    Image {
        image: Option<NodeId>,
        width: f64,
        height: f64,
    },
    #[serde(rename = "configupdate")]
    ConfigUpdate,
}

impl CropEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Init => EventKind::Init,
            Self::Create { .. } => EventKind::Create,
            Self::Start { .. } => EventKind::Start,
            Self::Move { .. } => EventKind::Move,
            Self::End { .. } => EventKind::End,
            Self::Focus { .. } => EventKind::Focus,
            Self::Blur { .. } => EventKind::Blur,
            Self::Remove { .. } => EventKind::Remove,
            Self::Image { .. } => EventKind::Image,
            Self::ConfigUpdate => EventKind::ConfigUpdate,
        }
    }

    /// DOM event name, e.g. `cropmove`.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// The selection this notification concerns, if any.
    pub fn selection(&self) -> Option<SelectionId> {
        match self {
            Self::Create { selection }
            | Self::Start { selection, .. }
            | Self::Move { selection, .. }
            | Self::End { selection, .. }
            | Self::Focus { selection }
            | Self::Blur { selection }
            | Self::Remove { selection } => Some(*selection),
            Self::Init | Self::Image { .. } | Self::ConfigUpdate => None,
        }
    }

    /// True-scale rect carried by start/move/end notifications.
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::Start { rect, .. } | Self::Move { rect, .. } | Self::End { rect, .. } => {
                Some(*rect)
            }
            _ => None,
        }
    }
}

/// Notification type, used to subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Init,
    Create,
    Start,
    Move,
    End,
    Focus,
    Blur,
    Remove,
    Image,
    ConfigUpdate,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "cropinit",
            Self::Create => "cropcreate",
            Self::Start => "cropstart",
            Self::Move => "cropmove",
            Self::End => "cropend",
            Self::Focus => "cropfocus",
            Self::Blur => "cropblur",
            Self::Remove => "cropremove",
            Self::Image => "cropimage",
            Self::ConfigUpdate => "configupdate",
        }
    }
}

/// Handle returned by [`Emitter::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Handler = Box<dyn FnMut(&CropEvent) -> anyhow::Result<()>>;

struct Listener {
    id: ListenerId,
    /// `None` receives every notification
    kind: Option<EventKind>,
    handler: Handler,
}

/// Ordered list of notification handlers.
#[derive(Default)]
pub struct Emitter {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one notification type.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&CropEvent) -> anyhow::Result<()> + 'static,
    {
        self.push(Some(kind), Box::new(handler))
    }

    /// Subscribe to every notification.
    pub fn on_any<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&CropEvent) -> anyhow::Result<()> + 'static,
    {
        self.push(None, Box::new(handler))
    }

    fn push(&mut self, kind: Option<EventKind>, handler: Handler) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(Listener { id, kind, handler });
        id
    }

    /// Unsubscribe. Returns false if the id was unknown.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Run every matching handler. Returns how many handlers succeeded.
    pub fn emit(&mut self, event: &CropEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for listener in self
            .listeners
            .iter_mut()
            .filter(|l| l.kind.is_none_or(|k| k == kind))
        {
            match (listener.handler)(event) {
                Ok(()) => delivered += 1,
                Err(e) => error!(event = event.name(), "Error in event handler: {:#}", e),
            }
        }
        delivered
    }
}
