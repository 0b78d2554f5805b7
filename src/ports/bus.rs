use crate::game::events::GameEvent;

pub trait EventHandler: Send + Sync {
    fn handle_events(&self, events: &[GameEvent]);
}

#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Box<dyn EventHandler>>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            handlers: Vec::new(),
        }
    }

    /// A bus that logs every event through `tracing`.
    pub fn with_logger() -> Self {
        let mut bus = EventBus::new();
        bus.register_handler(Box::new(TracingLogger));
        bus
    }

    pub fn register_handler(&mut self, h: Box<dyn EventHandler>) {
        self.handlers.push(h);
    }

    pub fn publish<I>(&self, events: I)
    where
        I: IntoIterator<Item = GameEvent>,
    {
        let events: Vec<GameEvent> = events.into_iter().collect();
        if events.is_empty() {
            return;
        }
        for h in &self.handlers {
            h.handle_events(&events);
        }
    }
}

pub struct TracingLogger;

impl EventHandler for TracingLogger {
    fn handle_events(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Rejected { .. } => tracing::warn!(target: "uno::events", "{}", event),
                _ => tracing::info!(target: "uno::events", "{}", event),
            }
        }
    }
}
