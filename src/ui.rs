// file: src/ui.rs
// description: presentation loop that renders client events to the console

use crate::{
    animation::ParticleAnimator,
    events::{ClientEvent, EventReceiver},
    formatter::StatusFormatter,
};
use tracing::{debug, info};

/// Consumes client events and renders them. Reads the live particle batch
/// from its animator handle; everything else arrives on the event bus.
pub struct UIController {
    event_receiver: EventReceiver,
    formatter: StatusFormatter,
    animator: ParticleAnimator,
}

impl UIController {
    pub fn new(
        event_receiver: EventReceiver,
        formatter: StatusFormatter,
        animator: ParticleAnimator,
    ) -> Self {
        Self {
            event_receiver,
            formatter,
            animator,
        }
    }

    pub async fn run(&mut self) {
        self.formatter.print_banner();
        while let Some(event) = self.event_receiver.recv().await {
            if !self.handle_event(event) {
                break;
            }
        }
    }

    fn handle_event(&mut self, event: ClientEvent) -> bool {
        match event {
            ClientEvent::Starting => {
                info!("Client starting...");
            }
            ClientEvent::Connecting { url } => {
                self.formatter.print_connection("CONNECTING", &url);
            }
            ClientEvent::Connected { connection_id } => {
                self.formatter
                    .print_connection("ONLINE", &format!("session {}", connection_id));
            }
            ClientEvent::StatusChanged {
                state,
                confidence,
                successes,
            } => {
                self.formatter.print_status(state, confidence);
                self.formatter.print_score(successes);
            }
            ClientEvent::BurstStarted { particles } => {
                match self.animator.snapshot() {
                    Some(batch) => self.formatter.print_burst(&batch),
                    // The window can elapse before this event is drained;
                    // nothing to draw then.
                    None => debug!("Burst of {} particles already cleared", particles),
                }
            }
            ClientEvent::MessageReceived { raw_message } => {
                debug!("Received message: {}", raw_message);
            }
            ClientEvent::MalformedPayload { reason } => {
                debug!("Dropped malformed payload: {}", reason);
            }
            ClientEvent::ConnectionFailed(error) => {
                self.formatter.print_error(&error);
            }
            ClientEvent::Disconnected => {
                self.formatter.print_connection("OFFLINE", "feed disconnected");
            }
            ClientEvent::Stopping => {
                self.formatter.print_connection("STOPPING", "client shutting down");
                return false;
            }
        }

        true
    }
}
