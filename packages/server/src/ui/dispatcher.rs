//! Serial event dispatcher.
//!
//! Every WebSocket connection feeds its events into one unbounded queue.
//! A single task drains the queue and runs each event to completion before
//! taking the next, so every event is one atomic step against session state
//! and events from one connection are handled in arrival order. A panic in
//! one event is caught and logged; the queue keeps draining.

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use futures_util::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{Command, ConnectionId, MessagePusher, PusherChannel, SessionRepository},
    infrastructure::dto::websocket::ClientMessage,
    usecase::{
        AdmitParticipantUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        JoinRoomUseCase, KickParticipantUseCase, RejectParticipantUseCase, RelaySignalUseCase,
        ScreenShareUseCase, SendMessageUseCase, ToggleVideoUseCase, UseCaseError, deny,
    },
};

/// Events produced by the WebSocket handlers.
#[derive(Debug)]
pub enum InboundEvent {
    Connected {
        connection_id: ConnectionId,
        sender: PusherChannel,
    },
    Message {
        connection_id: ConnectionId,
        message: ClientMessage,
    },
    Disconnected {
        connection_id: ConnectionId,
    },
}

impl InboundEvent {
    /// Short description for logs.
    fn label(&self) -> String {
        match self {
            Self::Connected { connection_id, .. } => format!("connect of '{connection_id}'"),
            Self::Message {
                connection_id,
                message,
            } => format!("'{}' from '{}'", message.kind(), connection_id),
            Self::Disconnected { connection_id } => format!("disconnect of '{connection_id}'"),
        }
    }
}

pub type EventSender = mpsc::UnboundedSender<InboundEvent>;

pub struct EventDispatcher {
    message_pusher: Arc<dyn MessagePusher>,
    connect_participant_usecase: ConnectParticipantUseCase,
    join_room_usecase: JoinRoomUseCase,
    admit_participant_usecase: AdmitParticipantUseCase,
    reject_participant_usecase: RejectParticipantUseCase,
    kick_participant_usecase: KickParticipantUseCase,
    relay_signal_usecase: RelaySignalUseCase,
    toggle_video_usecase: ToggleVideoUseCase,
    screen_share_usecase: ScreenShareUseCase,
    send_message_usecase: SendMessageUseCase,
    disconnect_participant_usecase: DisconnectParticipantUseCase,
}

impl EventDispatcher {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        let repo = || repository.clone();
        let pusher = || message_pusher.clone();
        Self {
            connect_participant_usecase: ConnectParticipantUseCase::new(repo(), pusher()),
            join_room_usecase: JoinRoomUseCase::new(repo(), pusher()),
            admit_participant_usecase: AdmitParticipantUseCase::new(repo(), pusher()),
            reject_participant_usecase: RejectParticipantUseCase::new(repo(), pusher()),
            kick_participant_usecase: KickParticipantUseCase::new(repo(), pusher()),
            relay_signal_usecase: RelaySignalUseCase::new(repo(), pusher()),
            toggle_video_usecase: ToggleVideoUseCase::new(repo(), pusher()),
            screen_share_usecase: ScreenShareUseCase::new(repo(), pusher()),
            send_message_usecase: SendMessageUseCase::new(repo(), pusher()),
            disconnect_participant_usecase: DisconnectParticipantUseCase::new(repo(), pusher()),
            message_pusher: message_pusher.clone(),
        }
    }

    /// Start the dispatcher task and return the queue handle.
    ///
    /// The task stops once every [`EventSender`] clone has been dropped.
    pub fn spawn(self) -> (EventSender, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(self.run(rx));
        (tx, handle)
    }

    async fn run(self, mut rx: mpsc::UnboundedReceiver<InboundEvent>) {
        tracing::debug!("Event dispatcher started");
        while let Some(event) = rx.recv().await {
            let label = event.label();
            if let Err(panic) = AssertUnwindSafe(self.dispatch(event)).catch_unwind().await {
                tracing::error!(
                    "Handler for {} panicked: {}",
                    label,
                    panic_message(&*panic)
                );
            }
        }
        tracing::debug!("Event dispatcher stopped");
    }

    /// Handle one event. Errors are logged and never escape the event.
    pub async fn dispatch(&self, event: InboundEvent) {
        match event {
            InboundEvent::Connected {
                connection_id,
                sender,
            } => {
                if let Err(e) = self
                    .connect_participant_usecase
                    .execute(connection_id.clone(), sender)
                    .await
                {
                    tracing::warn!("Failed to set up connection '{}': {}", connection_id, e);
                }
            }
            InboundEvent::Message {
                connection_id,
                message,
            } => self.handle_message(connection_id, message).await,
            InboundEvent::Disconnected { connection_id } => {
                self.disconnect_participant_usecase
                    .execute(connection_id)
                    .await;
            }
        }
    }

    async fn handle_message(&self, from: ConnectionId, message: ClientMessage) {
        let kind = message.kind();
        let command = match Command::try_from(message) {
            Ok(command) => command,
            Err(e) => {
                deny(self.message_pusher.as_ref(), &from, kind, &e).await;
                return;
            }
        };

        let result = match command {
            Command::Join { room, display_name } => self
                .join_room_usecase
                .execute(from.clone(), room, display_name)
                .await
                .map(drop),
            Command::Admit { room, requester } => self
                .admit_participant_usecase
                .execute(from.clone(), room, requester)
                .await
                .map(drop),
            Command::Reject { room, requester } => self
                .reject_participant_usecase
                .execute(from.clone(), room, requester)
                .await
                .map(drop),
            Command::Kick { target } => self
                .kick_participant_usecase
                .execute(from.clone(), target)
                .await
                .map(drop),
            Command::Signal { to, payload } => {
                self.relay_signal_usecase
                    .execute(from.clone(), to, payload)
                    .await
            }
            Command::ToggleVideo { enabled } => self
                .toggle_video_usecase
                .execute(from.clone(), enabled)
                .await
                .map(drop),
            Command::StartScreenShare => self
                .screen_share_usecase
                .start(from.clone())
                .await
                .map(drop),
            Command::StopScreenShare => self
                .screen_share_usecase
                .stop(from.clone())
                .await
                .map(drop),
            Command::Chat { content } => self
                .send_message_usecase
                .execute(from.clone(), content)
                .await
                .map(drop),
        };

        if let Err(e) = result {
            log_rejected(&from, kind, &e);
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

fn log_rejected(from: &ConnectionId, kind: &str, error: &UseCaseError) {
    if error.is_not_found() {
        tracing::debug!("'{}' from '{}' had no effect: {}", kind, from, error);
    } else {
        tracing::info!("'{}' from '{}' rejected: {}", kind, from, error);
    }
}
