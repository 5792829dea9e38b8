//! UseCase 層
//!
//! 1 つのクライアントイベントに対応する処理を、Repository と MessagePusher を使って実装します。

mod admit_participant;
mod connect_participant;
mod departure;
mod disconnect_participant;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod kick_participant;
mod notify;
mod reject_participant;
mod relay_signal;
mod screen_share;
mod send_message;
mod toggle_video;

#[cfg(test)]
pub(crate) mod test_support;

pub use admit_participant::AdmitParticipantUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::UseCaseError;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use kick_participant::KickParticipantUseCase;
pub use reject_participant::RejectParticipantUseCase;
pub use relay_signal::RelaySignalUseCase;
pub use screen_share::ScreenShareUseCase;
pub use send_message::SendMessageUseCase;
pub use toggle_video::ToggleVideoUseCase;

pub(crate) use notify::deny;
