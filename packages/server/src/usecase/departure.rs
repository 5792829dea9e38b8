//! メンバーがルームを離れたとき（退出・切断）の通知

use crate::domain::{Departure, MessagePusher, Notification};

use super::notify::{broadcast_or_log, push_or_log};

/// 退出の影響を関係者に通知する
///
/// 1. 残りのメンバーに `user-left`
/// 2. 画面共有中だった場合は `screen-share-stopped`
/// 3. ホストが移った場合は `host-changed` と、新ホストへの保留中リクエストの再送
/// 4. ルームが消えた場合は待機者に `join-rejected`
pub(crate) async fn announce_departure(pusher: &dyn MessagePusher, departure: Departure) {
    let Departure {
        room,
        departed,
        remaining,
        new_host,
        share_stopped,
        pending_requests,
        orphaned_requests,
        room_deleted,
    } = departure;

    broadcast_or_log(
        pusher,
        remaining.clone(),
        Notification::UserLeft {
            identity: departed.clone(),
        },
    )
    .await;

    if share_stopped {
        broadcast_or_log(
            pusher,
            remaining.clone(),
            Notification::ScreenShareStopped { holder: departed },
        )
        .await;
    }

    if let Some(host) = new_host {
        tracing::info!("Host of room '{}' moved to '{}'", room, host.id);
        let host_id = host.id.clone();
        broadcast_or_log(pusher, remaining, Notification::HostChanged { host }).await;
        for entry in pending_requests {
            push_or_log(
                pusher,
                &host_id,
                Notification::UserRequestedJoin {
                    room: room.clone(),
                    requester: entry.into(),
                },
            )
            .await;
        }
    }

    if room_deleted {
        tracing::info!("Room '{}' deleted", room);
        for entry in orphaned_requests {
            push_or_log(
                pusher,
                &entry.connection_id,
                Notification::JoinRejected { room: room.clone() },
            )
            .await;
        }
    }
}
