//! 通知送信のヘルパー
//!
//! 通知は fire-and-forget で、送信失敗はログに残すだけでイベント処理は続行する。

use crate::domain::{ConnectionId, MessagePusher, Notification};

pub(crate) async fn push_or_log(
    pusher: &dyn MessagePusher,
    to: &ConnectionId,
    notification: Notification,
) {
    if let Err(e) = pusher.push_to(to, &notification).await {
        tracing::warn!(
            "Failed to push '{}' to '{}': {}",
            notification.kind(),
            to,
            e
        );
    }
}

pub(crate) async fn broadcast_or_log(
    pusher: &dyn MessagePusher,
    targets: Vec<ConnectionId>,
    notification: Notification,
) {
    if targets.is_empty() {
        return;
    }
    if let Err(e) = pusher.broadcast(targets, &notification).await {
        tracing::warn!("Failed to broadcast '{}': {}", notification.kind(), e);
    }
}

/// 操作が拒否されたことを本人に伝える
pub(crate) async fn deny(
    pusher: &dyn MessagePusher,
    to: &ConnectionId,
    action: &str,
    reason: impl ToString,
) {
    let reason = reason.to_string();
    tracing::info!("Denied '{}' for '{}': {}", action, to, reason);
    push_or_log(
        pusher,
        to,
        Notification::ActionDenied {
            action: action.to_string(),
            reason,
        },
    )
    .await;
}
