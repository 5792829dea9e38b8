//! 値オブジェクト
//!
//! 接続 ID・表示名・ルームキーなど、生の文字列をそのまま扱わずに
//! 検証済みの型として持ち回るための定義です。

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// 表示名が未設定・空のときに使う名前
pub const DEFAULT_DISPLAY_NAME: &str = "Guest";

const MAX_DISPLAY_NAME_CHARS: usize = 64;
const MAX_ROOM_KEY_CHARS: usize = 2048;
const MAX_MESSAGE_CHARS: usize = 4096;

/// 接続 ID
///
/// トランスポート層（WebSocket のアップグレード時）が払い出す不透明なトークン。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 接続 ID の生成器（UUID v4）
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// 表示名
///
/// 空文字列（空白のみを含む）の場合は [`DEFAULT_DISPLAY_NAME`] にフォールバックする。
/// 上限より長い名前は拒否せずに先頭から切り詰める。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::guest());
        }
        let name: String = trimmed.chars().take(MAX_DISPLAY_NAME_CHARS).collect();
        Ok(Self(name.trim_end().to_string()))
    }

    pub fn guest() -> Self {
        Self(DEFAULT_DISPLAY_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Default for DisplayName {
    fn default() -> Self {
        Self::guest()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルームキー（共有 URL / パスから導出される会議の識別子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomKey(String);

impl RoomKey {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::RoomKeyEmpty);
        }
        if value.chars().count() > MAX_ROOM_KEY_CHARS {
            return Err(ValueObjectError::RoomKeyTooLong(MAX_ROOM_KEY_CHARS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomKey {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャットメッセージ本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::MessageContentEmpty);
        }
        if value.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ValueObjectError::MessageContentTooLong(MAX_MESSAGE_CHARS));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（UTC, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `earlier` からの経過ミリ秒（負にはならない）
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        (self.0 - earlier.0).max(0)
    }
}

/// シグナリングのペイロード（SDP / ICE）
///
/// 中身は両端のクライアントだけが解釈する。サーバーは検査せずに転送する。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SignalPayload(serde_json::Value);

impl SignalPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}
