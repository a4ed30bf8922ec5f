//! Data Transfer Objects (DTO)
//!
//! 外部とのデータ交換に使用する型を定義します。
//! ドメインモデルとの変換は `conversion` モジュールで行います。

pub mod conversion;
pub mod http;
pub mod websocket;
