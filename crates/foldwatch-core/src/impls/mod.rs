//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryPage**: シミュレートされたページ（Document / Window / NetworkInformation）
//! - **Recorder**: dispatch された要素を記録するコールバック
//!
//! ブラウザ向けの実装は `web` モジュール（feature = "web"）にあります。

pub mod inmem_page;
pub mod recorder;

pub use self::inmem_page::{InMemoryPage, NodeId};
pub use self::recorder::Recorder;
