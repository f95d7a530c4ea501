//! foldwatch-core
//!
//! Viewport-aware deferred loading: watch the elements carrying a marker class
//! and hand each one to a population callback, exactly once, when it comes
//! within `fold_distance` pixels of the visible viewport.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（marker, config, viewport, bandwidth, pending, errors, events, ids）
//! - **ports**: ホスト環境の抽象化（Document, Window, NetworkInformation, Clock, Populate）
//! - **limiter**: scan 要求のレート制限（Throttle, Debounce）
//! - **app**: アプリケーション層（loader, builder, task_queue, environment, driver, status）
//! - **impls**: ports の実装（InMemoryPage など開発用・テスト用）
//! - **web**: `web-sys` によるブラウザ実装（feature = "web"）

pub mod domain;
pub mod ports;
pub mod limiter;
pub mod app;
pub mod impls;

#[cfg(feature = "web")]
pub mod web;

pub use app::{LoaderBuilder, LoaderStatus, ViewportDeferredLoader};
pub use domain::{DeferMode, HostEvent, LoaderConfig, LoaderError, Marker, PopulateError, Trigger};
