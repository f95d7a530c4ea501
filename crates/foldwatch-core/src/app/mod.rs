//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてローダー本体を実装します。
//!
//! # 主要コンポーネント
//! - **LoaderBuilder**: ローダーの構築とワイヤリング
//! - **ViewportDeferredLoader**: scan / dispatch とリスナー管理
//! - **TaskQueue**: 1 スロットに集約される scan 要求
//! - **EnvironmentContext**: 帯域・画面幅などの環境情報
//! - **run_until_idle**: tokio 上の駆動ループ

pub mod builder;
pub mod driver;
pub mod environment;
pub mod loader;
pub mod status;
pub mod task_queue;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, LoaderBuilder};
pub use self::driver::{DriveSummary, run_until_idle};
pub use self::environment::EnvironmentContext;
pub use self::loader::ViewportDeferredLoader;
pub use self::status::{LoaderStatus, Phase, ScanReport};
pub use self::task_queue::{ScanRequest, TaskQueue};
