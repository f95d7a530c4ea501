//! Ports - ホスト環境への抽象化レイヤー
//!
//! 各 trait はホスト（ブラウザ、テスト用のインメモリページなど）へのインターフェースです。
//! ローダーはこれらの trait だけに依存し、グローバルな `window` には触れません。

pub mod clock;
pub mod document;
pub mod network;
pub mod populate;
pub mod window;

pub use self::clock::{Clock, FixedClock, ManualClock, SystemClock, TokioClock};
pub use self::document::{Document, ReadyState};
pub use self::network::NetworkInformation;
pub use self::populate::{NoopPopulate, Populate};
pub use self::window::Window;

/// Everything a loader needs from its host.
pub trait Host: Document + Window + NetworkInformation {}

impl<T: Document + Window + NetworkInformation> Host for T {}
