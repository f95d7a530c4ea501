//! Rate limiters for scan requests.
//!
//! どちらもタイマーを持たない純粋な状態機械です。時刻は呼び出し側が渡し、
//! `deadline()` で次に `poll` すべき時刻をホストに伝えます。

mod debounce;
mod throttle;

pub use debounce::{Debounce, Edge};
pub use throttle::{Admission, Throttle};
