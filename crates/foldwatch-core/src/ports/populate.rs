//! Populate port - 要素の中身を埋めるユーザー定義コールバック
//!
//! ローダーは要素ごとに一度だけ `populate` を呼びます。戻り値の `Ok(())` は何も運びません。
//! 非同期に中身を取ってくる場合はコールバック側でスケジュールしてください（ローダーは追跡しない）。

use crate::domain::PopulateError;

pub trait Populate<E> {
    fn populate(&mut self, element: &E) -> Result<(), PopulateError>;
}

impl<E, F> Populate<E> for F
where
    F: FnMut(&E) -> Result<(), PopulateError>,
{
    fn populate(&mut self, element: &E) -> Result<(), PopulateError> {
        self(element)
    }
}

/// Default callback: does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPopulate;

impl<E: std::fmt::Debug> Populate<E> for NoopPopulate {
    fn populate(&mut self, element: &E) -> Result<(), PopulateError> {
        log::trace!("no populate callback configured, skipping {element:?}");
        Ok(())
    }
}
