//! NetworkInformation port - `navigator.connection` 相当

use crate::domain::ConnectionInfo;

pub trait NetworkInformation {
    /// `None` when the host exposes no connection information.
    fn connection(&self) -> Option<ConnectionInfo>;
}
