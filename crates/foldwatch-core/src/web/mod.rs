//! Web - ブラウザ上のホスト実装（feature = "web"）
//!
//! ```ignore
//! let page = WebPage::from_global().expect("browser");
//! let handle = mount(page, |page| {
//!     let target = page.clone();
//!     LoaderBuilder::new(page).populate(move |el: &WebElement| fill(&target, el))
//! })?;
//! handle.forget();
//! ```

mod mount;
mod page;

pub use self::mount::{MountError, MountHandle, mount};
pub use self::page::{WebElement, WebPage};
