//! mount - ブラウザのイベントループにローダーを載せる
//!
//! # フロー
//! 1. `DOMContentLoaded` / `load` と scroll / resize / orientationchange のクロージャを作る
//! 2. トリガー用の関数は `WebPage` に登録し、ローダーが attach/detach する
//! 3. イベントごとに `handle_event` → `next_wake` に合わせて `setTimeout` で `tick`

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::page::WebPage;
use crate::app::{BuildError, LoaderBuilder, ViewportDeferredLoader};
use crate::domain::{HostEvent, LoaderError, Trigger};
use crate::ports::Clock;

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("failed to register `{event}` listener: {message}")]
    Listener { event: &'static str, message: String },
}

struct Mounted<C: Clock> {
    loader: RefCell<ViewportDeferredLoader<WebPage, C>>,
    window: web_sys::Window,
    timer: Cell<Option<i32>>,
    tick: RefCell<Option<Function>>,
}

impl<C: Clock> Mounted<C> {
    fn deliver(&self, event: HostEvent) {
        let Ok(mut loader) = self.loader.try_borrow_mut() else {
            log::debug!("{event:?} dropped, loader busy");
            return;
        };
        if let Err(err) = loader.handle_event(event) {
            report(&loader, &err);
        }
        drop(loader);
        self.reschedule();
    }

    fn pump(&self) {
        self.timer.set(None);
        let Ok(mut loader) = self.loader.try_borrow_mut() else {
            return;
        };
        if let Err(err) = loader.tick() {
            report(&loader, &err);
        }
        drop(loader);
        self.reschedule();
    }

    fn reschedule(&self) {
        if let Some(handle) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let Ok(loader) = self.loader.try_borrow() else {
            return;
        };
        let Some(wake) = loader.next_wake() else {
            return;
        };
        let delay = (wake - loader.clock().now()).num_milliseconds().max(0);
        let delay = i32::try_from(delay).unwrap_or(i32::MAX);
        drop(loader);

        let tick = self.tick.borrow();
        let Some(tick) = tick.as_ref() else {
            return;
        };
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(tick, delay)
        {
            Ok(handle) => self.timer.set(Some(handle)),
            Err(err) => log::error!("setTimeout failed: {err:?}"),
        }
    }
}

fn report<C: Clock>(loader: &ViewportDeferredLoader<WebPage, C>, err: &LoaderError) {
    match err {
        LoaderError::Populate { .. } => log::warn!("[{}] {err}", loader.id()),
        _ => log::error!("[{}] {err}", loader.id()),
    }
}

/// A mounted loader. Dropping it unregisters nothing but frees the closures,
/// so keep it alive (or [`MountHandle::forget`] it) for the page's lifetime.
pub struct MountHandle<C: Clock + 'static> {
    mounted: Rc<Mounted<C>>,
    closures: Vec<Closure<dyn FnMut()>>,
}

impl<C: Clock + 'static> MountHandle<C> {
    /// Run `f` against the loader, then reschedule its timer.
    pub fn with_loader<R>(
        &self,
        f: impl FnOnce(&mut ViewportDeferredLoader<WebPage, C>) -> R,
    ) -> R {
        let result = f(&mut self.mounted.loader.borrow_mut());
        self.mounted.reschedule();
        result
    }

    /// Re-discover marked elements (call after inserting content).
    pub fn request_load(&self) {
        self.with_loader(|loader| loader.request_load());
    }

    /// Leak the closures so the loader lives as long as the page.
    pub fn forget(self) {
        for closure in self.closures {
            closure.forget();
        }
        std::mem::forget(self.mounted);
    }
}

fn listener<C: Clock + 'static>(
    mounted: &Weak<Mounted<C>>,
    event: HostEvent,
) -> Closure<dyn FnMut()> {
    let mounted = mounted.clone();
    Closure::new(move || {
        if let Some(mounted) = mounted.upgrade() {
            mounted.deliver(event);
        }
    })
}

fn function(closure: &Closure<dyn FnMut()>) -> Function {
    closure.as_ref().unchecked_ref::<Function>().clone()
}

/// Build the loader and wire it to the page's events.
pub fn mount<C: Clock + 'static>(
    page: WebPage,
    builder: impl FnOnce(WebPage) -> LoaderBuilder<WebPage, C>,
) -> Result<MountHandle<C>, MountError> {
    let window = page.window().clone();
    let document = page.document().clone();
    let loader = builder(page.clone()).build()?;

    let mounted = Rc::new(Mounted {
        loader: RefCell::new(loader),
        window: window.clone(),
        timer: Cell::new(None),
        tick: RefCell::new(None),
    });
    let weak = Rc::downgrade(&mounted);

    let tick = {
        let weak = weak.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(mounted) = weak.upgrade() {
                mounted.pump();
            }
        })
    };
    *mounted.tick.borrow_mut() = Some(function(&tick));

    let mut closures = vec![tick];
    for trigger in Trigger::ALL {
        let closure = listener(&weak, trigger.into());
        page.register_listener(trigger, function(&closure));
        closures.push(closure);
    }

    let ready = listener(&weak, HostEvent::DomContentLoaded);
    document
        .add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref())
        .map_err(|err| MountError::Listener {
            event: "DOMContentLoaded",
            message: format!("{err:?}"),
        })?;
    closures.push(ready);

    let loaded = listener(&weak, HostEvent::Load);
    window
        .add_event_listener_with_callback("load", loaded.as_ref().unchecked_ref())
        .map_err(|err| MountError::Listener {
            event: "load",
            message: format!("{err:?}"),
        })?;
    closures.push(loaded);

    mounted.reschedule();
    Ok(MountHandle { mounted, closures })
}
