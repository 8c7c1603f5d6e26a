#![warn(clippy::pedantic)]

use std::{cell::RefCell, rc::Rc, sync::Arc};

use wechill_domain::App;
use wechill_storage::{TemplateStore, local_storage::LocalStorage};

pub mod dialog;
pub mod log;
pub mod ticker;

use dialog::BrowserDialog;
use ticker::Ticker;

pub type WebApp = App<TemplateStore<LocalStorage>, BrowserDialog>;

/// Set up logging and create the application backed by the browser's storage.
///
/// The rest countdown is driven for as long as the returned application is alive. The
/// presentation layer renders by subscribing to it.
#[must_use]
pub fn init() -> Rc<RefCell<WebApp>> {
    if let Err(err) = log::init(Arc::new(log::LogBook::new(LocalStorage))) {
        gloo_console::warn!(err.to_string());
    }

    let app = Rc::new(RefCell::new(App::new(
        TemplateStore::new(LocalStorage),
        BrowserDialog,
    )));
    let ticker = RefCell::new(Ticker::default());
    let weak = Rc::downgrade(&app);
    app.borrow_mut()
        .subscribe(move |state| ticker.borrow_mut().sync(&state.rest, &weak));
    app
}
