use log::warn;
use wechill_domain::Dialog;

/// Blocking `window.confirm` and `window.alert` prompts.
pub struct BrowserDialog;

impl Dialog for BrowserDialog {
    fn confirm(&self, message: &str) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        match window.confirm_with_message(message) {
            Ok(confirmed) => confirmed,
            Err(err) => {
                warn!("failed to show confirmation: {err:?}");
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.alert_with_message(message) {
                warn!("failed to show alert: {err:?}");
            }
        }
    }
}
