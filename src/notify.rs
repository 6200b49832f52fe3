//! Desktop notification shown when a countdown completes.

use crate::config::{NOTIFICATION_BODY, NOTIFICATION_ICON, NOTIFICATION_TITLE};
use log::{info, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Notification, NotificationOptions, NotificationPermission};

fn notifications_supported() -> bool {
    js_sys::Reflect::has(&gloo_utils::window(), &JsValue::from_str("Notification")).unwrap_or(false)
}

/// Ask for permission once, while the browser still reports `default`.
pub fn request_permission() {
    if !notifications_supported() || Notification::permission() != NotificationPermission::Default {
        return;
    }
    match Notification::request_permission() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(answer) => info!("Notification permission: {:?}", answer.as_string()),
                Err(e) => warn!("Notification permission request failed: {:?}", e),
            }
        }),
        Err(e) => warn!("Could not request notification permission: {:?}", e),
    }
}

pub fn notify_complete() {
    if !notifications_supported() || Notification::permission() != NotificationPermission::Granted {
        return;
    }
    let options = NotificationOptions::new();
    options.set_body(NOTIFICATION_BODY);
    options.set_icon(NOTIFICATION_ICON);
    if let Err(e) = Notification::new_with_options(NOTIFICATION_TITLE, &options) {
        warn!("Could not show completion notification: {:?}", e);
    }
}
