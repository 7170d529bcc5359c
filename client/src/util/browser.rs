//! Blocking browser dialogs used for destructive actions.
//!
//! Off-browser builds answer `true` / do nothing so page logic stays
//! testable.

/// Ask the user to confirm; `true` when confirmed.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        true
    }
}

/// Show a short notice.
pub fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
    }
}
