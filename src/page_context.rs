/// The page the popup was opened on
use serde::{Deserialize, Serialize};

/// Title shown when the browser gives us no active tab
pub const NO_ACTIVE_TAB_TITLE: &str = "No active tab found";

/// Error shown in place of a summary when there is no active tab
pub const NO_ACTIVE_TAB_ERROR: &str = "Cannot access current tab.";

/// URL and title of the active tab, captured once when the popup opens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageContext {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl PageContext {
    #[cfg(test)]
    pub fn new(url: String, title: String) -> PageContext {
        PageContext { url, title }
    }
}
