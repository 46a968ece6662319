//! WhatsApp click-to-chat deep link.
//!
//! Builds `<base>/<phone>?text=<encoded>` and opens it with the platform
//! opener. The message must be percent-encoded as a URL query value before
//! concatenation — wa.me truncates at a raw `&` or `#` and newlines would
//! break the URL outright.

use std::process::Command;
use std::sync::Mutex;

use crate::config::WhatsAppConfig;
use crate::error::Error;
use crate::utils::normalize_phone;
use crate::wizard::QuoteChannel;

pub struct WhatsAppLink {
    base_url: String,
    open_links: bool,
    /// Last link built by `deliver`, for showing it once the TUI has
    /// released the terminal (print-only mode).
    last_link: Mutex<Option<String>>,
}

impl WhatsAppLink {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            open_links: true,
            last_link: Mutex::new(None),
        }
    }

    pub fn from_config(config: &WhatsAppConfig) -> Self {
        let mut link = Self::new(config.base_url.clone());
        link.open_links = config.open_links;
        link
    }

    /// Don't open a browser; the caller prints `last_link` instead.
    pub fn print_only(mut self) -> Self {
        self.open_links = false;
        self
    }

    /// The link built by the most recent successful `deliver`.
    pub fn last_link(&self) -> Option<String> {
        self.last_link.lock().ok().and_then(|l| l.clone())
    }

    /// Build the click-to-chat URL for a destination and message.
    pub fn link(&self, destination: &str, message: &str) -> String {
        let phone = normalize_phone(destination);
        format!(
            "{}/{}?text={}",
            self.base_url.trim_end_matches('/'),
            phone,
            urlencoding::encode(message)
        )
    }
}

impl QuoteChannel for WhatsAppLink {
    fn deliver(&self, destination: &str, message: &str) -> Result<(), Error> {
        let phone = normalize_phone(destination);
        if phone.is_empty() {
            return Err(Error::Channel(
                "destination phone number is empty".to_string(),
            ));
        }

        let url = self.link(destination, message);

        if self.open_links {
            open_in_browser(&url)
                .map_err(|e| Error::Channel(format!("failed to open {url}: {e}")))?;
            tracing::debug!("opened WhatsApp link for {phone}");
        }

        if let Ok(mut last) = self.last_link.lock() {
            *last = Some(url);
        }
        Ok(())
    }
}

/// Open a URL with the platform opener, detached.
fn open_in_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd").args(["/C", "start", "", url]).spawn()?;
    }

    Ok(())
}
