//! Outbound channels.
//!
//! The only one today is the WhatsApp click-to-chat deep link; the
//! `QuoteChannel` trait it implements lives with its consumer in
//! `crate::wizard::submit`.

pub mod whatsapp;

pub use whatsapp::WhatsAppLink;
