//! Persistence models: leads from the quote wizard plus the admin-managed
//! catalog tables (portfolio, pricing tiers, promotions, site settings).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline status of a captured lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadStatus {
    /// Fresh from the wizard, not yet contacted.
    #[default]
    Novo,
    Contatado,
    Fechado,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Novo => "novo",
            Self::Contatado => "contatado",
            Self::Fechado => "fechado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "novo" => Some(Self::Novo),
            "contatado" => Some(Self::Contatado),
            "fechado" => Some(Self::Fechado),
            _ => None,
        }
    }
}

/// A quote request captured at wizard submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub body_location: Option<String>,
    pub size: Option<String>,
    pub styles: Vec<String>,
    pub description: String,
    #[serde(skip)]
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

/// Lead payload as handed over by the wizard, before id/status/timestamp
/// are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub body_location: Option<String>,
    pub size: Option<String>,
    pub styles: Vec<String>,
    pub description: String,
}

/// One image in the public gallery.
#[derive(Debug, Clone)]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// One pricing row on the public page.
#[derive(Debug, Clone)]
pub struct PricingTier {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub subtitle: String,
    pub price: String,
    pub created_at: DateTime<Utc>,
}

/// Subtitle presets offered when adding a pricing tier; anything else is
/// entered as free-form custom text.
pub const SUBTITLE_PRESETS: &[&str] = &[
    "Até 5cm",
    "Até 10cm",
    "Até 15cm",
    "Maior que 15cm - Consultar WhatsApp",
];

/// A promotion; only active ones are shown publicly.
#[derive(Debug, Clone)]
pub struct Promotion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub original_price: String,
    pub promo_price: String,
    pub image_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Single-row studio settings. The wizard prefers `phone_number` from here
/// over the config file when set.
#[derive(Debug, Clone, Default)]
pub struct SiteSettings {
    pub profile_image_url: String,
    pub instagram_handle: String,
    pub phone_number: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_status_roundtrip() {
        for status in [LeadStatus::Novo, LeadStatus::Contatado, LeadStatus::Fechado] {
            assert_eq!(LeadStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(LeadStatus::parse("perdido"), None);
    }

    #[test]
    fn test_default_status_is_novo() {
        assert_eq!(LeadStatus::default(), LeadStatus::Novo);
    }
}
