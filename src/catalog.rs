//! Studio catalogs: body locations, size tiers, and style tags.
//!
//! Loaded from `~/.inkbook/catalog.toml` at runtime.
//! Falls back to compiled-in defaults if the file is missing.
//! The artist can edit the file live — changes take effect the next time
//! the wizard opens.

use serde::{Deserialize, Serialize};

/// A body-location entry. `id` is the stable code stored in leads and held
/// in the wizard selection; `label` is what clients see and what ends up in
/// the WhatsApp message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub id: String,
    pub label: String,
}

/// A size tier: display label, descriptive subtitle, and the indicative
/// starting price shown next to it. The price is a display string, not a
/// number — "A partir de R$ 100" is the product copy, not an amount to
/// compute with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub id: String,
    pub label: String,
    pub subtitle: String,
    pub price: String,
}

/// The full catalog consumed by the wizard and the message composer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Style tags offered on step 3. Free labels, no codes.
    #[serde(default)]
    pub styles: Vec<String>,

    #[serde(default)]
    pub locations: Vec<LocationEntry>,

    #[serde(default)]
    pub sizes: Vec<SizeEntry>,
}

impl Catalog {
    /// Resolve a location code to its display label.
    pub fn location_label(&self, id: &str) -> Option<&str> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.label.as_str())
    }

    /// Resolve a size code to its display label.
    pub fn size_label(&self, id: &str) -> Option<&str> {
        self.size(id).map(|s| s.label.as_str())
    }

    /// Full size entry for a code (the review step shows subtitle and price).
    pub fn size(&self, id: &str) -> Option<&SizeEntry> {
        self.sizes.iter().find(|s| s.id == id)
    }

    /// Load from ~/.inkbook/catalog.toml.
    /// Returns compiled-in defaults if the file is missing or unreadable.
    pub fn load() -> Self {
        let path = crate::config::inkbook_home().join("catalog.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            match toml::from_str::<Catalog>(&content) {
                Ok(catalog) => return catalog,
                Err(e) => {
                    tracing::warn!("catalog.toml is invalid, using defaults: {e}");
                }
            }
        }
        Self::defaults()
    }

    /// Write the default catalog file to ~/.inkbook/catalog.toml if it
    /// doesn't exist.
    pub fn write_defaults_if_missing() {
        let path = crate::config::inkbook_home().join("catalog.toml");
        if !path.exists() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = std::fs::write(&path, DEFAULT_CATALOG_TOML);
        }
    }

    /// Compiled-in defaults — used as fallback if file missing.
    pub fn defaults() -> Self {
        toml::from_str(DEFAULT_CATALOG_TOML).unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Default catalog (compiled in as fallback)
// ─────────────────────────────────────────────────────────────────────────────
const DEFAULT_CATALOG_TOML: &str = r#"
# Inkbook Catalog
# Edit this file to customize the options the quote wizard offers.
# Changes take effect the next time the wizard opens — no rebuild needed.
#
# Rules:
#   - location/size `id`s are stored in leads; keep them stable once live
#   - `price` is display copy, shown verbatim next to the size tier

styles = [
  "Blackwork",
  "Realismo",
  "Fine Line",
  "Old School",
  "Tribal",
  "Aquarela",
  "Geométrico",
  "Minimalista",
]

[[locations]]
id = "braco"
label = "Braço"

[[locations]]
id = "perna"
label = "Perna"

[[locations]]
id = "costas"
label = "Costas"

[[locations]]
id = "peito"
label = "Peito"

[[locations]]
id = "mao"
label = "Mão"

[[locations]]
id = "pescoco"
label = "Pescoço"

[[locations]]
id = "outro"
label = "Outro"

[[sizes]]
id = "mini"
label = "Mini"
subtitle = "Até 5cm"
price = "A partir de R$ 100"

[[sizes]]
id = "pequeno"
label = "Pequeno"
subtitle = "5-10cm"
price = "A partir de R$ 150"

[[sizes]]
id = "medio"
label = "Médio"
subtitle = "Tamanho da palma"
price = "A partir de R$ 300"

[[sizes]]
id = "grande"
label = "Grande"
subtitle = "+20cm"
price = "A partir de R$ 500"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let catalog = Catalog::defaults();
        assert_eq!(catalog.locations.len(), 7);
        assert_eq!(catalog.sizes.len(), 4);
        assert_eq!(catalog.styles.len(), 8);
    }

    #[test]
    fn test_location_lookup() {
        let catalog = Catalog::defaults();
        assert_eq!(catalog.location_label("braco"), Some("Braço"));
        assert_eq!(catalog.location_label("pescoco"), Some("Pescoço"));
        assert_eq!(catalog.location_label("nuca"), None);
    }

    #[test]
    fn test_size_lookup() {
        let catalog = Catalog::defaults();
        assert_eq!(catalog.size_label("pequeno"), Some("Pequeno"));
        let grande = catalog.size("grande").unwrap();
        assert_eq!(grande.subtitle, "+20cm");
        assert_eq!(grande.price, "A partir de R$ 500");
        assert!(catalog.size("xg").is_none());
    }

    #[test]
    fn test_outro_fallback_entry_present() {
        // The last location is the catch-all the original site offers
        let catalog = Catalog::defaults();
        assert_eq!(catalog.locations.last().unwrap().id, "outro");
    }

    #[test]
    fn test_invalid_toml_falls_back_to_default() {
        let parsed: Result<Catalog, _> = toml::from_str("styles = 3");
        assert!(parsed.is_err());
    }
}
