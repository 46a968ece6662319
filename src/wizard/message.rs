//! Quote message composition.
//!
//! Pure text assembly: selection + catalog in, WhatsApp message out.
//! Deterministic, no clock and no I/O. Fields render in a fixed order
//! (location, size, styles, optional idea block, closing line) so the
//! artist can triage quotes at a glance.

use crate::catalog::Catalog;

use super::types::Selection;

/// Rendered when no style was picked.
pub const STYLES_NOT_SPECIFIED: &str = "Não especificado";

/// Fixed closing line inviting follow-up.
pub const CLOSING_LINE: &str = "_Podemos ver o valor exato?_";

/// Compose the WhatsApp quote message.
///
/// Catalog codes resolve to display labels; unknown codes fall back to the
/// raw code. The idea block is omitted entirely (not rendered empty) when
/// the description is blank after trimming — the text itself goes in
/// verbatim, untrimmed.
pub fn compose(selection: &Selection, catalog: &Catalog) -> String {
    let location = selection
        .body_location
        .as_deref()
        .map(|id| catalog.location_label(id).unwrap_or(id))
        .unwrap_or_default();
    let size = selection
        .size
        .as_deref()
        .map(|id| catalog.size_label(id).unwrap_or(id))
        .unwrap_or_default();
    let styles = if selection.styles.is_empty() {
        STYLES_NOT_SPECIFIED.to_string()
    } else {
        selection.styles.join(", ")
    };

    let mut message = String::from("🎨 *Orçamento via Site*\n\n");
    message.push_str(&format!("📍 *Local:* {location}\n"));
    message.push_str(&format!("📏 *Tamanho:* {size}\n"));
    message.push_str(&format!("🎭 *Estilo:* {styles}\n"));

    if !selection.description.trim().is_empty() {
        message.push_str(&format!("\n💭 *Minha ideia:*\n{}\n", selection.description));
    }

    message.push('\n');
    message.push_str(CLOSING_LINE);
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(location: &str, size: &str, styles: &[&str], description: &str) -> Selection {
        Selection {
            body_location: Some(location.to_string()),
            size: Some(size.to_string()),
            styles: styles.iter().map(|s| s.to_string()).collect(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let catalog = Catalog::defaults();
        let sel = selection("braco", "pequeno", &["Blackwork"], "flor");
        assert_eq!(compose(&sel, &catalog), compose(&sel, &catalog));
    }

    #[test]
    fn test_field_order_and_resolved_labels() {
        let catalog = Catalog::defaults();
        let sel = selection(
            "braco",
            "pequeno",
            &["Blackwork", "Fine Line"],
            "flor pequena",
        );
        let message = compose(&sel, &catalog);

        let local = message.find("*Local:* Braço").unwrap();
        let tamanho = message.find("*Tamanho:* Pequeno").unwrap();
        let estilo = message.find("*Estilo:* Blackwork, Fine Line").unwrap();
        let ideia = message.find("flor pequena").unwrap();
        let closing = message.find(CLOSING_LINE).unwrap();
        assert!(local < tamanho && tamanho < estilo && estilo < ideia && ideia < closing);
    }

    #[test]
    fn test_empty_description_block_omitted() {
        let catalog = Catalog::defaults();
        let sel = selection("perna", "mini", &[], "");
        let message = compose(&sel, &catalog);
        assert!(!message.contains("Minha ideia"));
        assert!(message.ends_with(CLOSING_LINE));
    }

    #[test]
    fn test_whitespace_only_description_omitted() {
        let catalog = Catalog::defaults();
        let sel = selection("perna", "mini", &[], "   \n  ");
        assert!(!compose(&sel, &catalog).contains("Minha ideia"));
    }

    #[test]
    fn test_description_is_verbatim() {
        let catalog = Catalog::defaults();
        let sel = selection("braco", "medio", &[], "rosa no braço");
        let message = compose(&sel, &catalog);
        assert!(message.contains("💭 *Minha ideia:*\nrosa no braço\n"));
    }

    #[test]
    fn test_no_styles_renders_placeholder() {
        let catalog = Catalog::defaults();
        let sel = selection("mao", "grande", &[], "");
        assert!(compose(&sel, &catalog).contains("*Estilo:* Não especificado"));
    }

    #[test]
    fn test_unknown_codes_fall_back_to_raw() {
        let catalog = Catalog::defaults();
        let sel = selection("nuca", "xg", &[], "");
        let message = compose(&sel, &catalog);
        assert!(message.contains("*Local:* nuca"));
        assert!(message.contains("*Tamanho:* xg"));
    }

    #[test]
    fn test_styles_render_in_insertion_order() {
        let catalog = Catalog::defaults();
        let mut sel = selection("braco", "mini", &[], "");
        sel.toggle_style("Tribal");
        sel.toggle_style("Aquarela");
        sel.toggle_style("Blackwork");
        assert!(compose(&sel, &catalog).contains("*Estilo:* Tribal, Aquarela, Blackwork"));
    }
}
