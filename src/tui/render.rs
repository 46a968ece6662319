//! Quote Wizard Rendering
//!
//! Builds the wizard screen as a list of styled lines inside a centered
//! bordered box: header with progress, step content, error/notice line,
//! key-hint footer.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::utils::truncate_str;
use crate::wizard::{QuoteWizard, StyleIdeaField, WizardStep};

/// Studio palette (matches the site theme)
const BRAND_RED: Color = Color::Rgb(230, 0, 0);
const BRAND_WHITE: Color = Color::Rgb(250, 250, 250);
const DIM: Color = Color::DarkGray;

/// Render the entire wizard
pub fn render_wizard(f: &mut Frame, wizard: &QuoteWizard) {
    let area = f.area();
    let box_width = 64u16.min(area.width.saturating_sub(2));
    let inner_width = box_width.saturating_sub(4) as usize;

    let mut lines: Vec<Line<'static>> = Vec::new();

    // Header
    lines.push(Line::from(Span::styled(
        "Orçamento Interativo",
        Style::default()
            .fg(BRAND_WHITE)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("Etapa {} de {}", wizard.step.number(), WizardStep::total()),
        Style::default().fg(DIM),
    )));
    lines.push(progress_line(wizard, inner_width));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        wizard.step.title().to_string(),
        Style::default().fg(BRAND_RED).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        wizard.step.subtitle().to_string(),
        Style::default().fg(DIM),
    )));
    lines.push(Line::from(""));

    // Step-specific content
    match wizard.step {
        WizardStep::Location => render_location(&mut lines, wizard),
        WizardStep::Size => render_size(&mut lines, wizard, inner_width),
        WizardStep::StyleIdea => render_style_idea(&mut lines, wizard, inner_width),
        WizardStep::Review => render_review(&mut lines, wizard, inner_width),
    }

    // Error / notice
    if let Some(ref err) = wizard.error_message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("! {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some(ref notice) = wizard.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Green),
        )));
    }

    // Footer
    lines.push(Line::from(""));
    lines.push(footer_line(wizard));

    let box_height = (lines.len() as u16 + 2).min(area.height);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(box_width) / 2,
        y: area.y + area.height.saturating_sub(box_height) / 2,
        width: box_width,
        height: box_height,
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BRAND_RED))
            .title(" inkbook "),
    );
    f.render_widget(paragraph, rect);
}

fn progress_line(wizard: &QuoteWizard, inner_width: usize) -> Line<'static> {
    let width = inner_width.max(4);
    let filled = ((wizard.progress_ratio() * width as f64) as usize).min(width);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(width - filled));
    Line::from(Span::styled(bar, Style::default().fg(BRAND_RED)))
}

fn entry_style(selected: bool, focused: bool) -> Style {
    let mut style = if selected {
        Style::default().fg(BRAND_RED).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BRAND_WHITE)
    };
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn render_location(lines: &mut Vec<Line<'static>>, wizard: &QuoteWizard) {
    for (i, entry) in wizard.catalog.locations.iter().enumerate() {
        let selected = wizard.selection.body_location.as_deref() == Some(entry.id.as_str());
        let marker = if selected { "●" } else { "○" };
        lines.push(Line::from(Span::styled(
            format!("{}) {} {}", i + 1, marker, entry.label),
            entry_style(selected, i == wizard.focused_field),
        )));
    }
}

fn render_size(lines: &mut Vec<Line<'static>>, wizard: &QuoteWizard, inner_width: usize) {
    for (i, entry) in wizard.catalog.sizes.iter().enumerate() {
        let selected = wizard.selection.size.as_deref() == Some(entry.id.as_str());
        let marker = if selected { "●" } else { "○" };
        let left = format!("{}) {} {} — {}", i + 1, marker, entry.label, entry.subtitle);
        // Right-align the starting price inside the box
        let pad = inner_width
            .saturating_sub(left.width() + entry.price.width())
            .max(1);
        lines.push(Line::from(vec![
            Span::styled(left, entry_style(selected, i == wizard.focused_field)),
            Span::raw(" ".repeat(pad)),
            Span::styled(entry.price.clone(), Style::default().fg(BRAND_RED)),
        ]));
    }
}

fn render_style_idea(lines: &mut Vec<Line<'static>>, wizard: &QuoteWizard, inner_width: usize) {
    let styles_focused = wizard.style_field == StyleIdeaField::Styles;
    for (i, label) in wizard.catalog.styles.iter().enumerate() {
        let selected = wizard.selection.has_style(label);
        let marker = if selected { "[x]" } else { "[ ]" };
        lines.push(Line::from(Span::styled(
            format!("{marker} {label}"),
            entry_style(selected, styles_focused && i == wizard.focused_field),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Descreva sua ideia",
        Style::default().fg(DIM),
    )));
    let description_focused = wizard.style_field == StyleIdeaField::Description;
    let shown = if wizard.selection.description.is_empty() && !description_focused {
        "Ex: Quero uma rosa realista no antebraço...".to_string()
    } else {
        let cursor = if description_focused { "▏" } else { "" };
        format!(
            "{}{}",
            truncate_str(&wizard.selection.description, inner_width.saturating_sub(2)),
            cursor
        )
    };
    let style = if description_focused {
        Style::default().fg(BRAND_WHITE).add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(DIM)
    };
    lines.push(Line::from(Span::styled(shown, style)));
    lines.push(Line::from(Span::styled(
        "(Tab alterna entre estilos e descrição)",
        Style::default().fg(DIM),
    )));
}

fn render_review(lines: &mut Vec<Line<'static>>, wizard: &QuoteWizard, inner_width: usize) {
    let selection = &wizard.selection;
    let catalog = &wizard.catalog;

    let location = selection
        .body_location
        .as_deref()
        .map(|id| catalog.location_label(id).unwrap_or(id))
        .unwrap_or("—");
    lines.push(Line::from(Span::styled(
        "Local do Corpo",
        Style::default().fg(DIM),
    )));
    lines.push(Line::from(Span::styled(
        location.to_string(),
        Style::default()
            .fg(BRAND_WHITE)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Tamanho",
        Style::default().fg(DIM),
    )));
    match selection.size.as_deref().and_then(|id| catalog.size(id)) {
        Some(size) => {
            lines.push(Line::from(Span::styled(
                format!("{} - {}", size.label, size.subtitle),
                Style::default()
                    .fg(BRAND_WHITE)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                size.price.clone(),
                Style::default().fg(BRAND_RED),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                selection.size.clone().unwrap_or_else(|| "—".to_string()),
                Style::default().fg(BRAND_WHITE),
            )));
        }
    }

    if !selection.styles.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Estilos",
            Style::default().fg(DIM),
        )));
        lines.push(Line::from(Span::styled(
            selection.styles.join(", "),
            Style::default().fg(BRAND_WHITE),
        )));
    }

    if !selection.description.trim().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Descrição",
            Style::default().fg(DIM),
        )));
        lines.push(Line::from(Span::styled(
            truncate_str(&selection.description, inner_width),
            Style::default().fg(BRAND_WHITE),
        )));
    }
}

fn footer_line(wizard: &QuoteWizard) -> Line<'static> {
    if wizard.is_submitting() {
        return Line::from(Span::styled(
            "Enviando...",
            Style::default().fg(Color::Yellow),
        ));
    }

    let hint = |keys: &'static str, label: &'static str| {
        vec![
            Span::styled(
                format!("[{keys}] "),
                Style::default().fg(BRAND_RED).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{label}  "), Style::default().fg(BRAND_WHITE)),
        ]
    };

    let mut spans = Vec::new();
    match wizard.step {
        WizardStep::Location => {
            spans.extend(hint("Esc", "Sair"));
            spans.extend(hint("↑↓", "Navegar"));
            spans.extend(hint("Espaço", "Selecionar"));
            spans.extend(hint("Enter", "Próximo"));
        }
        WizardStep::Size => {
            spans.extend(hint("Esc", "Voltar"));
            spans.extend(hint("↑↓", "Navegar"));
            spans.extend(hint("Espaço", "Selecionar"));
            spans.extend(hint("Enter", "Próximo"));
        }
        WizardStep::StyleIdea => {
            spans.extend(hint("Esc", "Voltar"));
            spans.extend(hint("Tab", "Campo"));
            spans.extend(hint("Espaço", "Marcar"));
            spans.extend(hint("Enter", "Próximo"));
        }
        WizardStep::Review => {
            spans.extend(hint("Esc", "Voltar"));
            spans.extend(hint("Enter", "Enviar no WhatsApp"));
        }
    }
    Line::from(spans)
}
