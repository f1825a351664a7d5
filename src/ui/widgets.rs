// ============================================================================
// Widgets partagés entre les vues
// ============================================================================
// Indicateur de chargement, panneau d'erreur et footer de raccourcis :
// les trois états communs au listing et au détail
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;

/// Block de base d'une vue, aux couleurs du thème
pub fn themed_block(palette: &Palette, title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg))
        .title(format!(" {} ", title))
}

/// Indicateur de chargement centré
pub fn render_loading(frame: &mut Frame, palette: &Palette, area: Rect, message: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(palette.text),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(themed_block(palette, "Loading"))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Panneau d'erreur, visuellement distinct du chargement
///
/// Bordure rouge et message d'échec : un fetch raté reste local à sa vue,
/// la touche 'r' relance la requête.
pub fn render_error(frame: &mut Frame, palette: &Palette, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(palette.bg))
        .title(" ⚠ Error ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[r]",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Retry", Style::default().fg(palette.text)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Footer : raccourcis de la vue, ou avertissement de quit en deux temps
pub fn render_footer(
    frame: &mut Frame,
    palette: &Palette,
    area: Rect,
    shortcuts: Vec<Span<'static>>,
    awaiting_quit: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg));

    let line = if awaiting_quit {
        // Première pression de 'q' : on attend la confirmation
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(shortcuts)
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Span d'un raccourci : "[x]" en surbrillance
pub fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

/// Span du texte d'un raccourci
pub fn label_span(label: &'static str, palette: &Palette) -> Span<'static> {
    Span::styled(label, Style::default().fg(palette.text))
}
