// ============================================================================
// Price - Sous-vue des variations de prix
// ============================================================================
// Présentation pure : reçoit le ticker déjà récupéré par la vue détail,
// aucun accès réseau propre. Six lignes fixes de variation (15m, 30m, 1h,
// 6h, 12h, 24h).
//
// Couleur d'emphase par signe : strictement positif -> rise, zéro/négatif/
// absent -> fall. Prêt dès que les données sont là, sans délai artificiel.
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::ticker::{format_percent, is_positive};
use crate::models::{ChangeWindow, CoinTicker};
use crate::ui::theme::Palette;
use crate::ui::widgets::themed_block;

/// Dessine les six lignes de variation du ticker
pub fn render_price(frame: &mut Frame, ticker: &CoinTicker, palette: &Palette, area: Rect) {
    let quote = &ticker.quotes.usd;

    let mut lines = Vec::with_capacity(ChangeWindow::ALL.len() * 2);
    for window in ChangeWindow::ALL {
        let value = window.value(quote);
        let color = if is_positive(value) {
            palette.rise
        } else {
            palette.fall
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<22}", window.label()),
                Style::default().fg(palette.text),
            ),
            Span::styled(
                format!("{:>12}", format_percent(value)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(themed_block(palette, "💲 Price"))
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
