// ============================================================================
// Listing - Vue catalogue
// ============================================================================
// Affiche les 100 premières monnaies du catalogue sous forme de liste
// navigable. Trois états : chargement, erreur, liste résolue.
//
// CONCEPTS RATATUI :
// 1. Layout : header / contenu / footer
// 2. List widget avec surbrillance de la sélection
// 3. Line et Span : plusieurs couleurs sur une même ligne
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::query::{QueryKey, QueryStatus};
use crate::ui::widgets::{
    key_span, label_span, render_error, render_footer, render_loading, themed_block,
};

/// Dessine la vue listing complète
pub fn render_listing(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());
    let palette = app.theme.palette();

    render_header(frame, app, chunks[0]);

    // Contenu principal selon l'état du fetch catalogue
    match app.cache.status(&QueryKey::Coins) {
        QueryStatus::Pending => render_loading(frame, &palette, chunks[1], "Loading..."),
        QueryStatus::Failed => {
            let message = app
                .cache
                .error(&QueryKey::Coins)
                .unwrap_or("Fetch failed")
                .to_string();
            render_error(frame, &palette, chunks[1], &message);
        }
        QueryStatus::Ready => render_coin_list(frame, app, chunks[1]),
    }

    let shortcuts = vec![
        key_span("[q]"),
        label_span(" Quit  ", &palette),
        key_span("[↑↓ / j k]"),
        label_span(" Navigate  ", &palette),
        key_span("[Enter]"),
        label_span(" Detail  ", &palette),
        key_span("[t]"),
        label_span(" Theme  ", &palette),
        key_span("[r]"),
        label_span(" Refresh", &palette),
    ];
    render_footer(
        frame,
        &palette,
        chunks[2],
        shortcuts,
        app.is_awaiting_quit_confirmation(),
    );
}

/// Layout principal : header, contenu, footer
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Contenu
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

/// Header : titre de l'application et bascule de thème
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.theme.palette();
    let block = themed_block(&palette, "LazyCoin");

    let text = vec![Line::from(vec![
        Span::styled(
            "🪙 Coins",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        key_span("[t]"),
        Span::styled(
            format!(" {}", app.theme.mode_button_label()),
            Style::default().fg(palette.text),
        ),
    ])];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// La liste des monnaies, bornée à 100 entrées
fn render_coin_list(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.theme.palette();
    let block = themed_block(&palette, "📊 Catalog");

    let coins = match app.visible_coins() {
        Some(coins) if !coins.is_empty() => coins,
        _ => {
            // Catalogue résolu mais vide : rien à lister
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Catalogue vide",
                    Style::default().fg(palette.text),
                )),
            ];
            let paragraph = Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let items: Vec<ListItem> = coins
        .iter()
        .enumerate()
        .map(|(index, coin)| {
            let mut style = Style::default().fg(palette.text);
            if !coin.is_active {
                style = style.add_modifier(Modifier::DIM);
            }

            // "● " tient lieu d'icône ; l'URL réelle (symbole en
            // minuscules) est affichée par la vue détail
            let mut spans = vec![
                Span::styled("● ", Style::default().fg(palette.accent)),
                Span::styled(coin.display(), style),
            ];
            if coin.is_new {
                spans.push(Span::styled(
                    "  [new]",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::styled(
                "  →",
                Style::default().fg(palette.accent),
            ));

            let mut list_item = ListItem::new(Line::from(spans));

            // Sélection : gras + couleurs inversées
            if index == app.selected_index {
                list_item = list_item.style(
                    style
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::REVERSED),
                );
            }

            list_item
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
