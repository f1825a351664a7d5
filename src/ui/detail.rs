// ============================================================================
// Detail - Vue détail d'une monnaie
// ============================================================================
// Affiche l'aperçu d'une monnaie (rang, symbole, prix, description, offre)
// et héberge les deux sous-vues exclusives Price et Chart.
//
// Titre, par priorité :
// 1. le nom passé par la navigation (routing state)
// 2. "Loading..." tant qu'un des deux fetchs est en vol
// 3. le nom des métadonnées résolues
//
// Le drapeau de chargement est le ET logique des deux fetchs : la vue
// reste en chargement tant que métadonnées ET ticker ne sont pas résolus.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{App, DetailTab};
use crate::models::ticker::format_supply;
use crate::models::{CoinInfo, CoinTicker};
use crate::query::QueryStatus;
use crate::ui::widgets::{
    key_span, label_span, render_error, render_footer, render_loading, themed_block,
};
use crate::ui::{chart, price};

/// Dessine la vue détail complète
pub fn render_detail(frame: &mut Frame, app: &App) {
    let palette = app.theme.palette();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Corps
            Constraint::Length(3), // Footer
        ])
        .split(frame.size())
        .to_vec();

    render_header(frame, app, chunks[0]);

    let coin_id = match app.current_coin_id() {
        Some(id) => id.to_string(),
        None => return,
    };

    match app.detail_status() {
        QueryStatus::Pending => render_loading(frame, &palette, chunks[1], "Loading..."),
        QueryStatus::Failed => {
            let message = detail_error(app, &coin_id);
            render_error(frame, &palette, chunks[1], &message);
        }
        QueryStatus::Ready => {
            // Les deux ressources sont résolues sous l'identifiant courant
            if let (Some(info), Some(ticker)) =
                (app.cache.info(&coin_id), app.cache.tickers(&coin_id))
            {
                render_body(frame, app, info, ticker, chunks[1]);
            }
        }
    }

    let shortcuts = vec![
        key_span("[Esc]"),
        label_span(" Back  ", &palette),
        key_span("[p]"),
        label_span(" Price  ", &palette),
        key_span("[c]"),
        label_span(" Chart  ", &palette),
        key_span("[h l]"),
        label_span(" Interval  ", &palette),
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

/// Message d'erreur de la vue : la première des deux ressources échouées
fn detail_error(app: &App, coin_id: &str) -> String {
    use crate::query::QueryKey;

    app.cache
        .error(&QueryKey::Info(coin_id.to_string()))
        .or_else(|| app.cache.error(&QueryKey::Tickers(coin_id.to_string())))
        .unwrap_or("Fetch failed")
        .to_string()
}

/// Header : retour, titre et bascule de thème
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.theme.palette();
    let block = themed_block(&palette, "LazyCoin");

    let text = vec![Line::from(vec![
        key_span("[Esc]"),
        Span::styled(" ← Go Back   ", Style::default().fg(palette.text)),
        Span::styled(
            app.detail_title(),
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

/// Corps de la vue une fois les deux fetchs résolus
fn render_body(frame: &mut Frame, app: &App, info: &CoinInfo, ticker: &CoinTicker, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Aperçu : rang / symbole / prix + icône
            Constraint::Length(6), // Description
            Constraint::Length(3), // Offre
            Constraint::Length(3), // Onglets
            Constraint::Min(0),    // Sous-vue active
        ])
        .split(area)
        .to_vec();

    render_overview(frame, app, info, ticker, chunks[0]);
    render_description(frame, app, info, chunks[1]);
    render_supply(frame, app, ticker, chunks[2]);
    render_tabs(frame, app, chunks[3]);

    // Sous-vue active : Price lit le ticker déjà récupéré (aucun accès
    // réseau propre), Chart passe par le cache d'historique
    let palette = app.theme.palette();
    match app.current_tab() {
        Some(DetailTab::Price) => price::render_price(frame, ticker, &palette, chunks[4]),
        Some(DetailTab::Chart) => chart::render_chart(frame, app, chunks[4]),
        None => {}
    }
}

/// Aperçu : rang, symbole, prix à trois décimales, URL de l'icône
fn render_overview(
    frame: &mut Frame,
    app: &App,
    info: &CoinInfo,
    ticker: &CoinTicker,
    area: Rect,
) {
    let palette = app.theme.palette();

    let stats = Line::from(vec![
        Span::styled("Rank: ", Style::default().fg(palette.text)),
        Span::styled(
            format!("{}", info.rank),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Symbol: ", Style::default().fg(palette.text)),
        Span::styled(
            info.symbol.clone(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Price: ", Style::default().fg(palette.text)),
        Span::styled(
            ticker.formatted_price(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    // L'icône est adressée par le symbole en minuscules ; si elle manque
    // côté distant c'est une image cassée, pas une erreur de l'application
    let icon_line = Line::from(Span::styled(
        format!("icon: {}", crate::models::coin::icon_url(&info.symbol)),
        Style::default().fg(palette.text).add_modifier(Modifier::DIM),
    ));

    let paragraph = Paragraph::new(vec![stats, icon_line])
        .block(themed_block(&palette, "Overview"))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Description libre des métadonnées
fn render_description(frame: &mut Frame, app: &App, info: &CoinInfo, area: Rect) {
    let palette = app.theme.palette();

    let paragraph = Paragraph::new(Line::from(Span::styled(
        info.description_or_default().to_string(),
        Style::default().fg(palette.text),
    )))
    .block(themed_block(&palette, "About"))
    .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Offre totale et maximale
fn render_supply(frame: &mut Frame, app: &App, ticker: &CoinTicker, area: Rect) {
    let palette = app.theme.palette();

    let line = Line::from(vec![
        Span::styled("Total Supply: ", Style::default().fg(palette.text)),
        Span::styled(
            format_supply(ticker.total_supply),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Max Supply: ", Style::default().fg(palette.text)),
        Span::styled(
            format_supply(ticker.max_supply),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(vec![line])
        .block(themed_block(&palette, "Supply"))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Les deux onglets exclusifs, l'actif en surbrillance
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.theme.palette();
    let active = app.current_tab();

    let tab_span = |label: &'static str, tab: DetailTab| {
        if active == Some(tab) {
            Span::styled(
                label,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::UNDERLINED),
            )
        } else {
            Span::styled(label, Style::default().fg(palette.text))
        }
    };

    let line = Line::from(vec![
        key_span("[p]"),
        Span::raw(" "),
        tab_span("PRICE", DetailTab::Price),
        Span::raw("        "),
        key_span("[c]"),
        Span::raw(" "),
        tab_span("CHART", DetailTab::Chart),
    ]);

    let paragraph = Paragraph::new(vec![line])
        .block(themed_block(&palette, "Tabs"))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
