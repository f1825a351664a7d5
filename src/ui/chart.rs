// ============================================================================
// Chart - Sous-vue graphique historique
// ============================================================================
// Trace la série des prix de clôture pour la monnaie affichée, sur
// l'intervalle courant. La série vient du cache sous la clé
// (monnaie, intervalle) ; h/l changent d'intervalle et déclenchent le
// fetch de la nouvelle paire si elle est froide.
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de points (x, y)
// 3. Axis : bornes et labels des axes
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{HistoryPoint, Interval};
use crate::query::{QueryKey, QueryStatus};
use crate::ui::theme::Palette;
use crate::ui::widgets::{render_error, render_loading, themed_block};

/// Dessine la sous-vue graphique
pub fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let palette = app.theme.palette();

    let coin_id = match app.current_coin_id() {
        Some(id) => id.to_string(),
        None => return,
    };

    let key = QueryKey::History(coin_id.clone(), app.chart_interval);
    match app.cache.status(&key) {
        QueryStatus::Pending => {
            render_loading(frame, &palette, area, "Loading chart...");
        }
        QueryStatus::Failed => {
            let message = app
                .cache
                .error(&key)
                .unwrap_or("Fetch failed")
                .to_string();
            render_error(frame, &palette, area, &message);
        }
        QueryStatus::Ready => {
            let points = app
                .cache
                .history(&coin_id, app.chart_interval)
                .unwrap_or(&[]);
            render_graph(frame, &palette, area, points, app.chart_interval);
        }
    }
}

/// Trace la ligne des prix de clôture
fn render_graph(
    frame: &mut Frame,
    palette: &Palette,
    area: Rect,
    points: &[HistoryPoint],
    interval: Interval,
) {
    let title = format!("📈 Chart ({})  [h/l] interval", interval.label());

    if points.is_empty() {
        // Série résolue mais vide : rien à tracer
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Pas de données historiques",
                Style::default().fg(palette.text),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(themed_block(palette, &title))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    // Transforme les points en (x, y) : index en x, clôture en y
    let data: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, point)| (i as f64, point.close))
        .collect();

    // Bornes Y avec une petite marge pour ne pas coller aux bords
    let y_min = data.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let y_max = data
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);
    let margin = ((y_max - y_min) * 0.05).max(y_max.abs() * 0.001);
    let y_bounds = [y_min - margin, y_max + margin];

    // La couleur de la ligne suit le sens de la période tracée
    let first_close = points.first().map(|p| p.close).unwrap_or(0.0);
    let last_close = points.last().map(|p| p.close).unwrap_or(0.0);
    let line_color = if last_close > first_close {
        palette.rise
    } else {
        palette.fall
    };

    let datasets = vec![Dataset::default()
        .name(format!("close ({})", interval.label()))
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(line_color))
        .data(&data)];

    // Labels X : première et dernière date de la série
    let x_labels = vec![
        axis_label(points.first(), palette),
        axis_label(points.last(), palette),
    ];

    let y_labels = vec![
        Span::styled(
            format!("{:.2}", y_bounds[0]),
            Style::default().fg(palette.text),
        ),
        Span::styled(
            format!("{:.2}", (y_bounds[0] + y_bounds[1]) / 2.0),
            Style::default().fg(palette.text),
        ),
        Span::styled(
            format!("{:.2}", y_bounds[1]),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let chart = Chart::new(datasets)
        .block(themed_block(palette, &title))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette.border))
                .bounds([0.0, (data.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette.border))
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Label de date pour l'axe X
fn axis_label(point: Option<&HistoryPoint>, palette: &Palette) -> Span<'static> {
    let text = point
        .map(|p| p.time_close.format("%m-%d").to_string())
        .unwrap_or_default();
    Span::styled(text, Style::default().fg(palette.text))
}
