// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod chart;   // Sous-vue graphique historique
pub mod detail;  // Vue détail d'une monnaie
pub mod events;  // Gestion des événements clavier
pub mod listing; // Vue catalogue
pub mod price;   // Sous-vue des variations de prix
pub mod theme;   // Palette sombre/claire
pub mod widgets; // Widgets partagés (chargement, erreur, footer)

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use theme::Theme;

use ratatui::Frame;

use crate::app::{App, Route};

/// Dessine l'écran actif
///
/// Routing par match sur la route courante : listing ou détail, le
/// compilateur garantit l'exhaustivité.
pub fn render(frame: &mut Frame, app: &App) {
    match app.route {
        Route::Listing => listing::render_listing(frame, app),
        Route::Coin { .. } => detail::render_detail(frame, app),
    }
}
