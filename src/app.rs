// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Les méthodes de navigation retournent les clés de cache dont le fetch
//   doit être émis : l'event loop les transforme en commandes worker
// ============================================================================

use crate::models::{CoinSummary, Interval};
use crate::query::{combine_status, QueryCache, QueryKey, QueryStatus};
use crate::ui::theme::Theme;

/// Nombre maximal d'entrées affichées par la vue listing
pub const MAX_LISTED_COINS: usize = 100;

// ============================================================================
// Enum : Route
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois, le compilateur force l'exhaustivité
// - La route détail embarque l'identifiant : les fetchs qu'elle déclenche
//   sont toujours clés par cet identifiant
// ============================================================================

/// Sous-vue active de la vue détail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    /// Détail des variations de prix
    Price,

    /// Graphique historique
    Chart,
}

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Vue principale : catalogue des monnaies
    Listing,

    /// Vue détail d'une monnaie, avec sa sous-vue active
    Coin { coin_id: String, tab: DetailTab },
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub route: Route,

    /// Nom passé par la navigation (routing state éphémère)
    ///
    /// Permet à la vue détail d'afficher un titre avant la résolution de
    /// ses propres fetchs. Jamais dans la "route" elle-même, effacé au
    /// retour vers le listing.
    pub nav_name: Option<String>,

    /// Index de la monnaie sélectionnée dans le listing
    pub selected_index: usize,

    /// Cache de requêtes (catalogue, infos, tickers, historique)
    pub cache: QueryCache,

    /// Thème sombre/clair partagé par toutes les vues
    pub theme: Theme,

    /// Intervalle courant du graphique historique
    pub chart_interval: Interval,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// Première pression de 'q' : confirm_quit = true
    /// Deuxième pression de 'q' : running = false
    pub confirm_quit: bool,
}

impl App {
    /// Crée une nouvelle instance sur le listing, cache vide, thème sombre
    pub fn new() -> Self {
        Self {
            running: true,
            route: Route::Listing,
            nav_name: None,
            selected_index: 0,
            cache: QueryCache::new(),
            theme: Theme::new(),
            chart_interval: Interval::default(),
            confirm_quit: false,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Vérifie si on est sur le listing
    pub fn is_on_listing(&self) -> bool {
        self.route == Route::Listing
    }

    /// Vérifie si on est sur une vue détail
    pub fn is_on_detail(&self) -> bool {
        matches!(self.route, Route::Coin { .. })
    }

    /// Identifiant de la monnaie affichée par la vue détail
    pub fn current_coin_id(&self) -> Option<&str> {
        match &self.route {
            Route::Coin { coin_id, .. } => Some(coin_id.as_str()),
            Route::Listing => None,
        }
    }

    /// Sous-vue active de la vue détail
    pub fn current_tab(&self) -> Option<DetailTab> {
        match &self.route {
            Route::Coin { tab, .. } => Some(*tab),
            Route::Listing => None,
        }
    }

    /// Demande le catalogue au montage du listing
    ///
    /// Retourne les clés dont le fetch doit être émis (idempotent : vide
    /// si le catalogue est déjà en vol ou résolu).
    pub fn mount_listing(&mut self) -> Vec<QueryKey> {
        let mut to_fetch = Vec::new();
        if self.cache.begin(QueryKey::Coins) {
            to_fetch.push(QueryKey::Coins);
        }
        to_fetch
    }

    /// Ouvre la vue détail d'une monnaie
    ///
    /// Le nom d'affichage voyage comme routing state : la destination peut
    /// se titrer avant que ses fetchs ne résolvent. Émet les deux fetchs
    /// indépendants (métadonnées, ticker) clés par l'identifiant, chacun
    /// une seule fois grâce à l'idempotence du cache.
    pub fn open_coin(&mut self, coin_id: String, name: Option<String>) -> Vec<QueryKey> {
        let mut to_fetch = Vec::new();

        let info_key = QueryKey::Info(coin_id.clone());
        let tickers_key = QueryKey::Tickers(coin_id.clone());
        if self.cache.begin(info_key.clone()) {
            to_fetch.push(info_key);
        }
        if self.cache.begin(tickers_key.clone()) {
            to_fetch.push(tickers_key);
        }

        self.route = Route::Coin {
            coin_id,
            tab: DetailTab::Price,
        };
        self.nav_name = name;
        to_fetch
    }

    /// Ouvre la monnaie sélectionnée dans le listing
    pub fn open_selected(&mut self) -> Vec<QueryKey> {
        let selected = self
            .visible_coins()
            .and_then(|coins| coins.get(self.selected_index))
            .map(|coin| (coin.id.clone(), coin.name.clone()));

        match selected {
            Some((id, name)) => self.open_coin(id, Some(name)),
            None => Vec::new(),
        }
    }

    /// Retourne au listing depuis la vue détail
    ///
    /// Le routing state est éphémère : il ne survit pas à la navigation.
    pub fn back_to_listing(&mut self) {
        self.route = Route::Listing;
        self.nav_name = None;
    }

    /// Active une sous-vue de la vue détail
    ///
    /// L'onglet Chart déclenche le fetch de l'historique pour la paire
    /// (monnaie, intervalle) si elle est froide.
    pub fn select_tab(&mut self, tab: DetailTab) -> Vec<QueryKey> {
        let coin_id = match &mut self.route {
            Route::Coin { coin_id, tab: current } => {
                *current = tab;
                coin_id.clone()
            }
            Route::Listing => return Vec::new(),
        };

        let mut to_fetch = Vec::new();
        if tab == DetailTab::Chart {
            let key = QueryKey::History(coin_id, self.chart_interval);
            if self.cache.begin(key.clone()) {
                to_fetch.push(key);
            }
        }
        to_fetch
    }

    /// Navigue vers le haut dans le listing
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas dans le listing
    ///
    /// Borné par le nombre d'entrées visibles (au plus 100).
    pub fn navigate_down(&mut self) {
        let max_index = self
            .visible_coins()
            .map(|coins| coins.len().saturating_sub(1))
            .unwrap_or(0);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    // ========================================================================
    // Données des vues
    // ========================================================================

    /// Les entrées visibles du listing : au plus MAX_LISTED_COINS
    pub fn visible_coins(&self) -> Option<&[CoinSummary]> {
        self.cache
            .coins()
            .map(|coins| &coins[..coins.len().min(MAX_LISTED_COINS)])
    }

    /// Drapeau de chargement combiné de la vue détail
    ///
    /// Ready seulement quand métadonnées ET ticker sont résolus pour
    /// l'identifiant courant.
    pub fn detail_status(&self) -> QueryStatus {
        match self.current_coin_id() {
            Some(coin_id) => combine_status(
                self.cache.status(&QueryKey::Info(coin_id.to_string())),
                self.cache.status(&QueryKey::Tickers(coin_id.to_string())),
            ),
            None => QueryStatus::Pending,
        }
    }

    /// Titre de la vue détail
    ///
    /// Priorité : (a) nom passé par la navigation, (b) "Loading..." tant
    /// qu'un des deux fetchs est en vol, (c) nom des métadonnées.
    pub fn detail_title(&self) -> String {
        if let Some(name) = &self.nav_name {
            return name.clone();
        }

        match self.detail_status() {
            QueryStatus::Pending => "Loading...".to_string(),
            _ => self
                .current_coin_id()
                .and_then(|id| self.cache.info(id))
                .map(|info| info.name.clone())
                .unwrap_or_else(|| {
                    self.current_coin_id().unwrap_or_default().to_string()
                }),
        }
    }

    // ========================================================================
    // Intervalle du graphique
    // ========================================================================

    /// Passe à l'intervalle suivant (touche 'l' sur l'onglet Chart)
    pub fn next_interval(&mut self) -> Vec<QueryKey> {
        self.chart_interval = self.chart_interval.next();
        self.begin_history()
    }

    /// Passe à l'intervalle précédent (touche 'h' sur l'onglet Chart)
    pub fn previous_interval(&mut self) -> Vec<QueryKey> {
        self.chart_interval = self.chart_interval.previous();
        self.begin_history()
    }

    fn begin_history(&mut self) -> Vec<QueryKey> {
        let mut to_fetch = Vec::new();
        if let Some(coin_id) = self.current_coin_id().map(str::to_string) {
            let key = QueryKey::History(coin_id, self.chart_interval);
            if self.cache.begin(key.clone()) {
                to_fetch.push(key);
            }
        }
        to_fetch
    }

    // ========================================================================
    // Rafraîchissement
    // ========================================================================

    /// Refetch de la vue courante (touche 'r')
    ///
    /// Oublie les entrées de la vue puis réémet leurs fetchs : sur le
    /// listing le catalogue est remplacé en bloc, sur le détail les deux
    /// ressources (et l'historique si l'onglet Chart est actif).
    pub fn refresh_current(&mut self) -> Vec<QueryKey> {
        match self.route.clone() {
            Route::Listing => {
                self.cache.refresh(&QueryKey::Coins);
                self.mount_listing()
            }
            Route::Coin { coin_id, tab } => {
                let mut keys = vec![
                    QueryKey::Info(coin_id.clone()),
                    QueryKey::Tickers(coin_id.clone()),
                ];
                if tab == DetailTab::Chart {
                    keys.push(QueryKey::History(coin_id.clone(), self.chart_interval));
                }

                let mut to_fetch = Vec::new();
                for key in keys {
                    self.cache.refresh(&key);
                    if self.cache.begin(key.clone()) {
                        to_fetch.push(key);
                    }
                }
                to_fetch
            }
        }
    }

    // ========================================================================
    // Thème
    // ========================================================================

    /// Bascule sombre/clair : l'unique point d'entrée de mutation du thème
    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    // ========================================================================
    // Confirmation de quit
    // ========================================================================

    /// Demande la confirmation de quitter (première pression de 'q')
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryPayload;

    fn catalog(count: usize) -> Vec<CoinSummary> {
        (0..count)
            .map(|i| CoinSummary {
                id: format!("coin-{}", i),
                name: format!("Coin {}", i),
                symbol: format!("C{}", i),
                rank: (i + 1) as u32,
                is_new: false,
                is_active: true,
                coin_type: "coin".to_string(),
            })
            .collect()
    }

    fn app_with_catalog(count: usize) -> App {
        let mut app = App::new();
        app.mount_listing();
        app.cache
            .settle(QueryKey::Coins, Ok(QueryPayload::Coins(catalog(count))));
        app
    }

    #[test]
    fn test_new_app_starts_on_listing() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.is_on_listing());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_mount_listing_issues_catalog_fetch_once() {
        let mut app = App::new();
        assert_eq!(app.mount_listing(), vec![QueryKey::Coins]);

        // Deuxième montage : le fetch est déjà en vol
        assert!(app.mount_listing().is_empty());
    }

    #[test]
    fn test_visible_coins_capped_at_100() {
        // Catalogue de 250 entrées : la vue n'en montre que 100
        let app = app_with_catalog(250);
        assert_eq!(app.visible_coins().unwrap().len(), MAX_LISTED_COINS);

        // Catalogue plus petit : tout est visible
        let small = app_with_catalog(3);
        assert_eq!(small.visible_coins().unwrap().len(), 3);
    }

    #[test]
    fn test_navigation_bounded_by_visible_entries() {
        let mut app = app_with_catalog(250);

        // On ne descend jamais sous la centième entrée
        for _ in 0..500 {
            app.navigate_down();
        }
        assert_eq!(app.selected_index, MAX_LISTED_COINS - 1);

        app.navigate_up();
        assert_eq!(app.selected_index, MAX_LISTED_COINS - 2);
    }

    #[test]
    fn test_open_coin_issues_both_fetches_once() {
        let mut app = App::new();

        let keys = app.open_coin("btc-bitcoin".to_string(), Some("Bitcoin".to_string()));
        assert_eq!(
            keys,
            vec![
                QueryKey::Info("btc-bitcoin".to_string()),
                QueryKey::Tickers("btc-bitcoin".to_string()),
            ]
        );
        assert!(app.is_on_detail());
        assert_eq!(app.current_tab(), Some(DetailTab::Price));

        // Revisiter la même monnaie n'émet rien : les clés sont chaudes
        app.back_to_listing();
        let again = app.open_coin("btc-bitcoin".to_string(), Some("Bitcoin".to_string()));
        assert!(again.is_empty());
    }

    #[test]
    fn test_open_selected_passes_name_as_nav_state() {
        let mut app = app_with_catalog(3);
        app.navigate_down();

        let keys = app.open_selected();
        assert_eq!(keys.len(), 2);
        assert_eq!(app.current_coin_id(), Some("coin-1"));
        assert_eq!(app.nav_name.as_deref(), Some("Coin 1"));

        // Le titre vient du routing state avant toute résolution
        assert_eq!(app.detail_title(), "Coin 1");
    }

    #[test]
    fn test_detail_title_priority() {
        // Sans routing state : "Loading..." tant que les fetchs volent
        let mut app = App::new();
        app.open_coin("btc-bitcoin".to_string(), None);
        assert_eq!(app.detail_title(), "Loading...");

        // Les deux résolus : le nom vient des métadonnées
        let info_json = r#"{"id": "btc-bitcoin", "name": "Bitcoin", "symbol": "BTC"}"#;
        let info = serde_json::from_str(info_json).unwrap();
        app.cache.settle(
            QueryKey::Info("btc-bitcoin".to_string()),
            Ok(QueryPayload::Info(info)),
        );
        let ticker_json = r#"{
            "id": "btc-bitcoin", "name": "Bitcoin", "symbol": "BTC",
            "quotes": {"USD": {"price": 1.0}}
        }"#;
        let ticker = serde_json::from_str(ticker_json).unwrap();
        app.cache.settle(
            QueryKey::Tickers("btc-bitcoin".to_string()),
            Ok(QueryPayload::Tickers(ticker)),
        );
        assert_eq!(app.detail_title(), "Bitcoin");
    }

    #[test]
    fn test_detail_loading_until_both_resolve() {
        let mut app = App::new();
        app.open_coin("btc-bitcoin".to_string(), None);
        assert_eq!(app.detail_status(), QueryStatus::Pending);

        let info_json = r#"{"id": "btc-bitcoin", "name": "Bitcoin", "symbol": "BTC"}"#;
        let info = serde_json::from_str(info_json).unwrap();
        app.cache.settle(
            QueryKey::Info("btc-bitcoin".to_string()),
            Ok(QueryPayload::Info(info)),
        );

        // Un seul des deux résolu : toujours en chargement
        assert_eq!(app.detail_status(), QueryStatus::Pending);
    }

    #[test]
    fn test_navigating_between_coins_uses_fresh_keys() {
        // A -> B avant résolution de A : B émet ses propres fetchs,
        // le résultat tardif de A ne touche pas la vue de B
        let mut app = App::new();
        app.open_coin("aaa-coin".to_string(), None);
        app.back_to_listing();

        let keys = app.open_coin("bbb-coin".to_string(), None);
        assert_eq!(keys.len(), 2);

        let info_json = r#"{"id": "aaa-coin", "name": "Coin A", "symbol": "AAA"}"#;
        let info = serde_json::from_str(info_json).unwrap();
        app.cache.settle(
            QueryKey::Info("aaa-coin".to_string()),
            Ok(QueryPayload::Info(info)),
        );

        // La vue courante (B) lit via sa propre clé : rien de A n'y entre
        assert_eq!(app.current_coin_id(), Some("bbb-coin"));
        assert!(app.cache.info("bbb-coin").is_none());
        assert_eq!(app.detail_status(), QueryStatus::Pending);
    }

    #[test]
    fn test_chart_tab_fetches_history_once_per_interval() {
        let mut app = App::new();
        app.open_coin("btc-bitcoin".to_string(), None);

        let keys = app.select_tab(DetailTab::Chart);
        assert_eq!(
            keys,
            vec![QueryKey::History(
                "btc-bitcoin".to_string(),
                Interval::default()
            )]
        );

        // Re-sélection du même onglet : la clé est chaude
        assert!(app.select_tab(DetailTab::Chart).is_empty());

        // Changer d'intervalle émet un fetch pour la nouvelle paire
        let keys = app.next_interval();
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_back_clears_nav_state() {
        let mut app = app_with_catalog(3);
        app.open_selected();
        assert!(app.nav_name.is_some());

        app.back_to_listing();
        assert!(app.is_on_listing());
        assert!(app.nav_name.is_none());
    }

    #[test]
    fn test_quit_two_step() {
        let mut app = App::new();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_refresh_listing_reissues_catalog() {
        let mut app = app_with_catalog(3);
        assert_eq!(app.refresh_current(), vec![QueryKey::Coins]);
    }
}
