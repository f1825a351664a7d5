// ============================================================================
// Query Cache : cache de requêtes par clé
// ============================================================================
// Mémorise le résultat de chaque fetch sous une clé (ressource, identifiant).
// - L'émission d'un fetch est idempotente par clé : une deuxième demande pour
//   une clé en vol s'attache à l'entrée existante (pas de requête en double)
// - Un résultat est admis uniquement sous sa clé d'origine : une réponse
//   tardive pour une monnaie abandonnée ne peut pas atterrir dans la vue
//   active, qui lit strictement via sa propre clé courante
// - Pas d'éviction : les entrées vivent le temps de la session, revisiter
//   une monnaie déjà vue ne coûte aucun aller-retour réseau
// ============================================================================

use std::collections::HashMap;

use crate::models::{CoinInfo, CoinSummary, CoinTicker, HistoryPoint, Interval};

// ============================================================================
// QueryKey : identité d'un fetch
// ============================================================================
// CONCEPT RUST : Enum comme clé de HashMap
// - Hash + Eq dérivés, chaque variant embarque ses identifiants
// - La clé du détail inclut toujours l'identifiant de la monnaie
// ============================================================================

/// Clé d'une requête dans le cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Le catalogue complet des monnaies
    Coins,

    /// Métadonnées d'une monnaie, par identifiant
    Info(String),

    /// Ticker d'une monnaie, par identifiant
    Tickers(String),

    /// Série historique d'une monnaie, par identifiant et intervalle
    History(String, Interval),
}

impl QueryKey {
    /// Description courte pour les logs
    pub fn describe(&self) -> String {
        match self {
            QueryKey::Coins => "coins".to_string(),
            QueryKey::Info(id) => format!("info/{}", id),
            QueryKey::Tickers(id) => format!("tickers/{}", id),
            QueryKey::History(id, interval) => {
                format!("history/{}/{}", id, interval.label())
            }
        }
    }
}

/// Résultat d'un fetch, par type de ressource
#[derive(Debug, Clone)]
pub enum QueryPayload {
    Coins(Vec<CoinSummary>),
    Info(CoinInfo),
    Tickers(CoinTicker),
    History(Vec<HistoryPoint>),
}

/// État d'une entrée du cache
#[derive(Debug, Clone)]
pub enum QueryState {
    /// Fetch émis, réponse pas encore arrivée
    Pending,

    /// Fetch résolu avec succès
    Ready(QueryPayload),

    /// Fetch échoué (réseau, statut HTTP, payload malformé)
    Failed(String),
}

/// Statut d'une entrée, sans son payload
///
/// Sert à combiner plusieurs entrées en un seul drapeau de chargement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Ready,
    Failed,
}

impl QueryState {
    /// Statut de l'entrée
    pub fn status(&self) -> QueryStatus {
        match self {
            QueryState::Pending => QueryStatus::Pending,
            QueryState::Ready(_) => QueryStatus::Ready,
            QueryState::Failed(_) => QueryStatus::Failed,
        }
    }
}

/// Combine deux statuts en un drapeau global
///
/// Ready seulement si les deux constituants sont Ready, Failed dès que
/// l'un a échoué, Pending sinon. La vue détail s'en sert pour attendre
/// à la fois les métadonnées et le ticker (ET logique des deux attentes).
pub fn combine_status(a: QueryStatus, b: QueryStatus) -> QueryStatus {
    match (a, b) {
        (QueryStatus::Failed, _) | (_, QueryStatus::Failed) => QueryStatus::Failed,
        (QueryStatus::Ready, QueryStatus::Ready) => QueryStatus::Ready,
        _ => QueryStatus::Pending,
    }
}

// ============================================================================
// QueryCache
// ============================================================================

/// Cache de requêtes : clé -> état
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, QueryState>,
}

impl QueryCache {
    /// Crée un cache vide
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Marque une clé comme en vol si un fetch doit être émis
    ///
    /// Retourne true si l'appelant doit émettre le fetch : la clé est
    /// absente, ou son dernier fetch a échoué (re-naviguer retente).
    /// Retourne false si un fetch est déjà en vol ou résolu pour cette
    /// clé : la demande s'attache à l'entrée existante.
    pub fn begin(&mut self, key: QueryKey) -> bool {
        match self.entries.get(&key).map(QueryState::status) {
            None | Some(QueryStatus::Failed) => {
                self.entries.insert(key, QueryState::Pending);
                true
            }
            Some(QueryStatus::Pending) | Some(QueryStatus::Ready) => false,
        }
    }

    /// Admet un résultat sous sa clé d'origine
    ///
    /// La clé vient de la réponse elle-même, jamais de la route courante :
    /// un résultat tardif pour une clé abandonnée met à jour cette clé-là
    /// et rien d'autre.
    pub fn settle(&mut self, key: QueryKey, result: Result<QueryPayload, String>) {
        let state = match result {
            Ok(payload) => QueryState::Ready(payload),
            Err(message) => QueryState::Failed(message),
        };
        self.entries.insert(key, state);
    }

    /// Oublie une entrée pour forcer un refetch au prochain begin()
    pub fn refresh(&mut self, key: &QueryKey) {
        self.entries.remove(key);
    }

    /// État brut d'une clé
    pub fn state(&self, key: &QueryKey) -> Option<&QueryState> {
        self.entries.get(key)
    }

    /// Statut d'une clé (une clé inconnue compte comme Pending)
    pub fn status(&self, key: &QueryKey) -> QueryStatus {
        self.entries
            .get(key)
            .map(QueryState::status)
            .unwrap_or(QueryStatus::Pending)
    }

    /// Message d'erreur d'une clé échouée
    pub fn error(&self, key: &QueryKey) -> Option<&str> {
        match self.entries.get(key) {
            Some(QueryState::Failed(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Le catalogue, s'il est résolu
    pub fn coins(&self) -> Option<&[CoinSummary]> {
        match self.entries.get(&QueryKey::Coins) {
            Some(QueryState::Ready(QueryPayload::Coins(coins))) => Some(coins),
            _ => None,
        }
    }

    /// Les métadonnées d'une monnaie, si résolues
    pub fn info(&self, coin_id: &str) -> Option<&CoinInfo> {
        match self.entries.get(&QueryKey::Info(coin_id.to_string())) {
            Some(QueryState::Ready(QueryPayload::Info(info))) => Some(info),
            _ => None,
        }
    }

    /// Le ticker d'une monnaie, s'il est résolu
    pub fn tickers(&self, coin_id: &str) -> Option<&CoinTicker> {
        match self.entries.get(&QueryKey::Tickers(coin_id.to_string())) {
            Some(QueryState::Ready(QueryPayload::Tickers(ticker))) => Some(ticker),
            _ => None,
        }
    }

    /// La série historique d'une monnaie, si résolue
    pub fn history(&self, coin_id: &str, interval: Interval) -> Option<&[HistoryPoint]> {
        let key = QueryKey::History(coin_id.to_string(), interval);
        match self.entries.get(&key) {
            Some(QueryState::Ready(QueryPayload::History(points))) => Some(points),
            _ => None,
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coins() -> Vec<CoinSummary> {
        vec![CoinSummary {
            id: "btc-bitcoin".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            rank: 1,
            is_new: false,
            is_active: true,
            coin_type: "coin".to_string(),
        }]
    }

    fn info_key(id: &str) -> QueryKey {
        QueryKey::Info(id.to_string())
    }

    fn tickers_key(id: &str) -> QueryKey {
        QueryKey::Tickers(id.to_string())
    }

    #[test]
    fn test_begin_is_idempotent_per_key() {
        let mut cache = QueryCache::new();

        // Premier begin : le fetch doit partir
        assert!(cache.begin(QueryKey::Coins));

        // Deuxième begin pendant le vol : s'attache, pas de doublon
        assert!(!cache.begin(QueryKey::Coins));

        // Après résolution : toujours pas de refetch
        cache.settle(QueryKey::Coins, Ok(QueryPayload::Coins(sample_coins())));
        assert!(!cache.begin(QueryKey::Coins));
    }

    #[test]
    fn test_detail_issues_one_fetch_per_resource() {
        // Ouvrir le détail de c émet exactement un fetch info et un fetch
        // tickers pour c, même si la vue redemande
        let mut cache = QueryCache::new();

        let mut issued = 0;
        for _ in 0..3 {
            if cache.begin(info_key("btc-bitcoin")) {
                issued += 1;
            }
            if cache.begin(tickers_key("btc-bitcoin")) {
                issued += 1;
            }
        }
        assert_eq!(issued, 2);
    }

    #[test]
    fn test_combined_status_waits_for_both() {
        let mut cache = QueryCache::new();
        cache.begin(info_key("btc-bitcoin"));
        cache.begin(tickers_key("btc-bitcoin"));

        let combined = |cache: &QueryCache| {
            combine_status(
                cache.status(&info_key("btc-bitcoin")),
                cache.status(&tickers_key("btc-bitcoin")),
            )
        };

        // Aucun résolu : chargement
        assert_eq!(combined(&cache), QueryStatus::Pending);

        // Un seul résolu : toujours chargement
        let json = r#"{"id": "btc-bitcoin", "name": "Bitcoin", "symbol": "BTC"}"#;
        let info: CoinInfo = serde_json::from_str(json).unwrap();
        cache.settle(info_key("btc-bitcoin"), Ok(QueryPayload::Info(info)));
        assert_eq!(combined(&cache), QueryStatus::Pending);

        // Les deux résolus : prêt
        let ticker_json = r#"{
            "id": "btc-bitcoin", "name": "Bitcoin", "symbol": "BTC",
            "quotes": {"USD": {"price": 1.0}}
        }"#;
        let ticker: CoinTicker = serde_json::from_str(ticker_json).unwrap();
        cache.settle(tickers_key("btc-bitcoin"), Ok(QueryPayload::Tickers(ticker)));
        assert_eq!(combined(&cache), QueryStatus::Ready);
    }

    #[test]
    fn test_combine_status_failed_dominates() {
        use QueryStatus::*;
        assert_eq!(combine_status(Failed, Ready), Failed);
        assert_eq!(combine_status(Pending, Failed), Failed);
        assert_eq!(combine_status(Ready, Pending), Pending);
        assert_eq!(combine_status(Pending, Pending), Pending);
        assert_eq!(combine_status(Ready, Ready), Ready);
    }

    #[test]
    fn test_late_result_settles_under_its_own_key() {
        // Navigation A -> B avant la résolution de A : le résultat tardif
        // de A ne touche que l'entrée de A, les clés de B restent intactes
        let mut cache = QueryCache::new();

        cache.begin(info_key("aaa-coin"));
        cache.begin(tickers_key("aaa-coin"));

        // L'utilisateur navigue vers B
        cache.begin(info_key("bbb-coin"));
        cache.begin(tickers_key("bbb-coin"));

        // La réponse de A arrive après coup
        let json = r#"{"id": "aaa-coin", "name": "Coin A", "symbol": "AAA"}"#;
        let info: CoinInfo = serde_json::from_str(json).unwrap();
        cache.settle(info_key("aaa-coin"), Ok(QueryPayload::Info(info)));

        // La vue de B lit via ses propres clés : rien n'a fuité
        assert!(cache.info("bbb-coin").is_none());
        assert_eq!(cache.status(&info_key("bbb-coin")), QueryStatus::Pending);

        // L'entrée de A est chaude pour une revisite
        assert_eq!(cache.info("aaa-coin").unwrap().name, "Coin A");
    }

    #[test]
    fn test_failure_then_retry() {
        let mut cache = QueryCache::new();

        cache.begin(QueryKey::Coins);
        cache.settle(QueryKey::Coins, Err("HTTP 500".to_string()));

        assert_eq!(cache.status(&QueryKey::Coins), QueryStatus::Failed);
        assert_eq!(cache.error(&QueryKey::Coins), Some("HTTP 500"));
        assert!(cache.coins().is_none());

        // Après un échec, begin() retente
        assert!(cache.begin(QueryKey::Coins));
        assert_eq!(cache.status(&QueryKey::Coins), QueryStatus::Pending);
    }

    #[test]
    fn test_refresh_forces_refetch() {
        let mut cache = QueryCache::new();

        cache.begin(QueryKey::Coins);
        cache.settle(QueryKey::Coins, Ok(QueryPayload::Coins(sample_coins())));
        assert!(!cache.begin(QueryKey::Coins));

        cache.refresh(&QueryKey::Coins);
        assert!(cache.begin(QueryKey::Coins));
    }

    #[test]
    fn test_history_keyed_by_id_and_interval() {
        let mut cache = QueryCache::new();

        let key = QueryKey::History("btc-bitcoin".to_string(), Interval::W2);
        cache.begin(key.clone());
        cache.settle(key, Ok(QueryPayload::History(Vec::new())));

        // Même monnaie, autre intervalle : clé froide
        assert!(cache
            .history("btc-bitcoin", Interval::Y1)
            .is_none());
        assert!(cache.history("btc-bitcoin", Interval::W2).is_some());
    }
}
