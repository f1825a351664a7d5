// ============================================================================
// Structure : CoinTicker
// ============================================================================
// Snapshot prix/offre d'une monnaie (endpoint /tickers/{id})
//
// CONCEPTS RUST :
// 1. Structures imbriquées : CoinTicker -> Quotes -> UsdQuote
// 2. Option<f64> : les fenêtres de variation peuvent manquer côté API
// 3. #[serde(rename = "USD")] : le JSON utilise la devise comme clé
// ============================================================================

use serde::{Deserialize, Serialize};

/// Ticker d'une monnaie : offre en circulation et cotation USD
///
/// Récupéré une fois par identifiant, conservé en cache sous cet id.
/// L'invariant du cache : CoinInfo et CoinTicker partagent la même clé.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinTicker {
    /// Identifiant stable (ex: "btc-bitcoin")
    pub id: String,

    /// Nom d'affichage
    pub name: String,

    /// Symbole du ticker
    pub symbol: String,

    /// Rang par capitalisation
    #[serde(default)]
    pub rank: u32,

    /// Offre en circulation
    #[serde(default)]
    pub circulating_supply: Option<f64>,

    /// Offre totale
    #[serde(default)]
    pub total_supply: Option<f64>,

    /// Offre maximale (0 côté API quand illimitée)
    #[serde(default)]
    pub max_supply: Option<f64>,

    /// Beta par rapport au marché
    #[serde(default)]
    pub beta_value: Option<f64>,

    /// Première date avec des données
    #[serde(default)]
    pub first_data_at: Option<String>,

    /// Dernière mise à jour du snapshot
    #[serde(default)]
    pub last_updated: Option<String>,

    /// Cotations par devise (seule USD est consommée)
    pub quotes: Quotes,
}

/// Cotations par devise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotes {
    #[serde(rename = "USD")]
    pub usd: UsdQuote,
}

/// Cotation USD : prix, capitalisation et variations
///
/// Onze fenêtres de variation distinctes : 15m, 30m, 1h, 6h, 12h, 24h,
/// 7d, 30d, 1y, variation de capitalisation sur 24h et écart à l'ATH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdQuote {
    /// Prix courant en USD
    pub price: f64,

    /// Volume échangé sur 24h
    #[serde(default)]
    pub volume_24h: Option<f64>,

    /// Variation du volume sur 24h (%)
    #[serde(default)]
    pub volume_24h_change_24h: Option<f64>,

    /// Capitalisation de marché
    #[serde(default)]
    pub market_cap: Option<f64>,

    /// Variation de la capitalisation sur 24h (%)
    #[serde(default)]
    pub market_cap_change_24h: Option<f64>,

    /// Variation du prix sur 15 minutes (%)
    #[serde(default)]
    pub percent_change_15m: Option<f64>,

    /// Variation du prix sur 30 minutes (%)
    #[serde(default)]
    pub percent_change_30m: Option<f64>,

    /// Variation du prix sur 1 heure (%)
    #[serde(default)]
    pub percent_change_1h: Option<f64>,

    /// Variation du prix sur 6 heures (%)
    #[serde(default)]
    pub percent_change_6h: Option<f64>,

    /// Variation du prix sur 12 heures (%)
    #[serde(default)]
    pub percent_change_12h: Option<f64>,

    /// Variation du prix sur 24 heures (%)
    #[serde(default)]
    pub percent_change_24h: Option<f64>,

    /// Variation du prix sur 7 jours (%)
    #[serde(default)]
    pub percent_change_7d: Option<f64>,

    /// Variation du prix sur 30 jours (%)
    #[serde(default)]
    pub percent_change_30d: Option<f64>,

    /// Variation du prix sur 1 an (%)
    #[serde(default)]
    pub percent_change_1y: Option<f64>,

    /// Plus haut historique (all-time high)
    #[serde(default)]
    pub ath_price: Option<f64>,

    /// Date du plus haut historique
    #[serde(default)]
    pub ath_date: Option<String>,

    /// Écart au plus haut historique (%)
    #[serde(default)]
    pub percent_from_price_ath: Option<f64>,
}

impl CoinTicker {
    /// Prix formaté pour le panneau d'aperçu : "$ 61234.568"
    ///
    /// Trois décimales fixes, espace après le symbole dollar.
    pub fn formatted_price(&self) -> String {
        format!("$ {:.3}", self.quotes.usd.price)
    }
}

// ============================================================================
// ChangeWindow : les six fenêtres affichées par la vue Price
// ============================================================================
// CONCEPT RUST : Enum + tableau const pour itérer sur les variants
// - Chaque ligne de la vue Price correspond à un variant
// - value() lit le champ correspondant dans la cotation
// ============================================================================

/// Fenêtre de variation affichée par la vue Price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeWindow {
    /// 15 minutes
    M15,
    /// 30 minutes
    M30,
    /// 1 heure
    H1,
    /// 6 heures
    H6,
    /// 12 heures
    H12,
    /// 24 heures
    H24,
}

impl ChangeWindow {
    /// Les six fenêtres, dans l'ordre d'affichage
    pub const ALL: [ChangeWindow; 6] = [
        ChangeWindow::M15,
        ChangeWindow::M30,
        ChangeWindow::H1,
        ChangeWindow::H6,
        ChangeWindow::H12,
        ChangeWindow::H24,
    ];

    /// Libellé de la ligne
    pub fn label(&self) -> &'static str {
        match self {
            ChangeWindow::M15 => "Change 15 Minutes:",
            ChangeWindow::M30 => "Change 30 Minutes:",
            ChangeWindow::H1 => "Change 1 hour:",
            ChangeWindow::H6 => "Change 6 hours:",
            ChangeWindow::H12 => "Change 12 hours:",
            ChangeWindow::H24 => "Change 24 hours:",
        }
    }

    /// Valeur de la fenêtre dans une cotation
    pub fn value(&self, quote: &UsdQuote) -> Option<f64> {
        match self {
            ChangeWindow::M15 => quote.percent_change_15m,
            ChangeWindow::M30 => quote.percent_change_30m,
            ChangeWindow::H1 => quote.percent_change_1h,
            ChangeWindow::H6 => quote.percent_change_6h,
            ChangeWindow::H12 => quote.percent_change_12h,
            ChangeWindow::H24 => quote.percent_change_24h,
        }
    }
}

/// Classe une variation pour la couleur d'emphase
///
/// Strictement positive -> hausse. Zéro, négative ou absente -> baisse,
/// sans couleur "inconnue" particulière pour l'absence.
pub fn is_positive(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v > 0.0)
}

/// Formatte une variation pour l'affichage : "-0.5%", "N/A" si absente
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", v),
        None => "N/A".to_string(),
    }
}

/// Formatte une offre (supply) pour l'affichage
pub fn format_supply(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.0}", v),
        None => "N/A".to_string(),
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ticker() -> CoinTicker {
        let json = r#"{
            "id": "btc-bitcoin",
            "name": "Bitcoin",
            "symbol": "BTC",
            "rank": 1,
            "circulating_supply": 18700000,
            "total_supply": 18700000,
            "max_supply": 21000000,
            "beta_value": 1.02,
            "first_data_at": "2010-07-17T00:00:00Z",
            "last_updated": "2021-03-01T00:00:00Z",
            "quotes": {
                "USD": {
                    "price": 61234.5678,
                    "volume_24h": 54321098765.0,
                    "volume_24h_change_24h": -5.2,
                    "market_cap": 1145000000000,
                    "market_cap_change_24h": 0.8,
                    "percent_change_15m": 0.0,
                    "percent_change_30m": 0.12,
                    "percent_change_1h": -0.5,
                    "percent_change_6h": 1.3,
                    "percent_change_12h": -2.1,
                    "percent_change_24h": 3.4,
                    "percent_change_7d": 10.1,
                    "percent_change_30d": 25.0,
                    "percent_change_1y": 600.0,
                    "ath_price": 64863.0,
                    "ath_date": "2021-04-14T00:00:00Z",
                    "percent_from_price_ath": -5.6
                }
            }
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize_ticker() {
        let ticker = sample_ticker();
        assert_eq!(ticker.id, "btc-bitcoin");
        assert_eq!(ticker.quotes.usd.price, 61234.5678);
        assert_eq!(ticker.quotes.usd.percent_change_1h, Some(-0.5));
        assert_eq!(ticker.max_supply, Some(21000000.0));
    }

    #[test]
    fn test_formatted_price_three_decimals() {
        // Arrondi à trois décimales fixes, espace après le dollar
        let ticker = sample_ticker();
        assert_eq!(ticker.formatted_price(), "$ 61234.568");
    }

    #[test]
    fn test_change_window_values() {
        let ticker = sample_ticker();
        let quote = &ticker.quotes.usd;

        assert_eq!(ChangeWindow::M15.value(quote), Some(0.0));
        assert_eq!(ChangeWindow::H1.value(quote), Some(-0.5));
        assert_eq!(ChangeWindow::H24.value(quote), Some(3.4));
    }

    #[test]
    fn test_is_positive_classification() {
        // Strictement positif -> hausse
        assert!(is_positive(Some(0.1)));
        assert!(is_positive(Some(42.0)));

        // Zéro, négatif et absent classés à l'identique (baisse)
        assert!(!is_positive(Some(0.0)));
        assert!(!is_positive(Some(-0.5)));
        assert!(!is_positive(None));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(-0.5)), "-0.5%");
        assert_eq!(format_percent(Some(3.4)), "3.4%");
        assert_eq!(format_percent(None), "N/A");
    }

    #[test]
    fn test_format_supply() {
        assert_eq!(format_supply(Some(21000000.0)), "21000000");
        assert_eq!(format_supply(None), "N/A");
    }
}
