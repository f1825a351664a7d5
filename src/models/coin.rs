// ============================================================================
// Structure : CoinSummary
// ============================================================================
// Une entrée du catalogue de cryptomonnaies (endpoint /coins)
//
// CONCEPT RUST : Serde deserialization
// - Les champs matchent exactement le JSON de CoinPaprika
// - Les champs non listés ici sont ignorés par serde
// ============================================================================

use serde::{Deserialize, Serialize};

/// Endpoint fixe des icônes, adressé par le symbole en minuscules.
/// Une icône manquante est un problème côté distant, jamais une erreur ici.
pub const ICON_ENDPOINT: &str = "https://cryptoicon-api.vercel.app/api/icon";

/// URL de l'icône d'une monnaie : symbole en minuscules contre
/// l'endpoint fixe ("BTC" -> ".../api/icon/btc")
pub fn icon_url(symbol: &str) -> String {
    format!("{}/{}", ICON_ENDPOINT, symbol.to_lowercase())
}

/// Une cryptomonnaie telle que listée par le catalogue
///
/// Immuable : le catalogue est remplacé en bloc à chaque refetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinSummary {
    /// Identifiant stable de la monnaie (ex: "btc-bitcoin")
    /// C'est la clé utilisée par toutes les autres requêtes
    pub id: String,

    /// Nom d'affichage (ex: "Bitcoin")
    pub name: String,

    /// Symbole du ticker (ex: "BTC")
    pub symbol: String,

    /// Rang par capitalisation (0 si non classé)
    #[serde(default)]
    pub rank: u32,

    /// Monnaie récemment listée
    #[serde(default)]
    pub is_new: bool,

    /// Monnaie encore active
    #[serde(default)]
    pub is_active: bool,

    /// Catégorie ("coin" ou "token")
    #[serde(rename = "type", default)]
    pub coin_type: String,
}

impl CoinSummary {
    /// URL de l'icône de la monnaie
    pub fn icon_url(&self) -> String {
        icon_url(&self.symbol)
    }

    /// Formatte l'entrée pour la liste
    ///
    /// Format : "  1  BTC      Bitcoin"
    pub fn display(&self) -> String {
        format!("{:>4}  {:<8} {}", self.rank, self.symbol, self.name)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
