// ============================================================================
// Structure : CoinInfo
// ============================================================================
// Métadonnées descriptives d'une monnaie (endpoint /coins/{id})
// Récupérées une fois par identifiant, puis conservées en cache sous cet id
// ============================================================================

use serde::{Deserialize, Serialize};

/// Métadonnées d'une monnaie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinInfo {
    /// Identifiant stable (ex: "btc-bitcoin")
    pub id: String,

    /// Nom d'affichage
    pub name: String,

    /// Symbole du ticker
    pub symbol: String,

    /// Rang par capitalisation
    #[serde(default)]
    pub rank: u32,

    /// Description libre (peut être vide)
    #[serde(default)]
    pub description: Option<String>,

    /// Code source ouvert ?
    #[serde(default)]
    pub open_source: bool,

    /// Date de démarrage (ISO-8601, ex: "2009-01-03T00:00:00Z")
    #[serde(default)]
    pub started_at: Option<String>,

    /// État du développement (ex: "Working product")
    #[serde(default)]
    pub development_status: Option<String>,

    /// Algorithme de hachage (ex: "SHA256")
    #[serde(default)]
    pub hash_algorithm: Option<String>,

    /// Type de preuve (ex: "Proof of Work")
    #[serde(default)]
    pub proof_type: Option<String>,

    /// Structure de l'organisation (ex: "Decentralized")
    #[serde(default)]
    pub org_structure: Option<String>,

    /// Première date avec des données
    #[serde(default)]
    pub first_data_at: Option<String>,

    /// Dernière date avec des données
    #[serde(default)]
    pub last_data_at: Option<String>,
}

impl CoinInfo {
    /// Description à afficher, ou un texte de repli si absente
    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => "No description available.",
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_info() {
        let json = r#"{
            "id": "btc-bitcoin",
            "name": "Bitcoin",
            "symbol": "BTC",
            "rank": 1,
            "is_new": false,
            "is_active": true,
            "type": "coin",
            "description": "Bitcoin is a cryptocurrency.",
            "open_source": true,
            "started_at": "2009-01-03T00:00:00Z",
            "development_status": "Working product",
            "hash_algorithm": "SHA256",
            "proof_type": "Proof of Work",
            "org_structure": "Decentralized",
            "first_data_at": "2010-07-17T00:00:00Z",
            "last_data_at": "2021-03-01T00:00:00Z"
        }"#;

        let info: CoinInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.name, "Bitcoin");
        assert_eq!(info.rank, 1);
        assert!(info.open_source);
        assert_eq!(info.hash_algorithm.as_deref(), Some("SHA256"));
        assert_eq!(info.description_or_default(), "Bitcoin is a cryptocurrency.");
    }

    #[test]
    fn test_description_fallback() {
        // Certaines monnaies n'ont pas de description
        let json = r#"{"id": "x", "name": "X", "symbol": "X"}"#;
        let info: CoinInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.description_or_default(), "No description available.");
    }
}
