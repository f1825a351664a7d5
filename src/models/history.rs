// ============================================================================
// Structures : HistoryPoint et Interval
// ============================================================================
// Série historique d'une monnaie (endpoint /coins/{id}/ohlcv/historical)
// et intervalle de recul sélectionnable pour le graphique
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Un point de la série historique (une chandelle quotidienne)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Ouverture de la période
    pub time_open: DateTime<Utc>,

    /// Clôture de la période
    pub time_close: DateTime<Utc>,

    /// Prix d'ouverture
    pub open: f64,

    /// Plus haut de la période
    pub high: f64,

    /// Plus bas de la période
    pub low: f64,

    /// Prix de clôture
    pub close: f64,

    /// Volume échangé
    #[serde(default)]
    pub volume: Option<f64>,

    /// Capitalisation en fin de période
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// Intervalle de recul du graphique
///
/// Cycle avec les touches h/l : W1 -> W2 -> M1 -> M3 -> M6 -> Y1 -> W1
/// Chaque intervalle est une clé de cache distincte : changer d'intervalle
/// déclenche un fetch seulement si la paire (monnaie, intervalle) est froide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// 1 semaine
    W1,
    /// 2 semaines
    W2,
    /// 1 mois
    M1,
    /// 3 mois
    M3,
    /// 6 mois
    M6,
    /// 1 an
    Y1,
}

impl Interval {
    /// Nombre de jours couverts
    pub fn to_days(&self) -> i64 {
        match self {
            Interval::W1 => 7,
            Interval::W2 => 14,
            Interval::M1 => 30,
            Interval::M3 => 90,
            Interval::M6 => 180,
            Interval::Y1 => 365,
        }
    }

    /// Label court pour l'affichage
    pub fn label(&self) -> &'static str {
        match self {
            Interval::W1 => "1W",
            Interval::W2 => "2W",
            Interval::M1 => "1M",
            Interval::M3 => "3M",
            Interval::M6 => "6M",
            Interval::Y1 => "1Y",
        }
    }

    /// Intervalle suivant (touche 'l')
    pub fn next(&self) -> Self {
        match self {
            Interval::W1 => Interval::W2,
            Interval::W2 => Interval::M1,
            Interval::M1 => Interval::M3,
            Interval::M3 => Interval::M6,
            Interval::M6 => Interval::Y1,
            Interval::Y1 => Interval::W1,
        }
    }

    /// Intervalle précédent (touche 'h')
    pub fn previous(&self) -> Self {
        match self {
            Interval::W1 => Interval::Y1,
            Interval::W2 => Interval::W1,
            Interval::M1 => Interval::W2,
            Interval::M3 => Interval::M1,
            Interval::M6 => Interval::M3,
            Interval::Y1 => Interval::M6,
        }
    }
}

impl Default for Interval {
    /// Deux semaines par défaut, comme la fenêtre du graphique d'origine
    fn default() -> Self {
        Interval::W2
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_history_point() {
        let json = r#"{
            "time_open": "2021-01-01T00:00:00Z",
            "time_close": "2021-01-01T23:59:59Z",
            "open": 28994.01,
            "high": 29600.63,
            "low": 28803.59,
            "close": 29374.15,
            "volume": 40730301359,
            "market_cap": 546137459742
        }"#;

        let point: HistoryPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.close, 29374.15);
        assert!(point.volume.is_some());
    }

    #[test]
    fn test_interval_cycle_round_trip() {
        // Un tour complet de next() revient au point de départ
        let mut interval = Interval::W1;
        for _ in 0..6 {
            interval = interval.next();
        }
        assert_eq!(interval, Interval::W1);

        // next() puis previous() est l'identité
        assert_eq!(Interval::M3.next().previous(), Interval::M3);
    }

    #[test]
    fn test_interval_days() {
        assert_eq!(Interval::W1.to_days(), 7);
        assert_eq!(Interval::default().to_days(), 14);
        assert_eq!(Interval::Y1.to_days(), 365);
    }
}
