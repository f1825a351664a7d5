// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application :
// les enregistrements renvoyés par l'API CoinPaprika et les types d'affichage
// ============================================================================

pub mod coin;    // Entrée du catalogue (CoinSummary)
pub mod info;    // Métadonnées d'une monnaie (CoinInfo)
pub mod ticker;  // Snapshot prix/offre (CoinTicker)
pub mod history; // Série historique et intervalle du graphique

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazycoin::models::ticker::CoinTicker;
// On peut faire : use lazycoin::models::CoinTicker;
pub use coin::CoinSummary;
pub use history::{HistoryPoint, Interval};
pub use info::CoinInfo;
pub use ticker::{ChangeWindow, CoinTicker, Quotes, UsdQuote};
