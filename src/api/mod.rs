// ============================================================================
// Module : api
// ============================================================================
// Ce module contient le client de l'API de données de marché (CoinPaprika)
// ============================================================================

pub mod paprika; // Client API CoinPaprika

// Re-export des fonctions principales
pub use paprika::{fetch_coin_history, fetch_coin_info, fetch_coin_tickers, fetch_coins};
