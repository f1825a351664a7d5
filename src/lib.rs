// ============================================================================
// LazyCoin - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Client API CoinPaprika
pub mod models;    // Structures de données
pub mod query;     // Cache de requêtes par clé
pub mod app;       // État de l'application
pub mod ui;        // Interface utilisateur
