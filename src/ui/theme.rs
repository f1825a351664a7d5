// ============================================================================
// Theme : palette sombre/claire
// ============================================================================
// Un seul booléen partagé par toutes les vues, basculé par la touche 't'.
// Pas de persistance : retour au défaut (sombre) à chaque lancement.
//
// Les vues reçoivent le thème en paramètre de rendu plutôt que de lire un
// global : testable en isolation.
// ============================================================================

use ratatui::style::Color;

/// Jeu de couleurs nommé appliqué par le rendu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Fond des vues
    pub bg: Color,

    /// Texte courant
    pub text: Color,

    /// Titres et éléments actifs (onglet sélectionné, titre de vue)
    pub accent: Color,

    /// Bordures des panneaux
    pub border: Color,

    /// Variation strictement positive
    pub rise: Color,

    /// Variation nulle, négative ou absente
    pub fall: Color,
}

/// Palette du mode sombre
const DARK: Palette = Palette {
    bg: Color::Rgb(47, 54, 64),
    text: Color::White,
    accent: Color::Rgb(156, 136, 255),
    border: Color::Rgb(156, 136, 255),
    rise: Color::Rgb(255, 61, 61),
    fall: Color::Rgb(0, 129, 250),
};

/// Palette du mode clair
const LIGHT: Palette = Palette {
    bg: Color::Rgb(245, 245, 245),
    text: Color::Black,
    accent: Color::Rgb(156, 136, 255),
    border: Color::Rgb(120, 120, 120),
    rise: Color::Rgb(255, 61, 61),
    fall: Color::Rgb(0, 129, 250),
};

/// Drapeau de thème process-wide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    is_dark: bool,
}

impl Theme {
    /// Thème initial : sombre
    pub fn new() -> Self {
        Self { is_dark: true }
    }

    /// L'unique point d'entrée de mutation : bascule sombre <-> clair
    pub fn toggle(&mut self) {
        self.is_dark = !self.is_dark;
    }

    /// Mode sombre actif ?
    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// Jeu de couleurs du mode actif
    pub fn palette(&self) -> Palette {
        if self.is_dark {
            DARK
        } else {
            LIGHT
        }
    }

    /// Libellé du bouton de bascule affiché dans les en-têtes
    ///
    /// Montre le mode vers lequel on bascule, comme le bouton d'origine.
    pub fn mode_button_label(&self) -> &'static str {
        if self.is_dark {
            "Light Mode"
        } else {
            "Dark Mode"
        }
    }
}

impl Default for Theme {
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

    #[test]
    fn test_theme_defaults_to_dark() {
        let theme = Theme::new();
        assert!(theme.is_dark());
        assert_eq!(theme.palette(), DARK);
    }

    #[test]
    fn test_toggle_is_an_involution() {
        // Basculer deux fois revient à la valeur de départ
        let mut theme = Theme::new();
        let initial = theme.is_dark();

        theme.toggle();
        assert_ne!(theme.is_dark(), initial);

        theme.toggle();
        assert_eq!(theme.is_dark(), initial);
    }

    #[test]
    fn test_palettes_swap_with_mode() {
        let mut theme = Theme::new();
        assert_eq!(theme.palette().bg, Color::Rgb(47, 54, 64));

        theme.toggle();
        assert_eq!(theme.palette().bg, Color::Rgb(245, 245, 245));
        assert_eq!(theme.mode_button_label(), "Dark Mode");
    }

    #[test]
    fn test_rise_and_fall_colors_shared_by_both_modes() {
        let mut theme = Theme::new();
        let dark = theme.palette();
        theme.toggle();
        let light = theme.palette();

        assert_eq!(dark.rise, light.rise);
        assert_eq!(dark.fall, light.fall);
        assert_ne!(dark.rise, dark.fall);
    }
}
