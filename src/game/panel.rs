use super::error::{GameError, Result};

pub const GRID_COLS: usize = 3;
pub const GRID_ROWS: usize = 3;
pub const PANEL_COUNT: usize = GRID_COLS * GRID_ROWS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PanelColor {
    #[default]
    Idle,
    Lit,
    Pressed,
    CorrectFlash,
    ErrorFlash,
}

impl PanelColor {
    pub fn css_class(self) -> &'static str {
        match self {
            PanelColor::Idle => "panel-idle",
            PanelColor::Lit => "panel-lit",
            PanelColor::Pressed => "panel-pressed",
            PanelColor::CorrectFlash => "panel-correct",
            PanelColor::ErrorFlash => "panel-error",
        }
    }

    /// Fill color, matching the palette in `data/style.css`.
    pub fn rgb(self) -> (f64, f64, f64) {
        match self {
            PanelColor::Idle => (0.416, 0.106, 0.604),
            PanelColor::Lit => (1.0, 1.0, 1.0),
            PanelColor::Pressed => (0.612, 0.153, 0.690),
            PanelColor::CorrectFlash => (0.263, 0.627, 0.278),
            PanelColor::ErrorFlash => (0.957, 0.263, 0.212),
        }
    }
}

pub fn check_index(index: usize) -> Result<usize> {
    if index < PANEL_COUNT {
        Ok(index)
    } else {
        Err(GameError::PanelOutOfRange { index })
    }
}

/// Row-major (row, col) of a panel on the 3x3 board.
pub fn grid_position(index: usize) -> (usize, usize) {
    (index / GRID_COLS, index % GRID_COLS)
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Panels {
    colors: [PanelColor; PANEL_COUNT],
}

impl Panels {
    pub fn get(&self, index: usize) -> PanelColor {
        self.colors[index]
    }

    pub fn set(&mut self, index: usize, color: PanelColor) {
        self.colors[index] = color;
    }

    pub fn reset(&mut self) {
        self.colors = [PanelColor::Idle; PANEL_COUNT];
    }

    #[cfg(test)]
    pub fn all_idle(&self) -> bool {
        self.colors.iter().all(|c| *c == PanelColor::Idle)
    }

    pub fn colors(&self) -> [PanelColor; PANEL_COUNT] {
        self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_indices_past_the_board() {
        assert_eq!(check_index(0).unwrap(), 0);
        assert_eq!(check_index(8).unwrap(), 8);
        assert!(matches!(
            check_index(9),
            Err(GameError::PanelOutOfRange { index: 9 })
        ));
    }

    #[test]
    fn grid_is_row_major() {
        assert_eq!(grid_position(0), (0, 0));
        assert_eq!(grid_position(2), (0, 2));
        assert_eq!(grid_position(3), (1, 0));
        assert_eq!(grid_position(8), (2, 2));
    }

    #[test]
    fn reset_returns_every_panel_to_idle() {
        let mut panels = Panels::default();
        panels.set(4, PanelColor::Lit);
        panels.set(7, PanelColor::ErrorFlash);
        assert!(!panels.all_idle());
        panels.reset();
        assert!(panels.all_idle());
    }
}
