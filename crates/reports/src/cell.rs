//! Uniform report cells for external renderers.
//!
//! Renderers (PDF, CSV, terminal tables) consume a plain grid of tagged
//! cells; the styling vocabulary is deliberately tiny.

use serde::{Deserialize, Serialize};

use tallyerp_core::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStyle {
    Plain,
    /// Column headers and totals rows.
    Emphasis,
}

/// One cell of a rendered report grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub alignment: Alignment,
    pub style: CellStyle,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Left,
            style: CellStyle::Plain,
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alignment: Alignment::Left,
            style: CellStyle::Emphasis,
        }
    }

    pub fn amount(amount: Money) -> Self {
        Self {
            text: amount.to_string(),
            alignment: Alignment::Right,
            style: CellStyle::Plain,
        }
    }

    pub fn total(amount: Money) -> Self {
        Self {
            text: amount.to_string(),
            alignment: Alignment::Right,
            style: CellStyle::Emphasis,
        }
    }
}
