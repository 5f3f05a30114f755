//! Per-ticker summary rows for the screen run report.

use divscan_divergence::DivergenceEvent;
use serde::{Deserialize, Serialize};

use crate::TickerAnalysis;

/// What the screen run concluded for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenOutcome {
    /// Ticker symbol.
    pub symbol: String,
    /// Bars the analysis covered.
    pub bars: usize,
    /// Total divergence events found across the covered window.
    pub events: usize,
    /// Most recent bullish or hidden-bullish event, if any.
    pub latest_bullish: Option<DivergenceEvent>,
    /// Whether the latest bullish-class event is fresh enough to act on.
    pub actionable: bool,
}

impl ScreenOutcome {
    /// Summarizes a finished analysis for `symbol`.
    #[must_use]
    pub fn from_analysis(
        symbol: impl Into<String>,
        bars: usize,
        analysis: &TickerAnalysis,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
            events: analysis.events.len(),
            latest_bullish: analysis.latest_bullish().copied(),
            actionable: analysis.actionable,
        }
    }
}

#[cfg(test)]
mod tests {
    use divscan_divergence::DivergenceKind;

    use super::*;

    #[test]
    fn test_from_analysis_copies_summary_fields() {
        let analysis = TickerAnalysis {
            oscillator: Vec::new(),
            price_pivots: Vec::new(),
            oscillator_pivots: Vec::new(),
            events: vec![DivergenceEvent::new(
                chrono::NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                DivergenceKind::HiddenBullish,
            )],
            actionable: true,
        };
        let outcome = ScreenOutcome::from_analysis("spy", 120, &analysis);

        assert_eq!(outcome.symbol, "spy");
        assert_eq!(outcome.bars, 120);
        assert_eq!(outcome.events, 1);
        assert_eq!(
            outcome.latest_bullish.map(|event| event.kind),
            Some(DivergenceKind::HiddenBullish)
        );
        assert!(outcome.actionable);
    }

    #[test]
    fn test_from_analysis_empty() {
        let analysis = TickerAnalysis {
            oscillator: Vec::new(),
            price_pivots: Vec::new(),
            oscillator_pivots: Vec::new(),
            events: Vec::new(),
            actionable: false,
        };
        let outcome = ScreenOutcome::from_analysis("qqq", 0, &analysis);

        assert_eq!(outcome.events, 0);
        assert!(outcome.latest_bullish.is_none());
        assert!(!outcome.actionable);
    }
}
