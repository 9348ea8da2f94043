use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// NGFS-style transition scenario families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimateScenario {
    Orderly,
    Disorderly,
    Hothouse,
}

impl ClimateScenario {
    pub const ALL: [ClimateScenario; 3] = [
        ClimateScenario::Orderly,
        ClimateScenario::Disorderly,
        ClimateScenario::Hothouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateScenario::Orderly => "Orderly",
            ClimateScenario::Disorderly => "Disorderly",
            ClimateScenario::Hothouse => "Hothouse",
        }
    }

    fn index(&self) -> usize {
        match self {
            ClimateScenario::Orderly => 0,
            ClimateScenario::Disorderly => 1,
            ClimateScenario::Hothouse => 2,
        }
    }
}

/// Stress-test horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeHorizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeHorizon {
    pub const ALL: [TimeHorizon; 3] = [
        TimeHorizon::ShortTerm,
        TimeHorizon::MediumTerm,
        TimeHorizon::LongTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeHorizon::ShortTerm => "Short",
            TimeHorizon::MediumTerm => "Medium",
            TimeHorizon::LongTerm => "Long",
        }
    }

    fn index(&self) -> usize {
        match self {
            TimeHorizon::ShortTerm => 0,
            TimeHorizon::MediumTerm => 1,
            TimeHorizon::LongTerm => 2,
        }
    }
}

/// Static scenario × horizon table of percentage shocks.
///
/// An input supplied alongside derived parameters for presentation
/// context; the engine reads it, never computes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockMatrix {
    /// values[scenario][horizon], percentages
    values: [[Decimal; 3]; 3],
}

impl ShockMatrix {
    pub fn new(values: [[Decimal; 3]; 3]) -> Self {
        Self { values }
    }

    pub fn get(&self, scenario: ClimateScenario, horizon: TimeHorizon) -> Decimal {
        self.values[scenario.index()][horizon.index()]
    }

    /// Rows as (scenario, horizon, value) for tabular rendering.
    pub fn entries(&self) -> Vec<(ClimateScenario, TimeHorizon, Decimal)> {
        ClimateScenario::ALL
            .iter()
            .flat_map(|&s| TimeHorizon::ALL.iter().map(move |&h| (s, h, self.get(s, h))))
            .collect()
    }
}
