//! JSON request/response shapes for the calculator API.
//!
//! The engine works in fractions; percent fields are scaled by 100 here and
//! nowhere else.

use serde::{Deserialize, Serialize};

use crate::engine::{
    Analysis, AnalysisInput, AmericanOdds, ArbitrageReport, HedgeScenario, KellySizing, Side,
    StakeSplit,
};
use crate::validation::{
    validate_amount, validate_bankroll, validate_odds, validate_probability,
    validate_scenario_odds, ValidationError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertQuery {
    pub odds: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub american: AmericanOdds,
    pub decimal: f64,
    pub implied_probability: f64,
}

impl From<AmericanOdds> for ConvertResponse {
    fn from(odds: AmericanOdds) -> Self {
        ConvertResponse {
            american: odds,
            decimal: odds.to_decimal(),
            implied_probability: odds.implied_probability(),
        }
    }
}

/// One analysis request. `sharpOdds` is also accepted as `subjectiveOrSharpOdds`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(alias = "subjectiveOrSharpOdds")]
    pub sharp_odds: f64,
    #[serde(default)]
    pub counter_odds: Option<f64>,
    #[serde(default)]
    pub bankroll: Option<f64>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub locked_stake: Option<f64>,
    #[serde(default)]
    pub scenario_odds: Option<Vec<f64>>,
}

impl CalculateRequest {
    /// Validate every field and build the engine input, filling gaps from the
    /// supplied fallbacks.
    pub fn into_input(
        self,
        fallback_bankroll: f64,
        fallback_locked_stake: f64,
    ) -> Result<AnalysisInput, ValidationError> {
        Ok(AnalysisInput {
            probability: self.probability.map(validate_probability).transpose()?,
            sharp_odds: validate_odds("sharp odds", self.sharp_odds)?,
            counter_odds: self
                .counter_odds
                .map(|o| validate_odds("counter odds", o))
                .transpose()?,
            bankroll: validate_bankroll(self.bankroll.unwrap_or(fallback_bankroll))?,
            locked_stake: validate_amount(
                "locked stake",
                self.locked_stake.unwrap_or(fallback_locked_stake),
            )?,
            scenario_odds: self
                .scenario_odds
                .as_deref()
                .map(validate_scenario_odds)
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgeRequest {
    pub locked_odds: f64,
    pub locked_stake: f64,
    /// Candidate counter prices; the default sweep when absent.
    #[serde(default)]
    pub counter_odds: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    pub games: Vec<CalculateRequest>,
    /// Applied to games that carry no bankroll of their own.
    #[serde(default)]
    pub bankroll: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KellyResponse {
    pub fraction: f64,
    pub full_stake: f64,
    pub half_stake: f64,
    pub quarter_stake: f64,
}

impl From<&KellySizing> for KellyResponse {
    fn from(k: &KellySizing) -> Self {
        KellyResponse {
            fraction: k.fraction,
            full_stake: k.full_stake,
            half_stake: k.half_stake,
            quarter_stake: k.quarter_stake,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgeScenarioResponse {
    pub counter_odds: AmericanOdds,
    pub hedge_stake: f64,
    pub guaranteed_profit: f64,
    pub roi_percent: f64,
}

impl From<&HedgeScenario> for HedgeScenarioResponse {
    fn from(s: &HedgeScenario) -> Self {
        HedgeScenarioResponse {
            counter_odds: s.counter_odds,
            hedge_stake: s.hedge_stake,
            guaranteed_profit: s.guaranteed_profit,
            roi_percent: s.roi * 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeSplitResponse {
    pub sharp_stake: f64,
    pub counter_stake: f64,
    pub guaranteed_profit: f64,
    pub roi_percent: f64,
}

impl From<&StakeSplit> for StakeSplitResponse {
    fn from(s: &StakeSplit) -> Self {
        StakeSplitResponse {
            sharp_stake: s.stake_a,
            counter_stake: s.stake_b,
            guaranteed_profit: s.guaranteed_profit,
            roi_percent: s.roi * 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageResponse {
    pub exists: bool,
    pub probability_sum: f64,
    pub edge_percent: f64,
    pub stake_split: StakeSplitResponse,
    pub hedge_scenarios: Vec<HedgeScenarioResponse>,
}

impl From<&ArbitrageReport> for ArbitrageResponse {
    fn from(r: &ArbitrageReport) -> Self {
        ArbitrageResponse {
            exists: r.result.exists,
            probability_sum: r.result.probability_sum,
            edge_percent: r.result.edge * 100.0,
            stake_split: (&r.stake_split).into(),
            hedge_scenarios: r.hedge_scenarios.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub side: Side,
    pub recommended_odds: AmericanOdds,
    pub probability: f64,
    pub ev_percent: f64,
    pub expected_profit: f64,
    pub has_edge: bool,
    pub implied_probability: f64,
    pub fair_probability: Option<f64>,
    pub kelly: KellyResponse,
    pub arbitrage: Option<ArbitrageResponse>,
}

impl From<&Analysis> for AnalysisResponse {
    fn from(a: &Analysis) -> Self {
        AnalysisResponse {
            side: a.side,
            recommended_odds: a.odds,
            probability: a.probability,
            ev_percent: a.ev * 100.0,
            expected_profit: a.expected_profit,
            has_edge: a.has_edge(),
            implied_probability: a.implied_probability,
            fair_probability: a.fair_probability,
            kelly: (&a.kelly).into(),
            arbitrage: a.arbitrage.as_ref().map(Into::into),
        }
    }
}
