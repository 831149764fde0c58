//! Per-call weight table over every chart type.

use exa_model::ChartType;

/// Accumulated weight per chart type, indexed by declaration order.
///
/// Built fresh for each configuration call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartWeights {
    weights: [f64; ChartType::ALL.len()],
}

impl ChartWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, chart: ChartType, amount: f64) {
        self.weights[chart.index()] += amount;
    }

    pub fn scale(&mut self, chart: ChartType, factor: f64) {
        self.weights[chart.index()] *= factor;
    }

    pub fn get(&self, chart: ChartType) -> f64 {
        self.weights[chart.index()]
    }

    /// Non-zero weights, highest first. Ties keep declaration order.
    pub fn ranked(&self) -> Vec<(ChartType, f64)> {
        let mut ranked: Vec<(ChartType, f64)> = ChartType::ALL
            .into_iter()
            .map(|chart| (chart, self.get(chart)))
            .filter(|(_, weight)| *weight > 0.0)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_orders_and_drops_zero() {
        let mut weights = ChartWeights::new();
        weights.add(ChartType::Pie, 0.4);
        weights.add(ChartType::Bar, 0.4);
        weights.add(ChartType::Scatter, 0.9);
        weights.scale(ChartType::Scatter, 0.5);

        let ranked = weights.ranked();
        let order: Vec<ChartType> = ranked.iter().map(|(c, _)| *c).collect();
        assert_eq!(order, vec![ChartType::Scatter, ChartType::Bar, ChartType::Pie]);
        assert!((ranked[0].1 - 0.45).abs() < 1e-12);
    }
}
