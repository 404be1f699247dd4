use std::fmt;

use crate::pricing::{self, CostComparison, PlanCatalog, Recommendation};
use crate::readings::{ReadingStore, StoreError};

/// Cost comparison and ranking for one meter.
#[derive(Debug, Clone)]
pub struct MeterReport {
    pub smart_meter_id: String,
    /// Number of stored readings the costs are based on.
    pub reading_count: usize,
    pub comparison: CostComparison,
    /// Plans cheapest first.
    pub ranking: Vec<Recommendation>,
}

/// Builds a report for every meter with readings, sorted by meter id.
///
/// # Errors
///
/// Returns `StoreError` if the reading store is unusable.
pub fn build_report(
    store: &ReadingStore,
    catalog: &PlanCatalog,
) -> Result<Vec<MeterReport>, StoreError> {
    let mut reports = Vec::new();
    for smart_meter_id in store.meter_ids()? {
        let Some(readings) = store.get(&smart_meter_id)? else {
            continue;
        };
        let comparison = pricing::comparator::compare_plans(&readings, catalog, &smart_meter_id);
        let ranking = pricing::recommend::rank(comparison.clone(), None);
        reports.push(MeterReport {
            smart_meter_id,
            reading_count: readings.len(),
            comparison,
            ranking,
        });
    }
    Ok(reports)
}

impl fmt::Display for MeterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- {} ({} readings, current plan: {}) ---",
            self.smart_meter_id, self.reading_count, self.comparison.current_plan_id
        )?;
        for (rank, r) in self.ranking.iter().enumerate() {
            let marker = if r.plan_id == self.comparison.current_plan_id {
                " *"
            } else {
                ""
            };
            writeln!(f, "{:>2}. {:<16} {:>10.2}{marker}", rank + 1, r.plan_id, r.cost)?;
        }
        Ok(())
    }
}
