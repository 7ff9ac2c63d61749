//! Plan assembler.
//!
//! Turns the proposals of the individual generators into a
//! [`TreatmentPlan`]: drops the empty candidates, orders the rest by
//! generator priority, numbers them from 1, derives the plan status and
//! appends the operator guidance of whatever was dosed.

use tracing::debug;

use crate::core::types::{PlanStatus, TreatmentPlan, TreatmentStep};

use super::generator::ProposedStep;

/// Build a plan from generator proposals.
///
/// `critical` is set for green water and wins over any step-derived
/// status. `warnings` are the normalizer warnings; they come first, in
/// the order given, followed by the guidance of each dosed product.
pub fn assemble(
    candidates: Vec<Option<ProposedStep>>,
    critical: bool,
    mut warnings: Vec<String>,
) -> TreatmentPlan {
    let mut proposed: Vec<ProposedStep> = candidates.into_iter().flatten().collect();
    // Stable: the priority comes from generator identity alone.
    proposed.sort_by_key(|p| p.generator);

    let mut steps = Vec::with_capacity(proposed.len());
    for (index, p) in proposed.into_iter().enumerate() {
        if let Some(guidance) = p.guidance {
            if !warnings.contains(&guidance) {
                warnings.push(guidance);
            }
        }
        steps.push(TreatmentStep {
            order: index as u32 + 1,
            product: p.product,
            amount: p.amount,
            unit: p.unit,
            instruction: p.instruction,
        });
    }

    let status = if critical {
        PlanStatus::Critical
    } else if !steps.is_empty() {
        PlanStatus::Warning
    } else {
        PlanStatus::Ok
    };

    debug!(%status, steps = steps.len(), warnings = warnings.len(), "treatment plan assembled");
    TreatmentPlan { status, steps, warnings }
}
