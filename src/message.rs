//! Plain-text rendering of a plan for WhatsApp / SMS messages.

use std::fmt::Write;

use crate::core::types::TreatmentPlan;

/// One `"• <product>: <amount><unit>"` line per step, in application order.
/// An empty plan renders as an empty string.
pub fn render_checklist(plan: &TreatmentPlan) -> String {
    plan.steps
        .iter()
        .map(|s| format!("• {}: {}{}", s.product, s.amount, s.unit))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Status header, numbered steps with their instructions, then warnings.
pub fn render_report(plan: &TreatmentPlan) -> String {
    let mut out = format!("Status: {}\n", plan.status);
    if plan.steps.is_empty() {
        out.push_str("No products needed.\n");
    }
    for step in &plan.steps {
        let _ = writeln!(out, "{}. {}: {}{}", step.order, step.product, step.amount, step.unit);
        if !step.instruction.is_empty() {
            let _ = writeln!(out, "   {}", step.instruction);
        }
    }
    for warning in &plan.warnings {
        let _ = writeln!(out, "! {warning}");
    }
    out
}
