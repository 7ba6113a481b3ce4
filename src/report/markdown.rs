use crate::engine::{Comparison, ReferenceBar, TipPlan, NO_TIPS_MESSAGE};
use crate::scorer::FootprintResult;
use crate::utils::round_to;

/// Markdown formatter for footprint results
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format result as markdown
    pub fn format(result: &FootprintResult) -> String {
        let mut md = String::with_capacity(2048);

        md.push_str("# Your Student Carbon Footprint\n\n");
        md.push_str(&format!(
            "**Total:** {:.2} tCO₂/yr ({})\n\n",
            result.total,
            result.tier.display_name()
        ));
        md.push_str(&format!(
            "*Data source:* {} {} ({})",
            result.country.flag, result.country.name, result.country.code
        ));
        if !result.requested_country.eq_ignore_ascii_case(&result.country.code) {
            md.push_str(&format!(
                ", no factors for '{}'",
                result.requested_country
            ));
        }
        md.push_str(&format!(
            "  \n*Answered:* {}/{} questions\n\n",
            result.answered, result.question_count
        ));

        Self::format_comparison(&mut md, &result.comparison, result.total);

        // Breakdown
        md.push_str("## Breakdown\n\n");
        md.push_str("| Category | tCO₂/yr |\n");
        md.push_str("|----------|---------|\n");
        for (category, value) in result.breakdown.rounded(2).iter() {
            md.push_str(&format!("| {} | {:.2} |\n", category.display_name(), value));
        }
        md.push('\n');

        Self::format_tips(&mut md, &result.tips);

        md
    }

    fn format_bar(md: &mut String, bar: &ReferenceBar, total: f64) {
        md.push_str(&format!(
            "- {}: {:.2} / {:.1} t ({}%)\n",
            bar.label, total, bar.reference_tons, bar.percent
        ));
    }

    fn format_comparison(md: &mut String, comparison: &Comparison, total: f64) {
        md.push_str("## How You Compare\n\n");
        Self::format_bar(md, &comparison.climate_target, total);
        Self::format_bar(md, &comparison.student_average, total);
        md.push('\n');
        md.push_str(&format!("{}\n\n", comparison.message));
        md.push_str(&format!(
            "🌳 About **{}** trees would be needed to absorb this each year.\n\n",
            comparison.trees_to_offset
        ));
    }

    fn format_tips(md: &mut String, plan: &TipPlan) {
        md.push_str("## Your Action Plan\n\n");

        if plan.is_empty() {
            md.push_str(&format!("{}\n", NO_TIPS_MESSAGE));
            return;
        }

        for tip in &plan.tips {
            md.push_str(&format!("### {} {}\n\n", tip.emoji, tip.title));
            md.push_str(&format!("{}  \n", tip.description));
            md.push_str(&format!(
                "Save ≈ {:.2} tCO₂/yr ({}%). New total if you do just this: **{:.2}** tCO₂/yr\n\n",
                tip.impact, tip.percent_of_total, round_to(tip.total_if_only_this, 2)
            ));
        }

        md.push_str(&format!(
            "**Combined saving** ≈ {:.2} tCO₂/yr ({}%). Your footprint could drop to **{:.2}** tCO₂/yr.\n",
            plan.combined_savings,
            plan.combined_percent,
            round_to(plan.footprint_after_all, 2)
        ));
    }
}
