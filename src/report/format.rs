//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays free of presentation concerns
//! - output changes are localized (and covered by golden tests)
//!
//! Numbers use two decimals unless noted; non-finite values print as Rust
//! formats them (`NaN`, `inf`).

use crate::domain::{Grades, Prediction, PredictionResult};
use crate::models::RuleTable;
use crate::scenario::{Percentiles, StressSummary, SweepResult};

/// The three-line result block shown after every prediction.
pub fn format_prediction(result: &PredictionResult, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Predicted Value: {currency} {:.2}\n", result.final_value));
    out.push_str(&format!(
        "Range: {currency}{:.2} — {currency}{:.2}\n",
        result.low_bound, result.high_bound
    ));
    out.push_str(&format!("Estimated Growth Rate: {:.2}%\n", result.growth_rate_percent));
    out
}

/// Stage-by-stage trace of one prediction.
pub fn format_explain(p: &Prediction, currency: &str) -> String {
    let mut out = String::new();
    let x = &p.inputs;

    out.push_str("=== msent - Market Sentiment Prediction ===\n");
    out.push_str(&format!(
        "Inputs: current={currency}{:.2} | growth={:.2}% | volatility={:.2}% | economic={:.2} | industry={:.2} | horizon={}\n",
        x.current_value,
        x.growth_percent,
        x.volatility_percent,
        x.economic_index,
        x.industry_trend_index,
        x.horizon_periods,
    ));

    let f = &p.features;
    out.push_str(&format!(
        "\nFeatures: growth={:.4} volatility={:.4} economic={:.4} industry={:.4}\n",
        f.growth, f.volatility, f.economic, f.industry
    ));

    out.push_str(&format!(
        "Neural: hidden={} out={:.6} score={:.6}\n",
        fmt_vec(&p.neural.hidden),
        p.neural.pre_activation,
        p.neural.score
    ));

    let t = &p.fuzzy;
    out.push_str("\nMemberships:\n");
    out.push_str(&format_grades("growth", &t.growth, ["low", "medium", "high"]));
    out.push_str(&format_grades("volatility", &t.volatility, ["low", "medium", "high"]));
    out.push_str(&format_grades("economic", &t.economic, ["negative", "neutral", "positive"]));

    out.push_str(&format!(
        "\nRule: growth={} volatility={} economic={} -> {:.2}\n",
        t.rule.growth.label(),
        t.rule.volatility.label(),
        t.rule.economic.label(),
        t.rule_output
    ));
    out.push_str(&format!(
        "Activation={:.6} adjusted={:.6} certainty={:.6} crisp={:.6}\n",
        t.activation, t.adjusted, t.result.certainty, t.result.crisp
    ));

    let pr = &p.projection;
    out.push_str(&format!(
        "\nProjection: base={:.6} boost={:.6} per-period={:.6} band=±{:.4}%\n\n",
        pr.base_multiplier,
        pr.industry_boost,
        pr.period_multiplier,
        pr.band * 100.0
    ));

    out.push_str(&format_prediction(&p.result(), currency));
    out
}

fn format_grades(name: &str, g: &Grades, labels: [&str; 3]) -> String {
    format!(
        "  {name:<11} {}={:.4} {}={:.4} {}={:.4}\n",
        labels[0], g.low, labels[1], g.medium, labels[2], g.high
    )
}

/// The rule table, one rule per line.
pub fn format_rules(table: &RuleTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:<11} {:<9} {:>6}\n", "growth", "volatility", "economic", "output"));
    out.push_str(&format!("{:-<8} {:-<11} {:-<9} {:->6}\n", "", "", "", ""));
    for (key, value) in table.entries() {
        out.push_str(&format!(
            "{:<8} {:<11} {:<9} {:>6.2}\n",
            key.growth.label(),
            key.volatility.label(),
            key.economic.label(),
            value
        ));
    }
    out
}

/// Sweep table plus a monotonicity verdict.
pub fn format_sweep(sweep: &SweepResult, currency: &str) -> String {
    let mut out = String::new();
    let spec = &sweep.spec;

    out.push_str(&format!(
        "Sweep: {} from {:.2} to {:.2} ({} points)\n\n",
        spec.axis.display_name(),
        spec.from,
        spec.to,
        spec.steps
    ));

    out.push_str(
        format!(
            "{:>12} {:>8} {:>9} {:>14} {:>14} {:>14} {:>9}\n",
            "input", "crisp", "certainty", "final", "low", "high", "growth%"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!(
        "{:->12} {:->8} {:->9} {:->14} {:->14} {:->14} {:->9}\n",
        "", "", "", "", "", "", ""
    ));

    for p in &sweep.points {
        let r = &p.result;
        out.push_str(&format!(
            "{:>12.2} {:>8.4} {:>9.4} {:>14} {:>14} {:>14} {:>9.2}\n",
            p.input,
            p.crisp,
            p.certainty,
            fmt_money(r.final_value, currency),
            fmt_money(r.low_bound, currency),
            fmt_money(r.high_bound, currency),
            r.growth_rate_percent
        ));
    }

    let drops = sweep.decreases();
    if drops.is_empty() {
        out.push_str("\nFinal value is non-decreasing along the sweep.\n");
    } else {
        let at: Vec<String> = drops.iter().map(|x| format!("{x:.2}")).collect();
        out.push_str(&format!("\nFinal value decreases at: {}\n", at.join(", ")));
    }
    out
}

/// Percentile summary and sensitivities for a stress run.
pub fn format_stress(summary: &StressSummary, currency: &str) -> String {
    let mut out = String::new();
    let c = &summary.config;

    out.push_str(&format!(
        "Stress: samples={} seed={} | sigma growth={:.2} volatility={:.2} economic={:.2} industry={:.2}\n\n",
        c.samples, c.seed, c.growth_sigma, c.volatility_sigma, c.economic_sigma, c.industry_sigma
    ));

    out.push_str(&format!(
        "{:<14} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
        "", "p5", "p25", "p50", "p75", "p95", "mean"
    ));
    out.push_str(&format_percentile_row("final value", &summary.final_value, |v| fmt_money(v, currency)));
    out.push_str(&format_percentile_row("growth rate", &summary.growth_rate, |v| format!("{v:.2}%")));

    let dropped = summary.samples.len().saturating_sub(summary.final_value.n);
    if dropped > 0 {
        out.push_str(&format!("({dropped} samples with non-finite output excluded)\n"));
    }

    out.push_str("\nSensitivity (growth-rate points per unit input):\n");
    match &summary.sensitivity {
        Some(s) => {
            for (axis, slope) in &s.slopes {
                out.push_str(&format!("  {:<15} {slope:>+10.4}\n", axis.display_name()));
            }
            out.push_str(&format!("  {:<15} {:>+10.4}\n", "intercept", s.intercept));
        }
        None => out.push_str("  (not enough finite samples for a regression)\n"),
    }
    out
}

fn format_percentile_row(label: &str, p: &Percentiles, fmt: impl Fn(f64) -> String) -> String {
    format!(
        "{label:<14} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
        fmt(p.p5),
        fmt(p.p25),
        fmt(p.p50),
        fmt(p.p75),
        fmt(p.p95),
        fmt(p.mean)
    )
}

fn fmt_money(v: f64, currency: &str) -> String {
    format!("{currency}{v:.2}")
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.4}")).collect();
    format!("[{}]", parts.join(", "))
}
