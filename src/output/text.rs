use std::fmt::Write;

use crate::checker::{Finding, FindingStatus};
use crate::engine::{ComplianceReport, FrameworkSummary, OverallStatus};
use crate::error::Result;

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

/// Section order of findings in the text report; passes only with `-v`.
const SECTION_ORDER: [FindingStatus; 5] = [
    FindingStatus::Fail,
    FindingStatus::Error,
    FindingStatus::Incomplete,
    FindingStatus::ReviewRequired,
    FindingStatus::Pass,
];

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn status_icon(status: FindingStatus) -> &'static str {
        match status {
            FindingStatus::Pass => "✓",
            FindingStatus::Fail => "✗",
            FindingStatus::Incomplete | FindingStatus::Error => "⚠",
            FindingStatus::ReviewRequired => "◉",
        }
    }

    const fn status_label(status: FindingStatus) -> &'static str {
        match status {
            FindingStatus::Pass => "PASS",
            FindingStatus::Fail => "FAIL",
            FindingStatus::Incomplete => "INCOMPLETE",
            FindingStatus::Error => "ERROR",
            FindingStatus::ReviewRequired => "REVIEW",
        }
    }

    const fn status_color(status: FindingStatus) -> &'static str {
        match status {
            FindingStatus::Pass => ansi::GREEN,
            FindingStatus::Fail => ansi::RED,
            FindingStatus::Incomplete | FindingStatus::Error => ansi::YELLOW,
            FindingStatus::ReviewRequired => ansi::CYAN,
        }
    }

    const fn overall_color(status: OverallStatus) -> &'static str {
        match status {
            OverallStatus::Compliant => ansi::GREEN,
            OverallStatus::ConditionallyCompliant | OverallStatus::ReviewRequired => ansi::YELLOW,
            OverallStatus::NonCompliant => ansi::RED,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    /// Render findings without a report, e.g. for a category-wide query.
    #[must_use]
    pub fn format_findings(&self, findings: &[Finding]) -> String {
        let mut output = String::new();
        for status in SECTION_ORDER {
            for finding in findings.iter().filter(|f| f.status == status) {
                self.format_finding(finding, &mut output);
                output.push('\n');
            }
        }
        let passed = findings.iter().filter(|f| f.is_pass()).count();
        let failed = findings.iter().filter(|f| f.is_fail()).count();
        let _ = writeln!(
            output,
            "{} findings: {} passed, {} failed, {} other",
            findings.len(),
            self.colorize(&passed.to_string(), ansi::GREEN),
            self.colorize(&failed.to_string(), ansi::RED),
            findings.len() - passed - failed
        );
        output
    }

    fn format_finding(&self, finding: &Finding, output: &mut String) {
        let label = self.colorize(
            Self::status_label(finding.status),
            Self::status_color(finding.status),
        );
        let _ = writeln!(
            output,
            "{} {label} [{}] {}: {}",
            Self::status_icon(finding.status),
            finding.severity.as_str(),
            finding.rule_id,
            finding.rule_name
        );
        let _ = writeln!(output, "   {}", finding.message);

        if let (Some(actual), Some(required), Some(margin)) =
            (finding.actual_value, finding.required_value, finding.margin)
        {
            let _ = writeln!(
                output,
                "   Actual: {actual:.3}, required: {required:.3}, margin: {margin:+.3}"
            );
        }
        for reference in &finding.references {
            let _ = writeln!(output, "   Reference: {}", reference.citation());
        }
        if !finding.is_pass()
            && let Some(guidance) = &finding.remediation_guidance
        {
            let _ = writeln!(output, "   Remediation: {guidance}");
        }
    }

    fn format_framework(&self, summary: &FrameworkSummary, output: &mut String) {
        let status = self.colorize(summary.status.as_str(), Self::overall_color(summary.status));
        let _ = writeln!(
            output,
            "  {}: {}/{} passed, {} failed ({:.1}%) {status}",
            summary.framework.display_name(),
            summary.pass_count,
            summary.total,
            summary.fail_count,
            summary.pass_rate
        );
    }

    fn format_header(report: &ComplianceReport, output: &mut String) {
        let vessel = report.vessel();
        let _ = writeln!(
            output,
            "Compliance report: {} ({}, {} m)",
            vessel.name, vessel.vessel_type, vessel.length_m
        );
        let frameworks: Vec<&str> = report
            .frameworks_checked()
            .iter()
            .map(|f| f.display_name())
            .collect();
        let _ = writeln!(output, "Frameworks: {}", frameworks.join(", "));
        output.push('\n');
    }

    fn format_summary(&self, report: &ComplianceReport, output: &mut String) {
        let _ = writeln!(
            output,
            "Summary: {} rules checked, {} passed, {} failed, {} incomplete, {} review required",
            report.total_rules(),
            self.colorize(&report.pass_count().to_string(), ansi::GREEN),
            self.colorize(&report.fail_count().to_string(), ansi::RED),
            self.colorize(&report.incomplete_count().to_string(), ansi::YELLOW),
            self.colorize(&report.review_count().to_string(), ansi::CYAN),
        );
        let status = report.overall_status();
        let _ = writeln!(
            output,
            "Overall status: {} (pass rate {:.1}%)",
            self.colorize(&status.as_str().to_uppercase(), Self::overall_color(status)),
            report.get_pass_rate()
        );
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &ComplianceReport) -> Result<String> {
        let mut output = String::new();
        Self::format_header(report, &mut output);

        for status in SECTION_ORDER {
            if status == FindingStatus::Pass && self.verbose == 0 {
                continue;
            }
            for finding in report.findings().iter().filter(|f| f.status == status) {
                self.format_finding(finding, &mut output);
                output.push('\n');
            }
        }

        if !report.frameworks_checked().is_empty() {
            output.push_str("By framework:\n");
            for summary in report.framework_summaries() {
                self.format_framework(&summary, &mut output);
            }
            output.push('\n');
        }

        self.format_summary(report, &mut output);
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
