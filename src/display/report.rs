//! Labelled result rows for presenting layers.

use std::fmt;

use crate::core::types::AllocationResult;

use super::format::{format_currency, format_multiple, format_number, format_percent};

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

impl ReportRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Token distribution, funds and valuation rows, grouped into sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationReport {
    pub distribution: Vec<ReportRow>,
    pub funds: Vec<ReportRow>,
    pub valuation: Vec<ReportRow>,
}

impl AllocationReport {
    /// Build the report for a valid result.
    pub fn new(result: &AllocationResult, lp_fund_fraction: f64) -> Self {
        let lp_share = format!("{:.0}%", lp_fund_fraction * 100.0);
        let team_share = format!("{:.0}%", (1.0 - lp_fund_fraction) * 100.0);

        let distribution = vec![
            ReportRow::new(
                "Team Tokens",
                format!("{} tokens", format_number(result.team_tokens)),
            ),
            ReportRow::new(
                "Public Sale Tokens",
                format!("{} tokens", format_number(result.public_tokens)),
            ),
            ReportRow::new(
                "LP Tokens",
                format!("{} tokens", format_number(result.lp_tokens)),
            ),
            ReportRow::new("Total Allocation %", format_percent(result.total_percent())),
        ];

        let funds = vec![
            ReportRow::new("Total Funds Raised", format_currency(result.funds_to_raise)),
            ReportRow::new(
                format!("LP Funds ({lp_share})"),
                format_currency(result.lp_funds),
            ),
            ReportRow::new(
                format!("Team Funds ({team_share})"),
                format_currency(result.team_funds),
            ),
        ];

        let valuation = vec![
            ReportRow::new("Pre-Market FDV (ICO Price)", format_currency(result.fdv_ico)),
            ReportRow::new("Market FDV (LP Price)", format_currency(result.fdv_lp)),
            ReportRow::new("FDV Multiple", format_multiple(result.fdv_multiple)),
        ];

        Self {
            distribution,
            funds,
            valuation,
        }
    }

    /// All rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.distribution
            .iter()
            .chain(self.funds.iter())
            .chain(self.valuation.iter())
    }

    /// Value for a label, if present.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

impl fmt::Display for AllocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows().map(|row| row.label.len()).max().unwrap_or(0);
        let sections = [&self.distribution, &self.funds, &self.valuation];

        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                writeln!(f, "{}", "-".repeat(width + 16))?;
            }
            for row in section.iter() {
                writeln!(f, "{:<width$}  {:>14}", row.label, row.value, width = width)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AllocationInput;
    use crate::engine::derive;

    #[test]
    fn test_report_values() {
        let input = AllocationInput::new(16.0, 70.0, 100_000.0).unwrap();
        let result = derive(&input, 14.0);
        let report = AllocationReport::new(&result, 0.2);

        assert_eq!(report.value("Team Tokens"), Some("1.60B tokens"));
        assert_eq!(report.value("Public Sale Tokens"), Some("7.00B tokens"));
        assert_eq!(report.value("LP Tokens"), Some("1.40B tokens"));
        assert_eq!(report.value("Total Allocation %"), Some("100.0%"));
        assert_eq!(report.value("Total Funds Raised"), Some("$100.00K"));
        assert_eq!(report.value("LP Funds (20%)"), Some("$20.00K"));
        assert_eq!(report.value("Team Funds (80%)"), Some("$80.00K"));
        assert_eq!(report.value("Pre-Market FDV (ICO Price)"), Some("$142.86K"));
        assert_eq!(report.value("Market FDV (LP Price)"), Some("$142.86K"));
        assert_eq!(report.value("FDV Multiple"), Some("1.00x"));
    }

    #[test]
    fn test_report_display() {
        let input = AllocationInput::new(0.0, 0.0, 100_000.0).unwrap();
        let result = derive(&input, 100.0);
        let text = AllocationReport::new(&result, 0.2).to_string();

        assert_eq!(text.lines().count(), 12);
        assert!(text.contains("Market FDV (LP Price)"));
        assert!(text.contains("$20.00K"));
    }
}
