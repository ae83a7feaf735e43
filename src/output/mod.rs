//! Output formatters for ranked offer reports.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::data::OfferRecord;
use crate::semantic::Ranking;
use crate::tags::{Classified, SearchKind};

/// Output format enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Plain text report.
    #[default]
    Text,
    /// JSON document.
    Json,
    /// Markdown table.
    Markdown,
}

/// One ranked offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// 1-based position in the report.
    pub rank: usize,
    /// Row of the offer table.
    pub index: usize,
    pub offer: String,
    pub score: f64,
}

/// Ranked offers for a search term, in ranking order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub term: String,
    pub search_type: SearchKind,
    pub results: Vec<ReportEntry>,
}

impl Report {
    /// Look up the offers named by `ranking.top_indices`, keeping their order.
    pub fn new(ranking: &Ranking, offers: &[OfferRecord], classified: &Classified) -> Self {
        let results = ranking
            .top_indices
            .iter()
            .enumerate()
            .filter_map(|(pos, &index)| {
                let offer = offers.get(index)?;
                Some(ReportEntry {
                    rank: pos + 1,
                    index,
                    offer: offer.offer_text.clone(),
                    score: ranking.scores.get(index).copied().unwrap_or(0.0),
                })
            })
            .collect();
        Self {
            term: classified.term.clone(),
            search_type: classified.kind,
            results,
        }
    }
}

impl Format {
    pub fn write<W: Write>(&self, report: &Report, writer: &mut W) -> Result<()> {
        match self {
            Format::Json => format_json(report, writer),
            Format::Markdown => format_markdown(report, writer),
            Format::Text => format_text(report, writer),
        }
    }

    /// Render `report` into a string.
    pub fn render(&self, report: &Report) -> Result<String> {
        let mut buf = Vec::new();
        self.write(report, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn format_json<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

fn format_text<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "Top {} offers for {}:",
        report.results.len(),
        report.term
    )?;
    writeln!(writer, "Search Type: {} ", report.search_type)?;
    writeln!(writer)?;
    for entry in &report.results {
        writeln!(
            writer,
            "{} || cosine similarity of {:.3}.",
            entry.offer, entry.score
        )?;
    }
    Ok(())
}

fn format_markdown<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "# Top {} offers for {} ({})\n",
        report.results.len(),
        report.term,
        report.search_type
    )?;
    if report.results.is_empty() {
        writeln!(writer, "_No items_")?;
        return Ok(());
    }
    writeln!(writer, "| Rank | Offer | Score |")?;
    writeln!(writer, "| --- | --- | --- |")?;
    for entry in &report.results {
        writeln!(
            writer,
            "| {} | {} | {:.3} |",
            entry.rank,
            entry.offer.replace('|', "\\|"),
            entry.score
        )?;
    }
    writeln!(writer)?;
    Ok(())
}
