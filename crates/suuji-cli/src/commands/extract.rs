//! Extract command - pull entities out of a single text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::{debug, info};

use suuji_core::models::ExtractionConfig;
use suuji_core::{DocumentParser, ExtractedMatch, ExtractionReport};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Entity kinds to extract (default: all enabled in config)
    #[arg(short, long, value_enum)]
    kind: Vec<EntityKind>,

    /// Resolve relative dates against this day (YYYY-MM-DD)
    #[arg(short, long)]
    reference_date: Option<NaiveDate>,

    /// Resolve relative dates against the current day
    #[arg(long, conflicts_with = "reference_date")]
    today: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per match
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum EntityKind {
    Date,
    Time,
    PostalCode,
    PhoneNumber,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            info!("Reading text from {}", path.display());
            fs::read_to_string(path)?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut parser = DocumentParser::from_config(&config)?;
    if !args.kind.is_empty() {
        parser = parser.with_extraction_config(select_kinds(&args.kind, &config.extraction));
    }
    if let Some(reference) = reference_date(args.reference_date, args.today) {
        parser = parser.with_reference_date(reference);
    }

    let report = parser.parse(&text);
    let output = format_report(&report, &text, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    for warning in &report.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Reference day for date resolution, if one was requested.
pub fn reference_date(explicit: Option<NaiveDate>, today: bool) -> Option<NaiveDate> {
    explicit.or_else(|| today.then(|| chrono::Local::now().date_naive()))
}

/// Extraction switches enabling only `kinds`.
pub fn select_kinds(kinds: &[EntityKind], base: &ExtractionConfig) -> ExtractionConfig {
    ExtractionConfig {
        dates: kinds.contains(&EntityKind::Date),
        times: kinds.contains(&EntityKind::Time),
        postal_codes: kinds.contains(&EntityKind::PostalCode),
        phone_numbers: kinds.contains(&EntityKind::PhoneNumber),
        report_failures: base.report_failures,
    }
}

pub fn format_report(
    report: &ExtractionReport,
    text: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report, text),
        OutputFormat::Text => Ok(format_text(report, text)),
    }
}

fn grouped(report: &ExtractionReport) -> [(&'static str, &[ExtractedMatch]); 4] {
    [
        ("date", report.dates.as_slice()),
        ("time", report.times.as_slice()),
        ("postal_code", report.postal_codes.as_slice()),
        ("phone_number", report.phone_numbers.as_slice()),
    ]
}

fn format_csv(report: &ExtractionReport, text: &str) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["kind", "start", "end", "text", "fields"])?;

    for (kind, matches) in grouped(report) {
        for extracted in matches {
            let fields = extracted
                .fields
                .iter()
                .filter(|(_, value)| !value.is_absent())
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join(";");

            wtr.write_record([
                kind,
                &extracted.span.0.to_string(),
                &extracted.span.1.to_string(),
                &extracted.excerpt(text),
                &fields,
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ExtractionReport, text: &str) -> String {
    let mut output = String::new();

    for (kind, matches) in grouped(report) {
        if matches.is_empty() {
            continue;
        }
        output.push_str(&format!("{} ({}):\n", kind, matches.len()));
        for extracted in matches {
            output.push_str(&format!(
                "  [{}, {}) {}\n",
                extracted.span.0,
                extracted.span.1,
                extracted.excerpt(text)
            ));
        }
        output.push('\n');
    }

    if !report.resolved_dates.is_empty() {
        output.push_str("Resolved dates:\n");
        for resolved in &report.resolved_dates {
            output.push_str(&format!(
                "  [{}, {}) {}\n",
                resolved.span.0, resolved.span.1, resolved.date
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Total: {} matches in {}ms",
        report.total_matches(),
        report.processing_time_ms
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "来月3日の午後2時に〒100-0001で。電話は03-1234-5678です。";

    #[test]
    fn test_select_kinds() {
        let kinds = [EntityKind::Date, EntityKind::PhoneNumber];
        let extraction = select_kinds(&kinds, &ExtractionConfig::default());
        assert!(extraction.dates);
        assert!(!extraction.times);
        assert!(!extraction.postal_codes);
        assert!(extraction.phone_numbers);
    }

    #[test]
    fn test_explicit_reference_date_wins() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(reference_date(Some(day), false), Some(day));
        assert_eq!(reference_date(None, false), None);
        assert!(reference_date(None, true).is_some());
    }

    #[test]
    fn test_csv_has_row_per_match() {
        let report = DocumentParser::new().parse(TEXT);
        let csv = format_report(&report, TEXT, OutputFormat::Csv).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "kind,start,end,text,fields");
        assert_eq!(lines.len(), 1 + report.total_matches());
        assert!(lines
            .iter()
            .any(|line| line.starts_with("postal_code,") && line.contains("〒100-0001")));
    }

    #[test]
    fn test_text_summary() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let report = DocumentParser::new().with_reference_date(reference).parse(TEXT);
        let summary = format_report(&report, TEXT, OutputFormat::Text).unwrap();

        assert!(summary.contains("phone_number (1):"));
        assert!(summary.contains("2024-02-03"));
        assert!(summary.contains("Total: 4 matches"));
    }
}
