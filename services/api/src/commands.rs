use crate::infra::{build_consultation_service, load_catalog};
use chrono::{DateTime, Utc};
use clap::Args;
use medisym::config::AppConfig;
use medisym::diagnosis::{
    ConsultationReport, ConsultationRequest, DiseaseId, DiseaseProfile, KnowledgeBase,
};
use medisym::error::AppError;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub(crate) struct ConsultArgs {
    /// Free-text symptom description, in French
    pub(crate) symptoms: String,
    /// Number of suggestions to return (defaults to APP_DEFAULT_TOP_N)
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogListArgs {
    /// Emit CSV (id, name, severity, color) instead of a table
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogShowArgs {
    /// Disease identifier
    pub(crate) id: DiseaseId,
}

#[derive(Debug, Serialize)]
struct ConsultOutput<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a ConsultationReport,
}

pub(crate) fn run_consult(args: ConsultArgs) -> Result<(), AppError> {
    let ConsultArgs {
        symptoms,
        top_n,
        json,
    } = args;

    let config = AppConfig::load()?;
    let service = build_consultation_service(&config.diagnosis)?;
    let report = service.consult(ConsultationRequest { symptoms, top_n })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let output = ConsultOutput {
            generated_at: Utc::now(),
            report: &report,
        };
        serde_json::to_writer_pretty(&mut out, &output)
            .map_err(|err| AppError::Output(err.to_string()))?;
        writeln!(out)?;
    } else {
        render_report(&report, &mut out)?;
    }
    Ok(())
}

pub(crate) fn run_catalog_list(args: CatalogListArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.diagnosis)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.csv {
        write_catalog_csv(&catalog, &mut out)
    } else {
        render_catalog(&catalog, &mut out)?;
        Ok(())
    }
}

pub(crate) fn run_catalog_show(args: CatalogShowArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.diagnosis)?;
    let disease = catalog
        .get(args.id)
        .ok_or(AppError::UnknownDisease(args.id))?;

    let stdout = io::stdout();
    render_profile(disease, &mut stdout.lock())?;
    Ok(())
}

pub(crate) fn render_report<W: Write>(report: &ConsultationReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Symptoms: {}", report.symptoms)?;

    if report.results.is_empty() {
        writeln!(out, "\nNo suggestion found for the described symptoms.")?;
        return Ok(());
    }

    writeln!(out, "\nSuggestions")?;
    for (rank, result) in report.results.iter().enumerate() {
        writeln!(
            out,
            "{}. {} ({}%, severity {})",
            rank + 1,
            result.disease.name,
            result.confidence,
            result.disease.severity.label()
        )?;
        writeln!(out, "   score {:.2}", result.score)?;
        if !result.matched_key_symptoms.is_empty() {
            writeln!(
                out,
                "   key symptoms: {}",
                result.matched_key_symptoms.join(", ")
            )?;
        }
        writeln!(out, "   matched terms: {}", result.matched_keywords.join(", "))?;
    }

    writeln!(
        out,
        "\nThese suggestions are not a medical diagnosis. Consult a health professional."
    )
}

pub(crate) fn render_catalog<W: Write>(catalog: &KnowledgeBase, out: &mut W) -> io::Result<()> {
    for listing in catalog.listings() {
        writeln!(
            out,
            "{:>3}  {} [{}]",
            listing.id,
            listing.name,
            listing.severity.label()
        )?;
    }
    Ok(())
}

pub(crate) fn write_catalog_csv<W: Write>(
    catalog: &KnowledgeBase,
    out: &mut W,
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    for listing in catalog.listings() {
        writer
            .serialize(&listing)
            .map_err(|err| AppError::Output(err.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn render_profile<W: Write>(disease: &DiseaseProfile, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} (#{})", disease.name, disease.id)?;
    writeln!(out, "Severity: {}", disease.severity.label())?;
    if !disease.description.is_empty() {
        writeln!(out, "\n{}", disease.description)?;
    }

    for (heading, items) in [
        ("Symptoms", &disease.symptoms),
        ("Treatment", &disease.treatment),
        ("Prevention", &disease.prevention),
    ] {
        if items.is_empty() {
            continue;
        }
        writeln!(out, "\n{heading}")?;
        for item in items {
            writeln!(out, "- {item}")?;
        }
    }
    Ok(())
}
