//! sheet2lua CLI application.

use super::types::{ReportFormat, Sheet2LuaCli, Sheet2LuaCommand};
use crate::batch::{RunReport, SheetOutcome, compile_all};
use crate::compiler::{DESCRIPTOR_ROW, NAME_ROW, SheetCompiler};
use crate::config::load_config;
use crate::output::{DirectorySink, OutputSink, StdoutSink, write_records};
use crate::schema::parse_schema;
use crate::workbook::{SheetData, read_workbook};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sheet2lua_core::prelude::*;
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Settings of one `convert` invocation
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Workbook path
    pub input: PathBuf,
    /// Output directory override
    pub output: Option<PathBuf>,
    /// Build target override
    pub audience: Option<AudienceFilter>,
    /// Configuration file
    pub config: Option<PathBuf>,
    /// Sheet selection, empty for all
    pub sheets: Vec<String>,
    /// Trailing column override
    pub trailing_columns: Option<usize>,
    /// Print instead of writing files
    pub dry_run: bool,
    /// Fail the run when any sheet fails
    pub strict: bool,
}

impl ConvertOptions {
    /// Load the configuration file, if any, and apply the overrides
    ///
    /// # Errors
    ///
    /// Returns configuration loading and validation errors
    pub fn resolve_config(&self) -> Result<Sheet2LuaConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Sheet2LuaConfig::default(),
        };
        if let Some(dir) = &self.output {
            config.output.dir.clone_from(dir);
        }
        if let Some(audience) = self.audience {
            config.audience = audience;
        }
        if let Some(trailing_columns) = self.trailing_columns {
            config.layout.trailing_columns = trailing_columns;
        }
        config.validate()?;
        Ok(config)
    }

    /// Workbook file name as shown in preambles
    #[must_use]
    pub fn workbook_name(&self) -> String {
        self.input.file_name().map_or_else(
            || self.input.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

/// Parsed header of one sheet
#[derive(Debug)]
pub struct SheetSchema {
    /// Sheet name
    pub sheet: String,
    /// Parsed schema or the reason it could not be parsed
    pub schema: Result<Schema>,
}

/// Main sheet2lua CLI application
pub struct Sheet2LuaApp {
    cli: Sheet2LuaCli,
}

impl Sheet2LuaApp {
    /// Create an application from the process arguments
    #[must_use]
    pub fn from_args() -> Self {
        Self::new(Sheet2LuaCli::parse())
    }

    /// Create an application from a parsed command line
    #[must_use]
    pub fn new(cli: Sheet2LuaCli) -> Self {
        Self { cli }
    }

    /// Run the application
    ///
    /// # Errors
    ///
    /// Returns error if the command fails
    pub async fn run(self) -> Result<()> {
        self.init_logging();
        info!("Starting sheet2lua");

        match self.execute_command().await {
            Ok(()) => {
                info!("Command completed successfully");
                Ok(())
            }
            Err(err) => {
                error!("Command failed: {}", err);
                if !self.cli.quiet {
                    eprintln!("{} {err}", "Error:".red().bold());
                }
                Err(err)
            }
        }
    }

    /// Configure tracing subscriber based on CLI flags, or `RUST_LOG` when set
    fn init_logging(&self) {
        let level = if self.cli.quiet {
            tracing::Level::ERROR
        } else if self.cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        let builder = tracing_subscriber::fmt()
            .with_target(false)
            .with_writer(std::io::stderr);
        let installed = if std::env::var_os("RUST_LOG").is_some() {
            builder.with_env_filter(EnvFilter::from_default_env()).try_init()
        } else {
            builder.with_max_level(level).try_init()
        };
        if installed.is_err() {
            debug!("Tracing subscriber already installed");
        }
    }

    async fn execute_command(&self) -> Result<()> {
        match &self.cli.command {
            Sheet2LuaCommand::Convert {
                input,
                output,
                audience,
                config,
                sheets,
                trailing_columns,
                dry_run,
                strict,
            } => {
                let options = ConvertOptions {
                    input: input.clone(),
                    output: output.clone(),
                    audience: audience.map(AudienceFilter::from),
                    config: config.clone(),
                    sheets: sheets.clone(),
                    trailing_columns: *trailing_columns,
                    dry_run: *dry_run,
                    strict: *strict,
                };
                self.convert_command(&options).await
            }
            Sheet2LuaCommand::Schema { input, sheets } => self.schema_command(input, sheets).await,
        }
    }

    async fn convert_command(&self, options: &ConvertOptions) -> Result<()> {
        let config = options.resolve_config()?;
        let source_label = config.output.source_label(&options.workbook_name());

        let sheets = read_sheets(&options.input, &options.sheets).await?;
        let inputs = sheets
            .into_iter()
            .map(|sheet| sheet.into_input(source_label.clone()))
            .collect();
        let compiler = Arc::new(SheetCompiler::from_config(&config));
        let report = compile_all(compiler, inputs, config.audience).await;

        let sink: Box<dyn OutputSink> = if options.dry_run {
            Box::new(StdoutSink::new(config.output.extension.clone()))
        } else {
            Box::new(DirectorySink::from_config(&config.output))
        };

        let progress = self.progress_bar(report.compiled(), options.dry_run);
        let written = match &progress {
            Some(pb) => {
                write_records(sink.as_ref(), report.records(), |record, _| {
                    pb.set_message(record.name.clone());
                    pb.inc(1);
                })
                .await
            }
            None => write_records(sink.as_ref(), report.records(), |_, _| {}).await,
        };
        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }
        let destinations = written?;
        info!("Wrote {} records to {} sink", destinations.len(), sink.name());

        let rendered = match self.cli.format {
            ReportFormat::Pretty if self.cli.quiet => None,
            ReportFormat::Pretty => Some(Self::render_run_pretty(
                &options.input,
                config.audience,
                &report,
                &destinations,
            )?),
            ReportFormat::Json => Some(Self::render_run_json(
                &options.input,
                config.audience,
                &report,
                &destinations,
            )?),
        };
        if let Some(rendered) = rendered {
            if options.dry_run {
                eprintln!("{rendered}");
            } else {
                println!("{rendered}");
            }
        }

        if options.strict && report.has_failures() {
            return Err(Sheet2LuaError::SheetsFailed {
                failed: report.failed(),
                total: report.sheets.len(),
            });
        }
        Ok(())
    }

    async fn schema_command(&self, input: &Path, only: &[String]) -> Result<()> {
        let sheets = read_sheets(input, only).await?;
        let schemas = sheet_schemas(&sheets);

        let rendered = match self.cli.format {
            ReportFormat::Pretty => Self::render_schemas_pretty(&schemas)?,
            ReportFormat::Json => Self::render_schemas_json(&schemas)?,
        };
        println!("{rendered}");
        Ok(())
    }

    fn progress_bar(&self, len: usize, dry_run: bool) -> Option<ProgressBar> {
        if self.cli.quiet || dry_run || self.cli.format == ReportFormat::Json || len == 0 {
            return None;
        }
        let pb = ProgressBar::new(u64::try_from(len).unwrap_or(u64::MAX));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_or_else(
                |_| ProgressStyle::default_bar(),
                |style| style.progress_chars("#>-"),
            );
        pb.set_style(style);
        Some(pb)
    }

    fn render_run_pretty(
        input: &Path,
        audience: AudienceFilter,
        report: &RunReport,
        destinations: &[String],
    ) -> Result<String> {
        let mut buffer = String::new();
        writeln!(
            &mut buffer,
            "{} ({} build)",
            input.display().to_string().bold(),
            audience
        )?;
        for sheet in &report.sheets {
            match &sheet.outcome {
                SheetOutcome::Compiled(_) => {
                    writeln!(&mut buffer, "  {} {}", "ok".green(), sheet.sheet)?;
                }
                SheetOutcome::Skipped(err) => {
                    writeln!(&mut buffer, "  {} {}: {err}", "skip".yellow(), sheet.sheet)?;
                }
                SheetOutcome::Failed(err) => {
                    writeln!(&mut buffer, "  {} {}: {err}", "fail".red(), sheet.sheet)?;
                }
            }
        }
        write!(
            &mut buffer,
            "{} compiled, {} skipped, {} failed, {} written",
            report.compiled().to_string().green(),
            report.skipped().to_string().yellow(),
            report.failed().to_string().red(),
            destinations.len()
        )?;
        Ok(buffer)
    }

    fn render_run_json(
        input: &Path,
        audience: AudienceFilter,
        report: &RunReport,
        destinations: &[String],
    ) -> Result<String> {
        let body = serde_json::json!({
            "input": input.display().to_string(),
            "audience": audience,
            "compiled": report.compiled(),
            "skipped": report.skipped(),
            "failed": report.failed(),
            "outputs": destinations,
            "sheets": report.summaries(),
        });
        Ok(serde_json::to_string_pretty(&body)?)
    }

    fn render_schemas_pretty(schemas: &[SheetSchema]) -> Result<String> {
        let mut buffer = String::new();
        for entry in schemas {
            writeln!(&mut buffer, "{}", entry.sheet.bold())?;
            let schema = match &entry.schema {
                Ok(schema) => schema,
                Err(err) => {
                    writeln!(&mut buffer, "  {}", err.to_string().red())?;
                    continue;
                }
            };
            let width = schema.iter().map(|f| f.name.len()).max().unwrap_or(0);
            for field in schema {
                let line = format!(
                    "  {:>3}  {:<width$}  {:<8}  {}",
                    field.index,
                    field.name,
                    field.value_type.as_str(),
                    field.audience.as_str()
                );
                if field.value_type.is_known() {
                    writeln!(&mut buffer, "{}", line.trim_end())?;
                } else {
                    writeln!(&mut buffer, "{}  {}", line.trim_end(), "unknown type".yellow())?;
                }
            }
        }
        Ok(buffer.trim_end().to_string())
    }

    fn render_schemas_json(schemas: &[SheetSchema]) -> Result<String> {
        let body: Vec<serde_json::Value> = schemas
            .iter()
            .map(|entry| match &entry.schema {
                Ok(schema) => serde_json::json!({ "sheet": entry.sheet, "fields": schema }),
                Err(err) => serde_json::json!({
                    "sheet": entry.sheet,
                    "error_kind": err.kind(),
                    "message": err.to_string(),
                }),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&body)?)
    }
}

/// Read a workbook off the async runtime
async fn read_sheets(input: &Path, only: &[String]) -> Result<Vec<SheetData>> {
    let path = input.to_path_buf();
    let only = only.to_vec();
    tokio::task::spawn_blocking(move || read_workbook(&path, &only))
        .await
        .map_err(|e| Sheet2LuaError::worker(e.to_string()))?
}

/// Parse the header of every sheet
#[must_use]
pub fn sheet_schemas(sheets: &[SheetData]) -> Vec<SheetSchema> {
    sheets
        .iter()
        .map(|sheet| {
            let schema = if sheet.rows.len() > DESCRIPTOR_ROW {
                parse_schema(&sheet.rows[NAME_ROW], &sheet.rows[DESCRIPTOR_ROW])
            } else {
                warn!("Sheet '{}' has no descriptor row", sheet.name);
                Err(Sheet2LuaError::invalid_header(
                    &sheet.name,
                    sheet.rows.len(),
                    DESCRIPTOR_ROW + 1,
                ))
            };
            SheetSchema {
                sheet: sheet.name.clone(),
                schema,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::SheetReport;
    use pretty_assertions::assert_eq;

    fn sheet(name: &str, data: &[&[&str]]) -> SheetData {
        SheetData {
            name: name.to_string(),
            rows: data
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }

    #[test]
    fn test_resolve_config_overrides() {
        let options = ConvertOptions {
            input: PathBuf::from("data/config.xlsx"),
            output: Some(PathBuf::from("build")),
            audience: Some(AudienceFilter::Server),
            trailing_columns: Some(0),
            ..ConvertOptions::default()
        };
        let config = options.resolve_config().unwrap();
        assert_eq!(config.output.dir, PathBuf::from("build"));
        assert_eq!(config.audience, AudienceFilter::Server);
        assert_eq!(config.layout.trailing_columns, 0);
        assert_eq!(options.workbook_name(), "config.xlsx");
    }

    #[test]
    fn test_progress_bar_only_for_interactive_writes() {
        let app = Sheet2LuaApp::new(Sheet2LuaCli::parse_from(["sheet2lua", "convert"]));
        assert!(app.progress_bar(3, false).is_some());
        assert!(app.progress_bar(3, true).is_none());
        assert!(app.progress_bar(0, false).is_none());

        let quiet = Sheet2LuaApp::new(Sheet2LuaCli::parse_from(["sheet2lua", "-q", "convert"]));
        assert!(quiet.progress_bar(3, false).is_none());

        let json = Sheet2LuaApp::new(Sheet2LuaCli::parse_from(["sheet2lua", "-f", "json", "convert"]));
        assert!(json.progress_bar(3, false).is_none());
    }

    #[test]
    fn test_render_schemas_pretty() {
        colored::control::set_override(false);
        let sheets = vec![
            sheet("hero", &[&["id", "icon", "fx"], &["int", "string|client", "shader"]]),
            sheet("empty", &[&["id"]]),
        ];
        let rendered = Sheet2LuaApp::render_schemas_pretty(&sheet_schemas(&sheets)).unwrap();

        assert_eq!(
            rendered,
            "hero\n\
             \x20   0  id    int       none\n\
             \x20   1  icon  string    client\n\
             \x20   2  fx    shader    none  unknown type\n\
             empty\n\
             \x20 Invalid header in sheet 'empty': found 1 rows, at least 2 required"
        );
    }

    #[test]
    fn test_render_schemas_json() {
        let sheets = vec![sheet("hero", &[&["id"], &["int|server"]])];
        let rendered = Sheet2LuaApp::render_schemas_json(&sheet_schemas(&sheets)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value[0]["sheet"], "hero");
        assert_eq!(value[0]["fields"][0]["name"], "id");
        assert_eq!(value[0]["fields"][0]["value_type"], "int");
    }

    #[test]
    fn test_render_run_report() {
        colored::control::set_override(false);
        let report = RunReport {
            sheets: vec![
                SheetReport {
                    sheet: "hero".to_string(),
                    outcome: SheetOutcome::Compiled(OutputRecord::new("hero", "")),
                },
                SheetReport {
                    sheet: "notes".to_string(),
                    outcome: SheetOutcome::Skipped(Sheet2LuaError::invalid_header("notes", 1, 3)),
                },
            ],
        };
        let destinations = vec!["output/hero.lua".to_string()];

        let pretty = Sheet2LuaApp::render_run_pretty(
            Path::new("config.xlsx"),
            AudienceFilter::Client,
            &report,
            &destinations,
        )
        .unwrap();
        assert!(pretty.starts_with("config.xlsx (client build)\n  ok hero\n  skip notes: "));
        assert!(pretty.ends_with("1 compiled, 1 skipped, 0 failed, 1 written"));

        let json = Sheet2LuaApp::render_run_json(
            Path::new("config.xlsx"),
            AudienceFilter::Client,
            &report,
            &destinations,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["audience"], "client");
        assert_eq!(value["outputs"][0], "output/hero.lua");
        assert_eq!(value["sheets"][1]["error_kind"], "InvalidHeader");
    }
}
