use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use homage::{
    DirectoryIcons, FileSource, HomageConfig, Icon, Library, LibraryCatalog, LibraryRecord,
    LicenseCatalog, ManifestSource,
};
use serde::Serialize;
use walkdir::WalkDir;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => HomageConfig::load(path)?,
        None => HomageConfig::default(),
    };
    match cli.command {
        Command::List(args) => cmd_list(args, &config, cli.format),
        Command::Licenses(args) => cmd_licenses(args, &config, cli.format),
        Command::Check(args) => cmd_check(args, cli.format),
    }
}

fn license_catalog(config: &HomageConfig) -> anyhow::Result<Arc<LicenseCatalog>> {
    let licenses = LicenseCatalog::with_default_strings()?;
    config
        .apply_licenses(&licenses)
        .context("invalid custom license in config")?;
    Ok(Arc::new(licenses))
}

/// Every `*.json` file under `dir`, in file name order.
pub(crate) fn discover_manifests(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let is_json = entry
            .path()
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if entry.file_type().is_file() && is_json {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

fn cmd_list(args: ListArgs, config: &HomageConfig, format: OutputFormat) -> anyhow::Result<()> {
    let licenses = Arc::new(LicenseCatalog::with_default_strings()?);
    let mut builder = LibraryCatalog::builder(licenses).config(config);
    for path in &args.manifests {
        builder = builder.source(FileSource::new(path));
    }
    if let Some(dir) = &args.dir {
        for path in discover_manifests(dir)? {
            builder = builder.source(FileSource::new(path));
        }
    }
    if let Some(icons) = &args.icons {
        builder = builder.icons(DirectoryIcons::new(icons));
    }
    let catalog = builder
        .build()
        .context("no manifests given; pass files, --dir, or list them in the config")?;

    let report = catalog.refresh()?;
    let libraries = catalog.libraries()?;

    match format {
        OutputFormat::Json => {
            let views = library_views(&libraries, args.full)?;
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Text => {
            print!("{}", render_list(&libraries, args.full)?);
        }
    }
    if report.sources_skipped > 0 {
        eprintln!(
            "{} {} manifest(s) could not be read (run with --verbose for details)",
            "warning:".yellow().bold(),
            report.sources_skipped
        );
    }
    Ok(())
}

fn render_list(libraries: &[Library], full: bool) -> anyhow::Result<String> {
    if libraries.is_empty() {
        return Ok("No libraries found.\n".to_string());
    }
    libraries
        .iter()
        .map(|library| render_library(library, full))
        .collect()
}

/// The license label shown next to a library's title.
fn license_label(library: &Library) -> anyhow::Result<String> {
    let name = library.license_name()?;
    let label = match library.license_code().filter(|code| !code.is_empty()) {
        None => "no license".dimmed().to_string(),
        Some(code) if name.is_empty() => format!("unrecognised license: {code}")
            .yellow()
            .to_string(),
        Some(_) => name.cyan().to_string(),
    };
    Ok(label)
}

fn render_library(library: &Library, full: bool) -> anyhow::Result<String> {
    let mut out = String::new();
    let mut title = library.record().display_name().bold().to_string();
    if let Some(version) = library.version() {
        title.push(' ');
        title.push_str(&version.dimmed().to_string());
    }
    writeln!(out, "{title}  ({})", license_label(library)?)?;

    if let Some(description) = library.description() {
        writeln!(out, "  {description}")?;
    }
    match (library.year(), library.owner()) {
        (Some(year), Some(owner)) => writeln!(out, "  Copyright {year} {owner}")?,
        (None, Some(owner)) => writeln!(out, "  Copyright {owner}")?,
        _ => {}
    }
    if let Some(owner_url) = library.owner_url() {
        writeln!(out, "  Owner: {}", owner_url.blue())?;
    }
    if let Some(url) = library.url() {
        writeln!(out, "  {}", url.blue())?;
    }
    match library.icon() {
        Icon::Url(url) | Icon::Resource(url) => writeln!(out, "  Icon: {url}")?,
        Icon::Placeholder => writeln!(out, "  Icon: {}", "placeholder".dimmed())?,
        Icon::None => {}
    }
    if full {
        for line in library.license_description()?.plain_text().lines() {
            writeln!(out, "    {}", line.dimmed())?;
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct LibraryView<'a> {
    #[serde(flatten)]
    record: &'a LibraryRecord,
    resolved_license: LicenseView<'a>,
    resolved_icon: &'a Icon,
}

#[derive(Serialize)]
struct LicenseView<'a> {
    name: &'a str,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

fn library_views<'a>(
    libraries: &'a [Library],
    full: bool,
) -> anyhow::Result<Vec<LibraryView<'a>>> {
    libraries
        .iter()
        .map(|library| -> anyhow::Result<LibraryView<'a>> {
            let license = library.license()?;
            Ok(LibraryView {
                record: library.record(),
                resolved_license: LicenseView {
                    name: license.name(),
                    url: license.url(),
                    description: full.then(|| license.description().plain_text()),
                },
                resolved_icon: library.icon(),
            })
        })
        .collect()
}

fn cmd_licenses(
    args: LicensesArgs,
    config: &HomageConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let licenses = license_catalog(config)?;
    let entries = licenses.entries()?;
    match format {
        OutputFormat::Json => {
            let views: Vec<_> = entries
                .iter()
                .map(|(key, entry)| {
                    serde_json::json!({
                        "key": key,
                        "name": entry.name(),
                        "url": entry.url(),
                        "description": args.full.then(|| entry.description().to_html()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        OutputFormat::Text => {
            for (key, entry) in &entries {
                println!("{:<14} {}", key.yellow(), entry.name());
                if !entry.url().is_empty() {
                    println!("{:<14} {}", "", entry.url().blue());
                }
                if args.full {
                    for line in entry.description().plain_text().lines() {
                        println!("{:<14} {}", "", line.dimmed());
                    }
                }
            }
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut failures = 0;
    let mut results = Vec::new();
    for path in &args.manifests {
        let source = FileSource::new(path);
        let outcome = source
            .read()
            .map_err(anyhow::Error::from)
            .and_then(|text| homage_manifest::parse(&text).map_err(anyhow::Error::from));
        match &outcome {
            Ok(records) => {
                if matches!(format, OutputFormat::Text) {
                    println!("{} {}: {} libraries", "✓".green(), path.display(), records.len());
                }
            }
            Err(e) => {
                failures += 1;
                if matches!(format, OutputFormat::Text) {
                    println!("{} {}: {e}", "✗".red(), path.display());
                }
            }
        }
        results.push(serde_json::json!({
            "manifest": path.display().to_string(),
            "libraries": outcome.as_ref().ok().map(Vec::len),
            "error": outcome.as_ref().err().map(|e| e.to_string()),
        }));
    }
    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {} manifest(s) failed to parse", args.manifests.len());
    }
    Ok(())
}
