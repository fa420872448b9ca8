//! Command-line front end for Qt `.ts` catalogs.

use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use ts_catalog::config::{
    CatalogSettings,
    ConfigError,
    ConfigManager,
};
use ts_catalog::hypothesis::{
    DialogLabels,
    HypothesisType,
};
use ts_catalog::indexer::{
    CatalogIndexer,
    IndexerError,
};
use ts_catalog::{
    Catalog,
    CatalogError,
    CatalogSet,
    Locale,
    bundled,
};

#[derive(Parser, Debug)]
#[command(name = "ts-catalog", version, about = "Query and check Qt Linguist translation catalogs")]
struct Cli {
    /// Catalog directory; the embedded NETGEN resources when omitted
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the translation of a key
    Lookup {
        /// Message key (`<source>` text)
        key: String,
        #[arg(short, long)]
        locale: Locale,
        /// Printed instead of the key when no translation exists
        #[arg(long)]
        default: Option<String>,
    },
    /// Report keys of the reference language missing in every other language
    Check {
        #[arg(long, default_value = "en")]
        reference: Locale,
    },
    /// Print the catalogs of a locale and its language as JSON
    Dump {
        #[arg(short, long)]
        locale: Locale,
    },
    /// Print a `.ts` file in canonical layout, without XML comments or
    /// `location`, `extracomment` and `translatorcomment` elements
    Fmt {
        file: PathBuf,
    },
    /// Print the dialog labels of a NETGEN hypothesis type as JSON
    Labels {
        hypothesis: HypothesisType,
        #[arg(short, long)]
        locale: Locale,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Indexer(#[from] IndexerError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid log file path '{}'", .0.display())]
    LogFile(PathBuf),
    #[error("No catalogs loaded for locale '{0}'")]
    NoCatalogs(Locale),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_tracing(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            let _ = writeln!(io::stderr(), "ts-catalog: {e}");
            return ExitCode::from(2);
        }
    };

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            let _ = writeln!(io::stderr(), "ts-catalog: {e}");
            ExitCode::from(2)
        }
    }
}

/// Installs the subscriber; the guard must live until exit when logging to a file.
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>, CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(path) = log_file else {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
        return Ok(None);
    };

    let file_name = path.file_name().ok_or_else(|| CliError::LogFile(path.to_path_buf()))?;
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
    Ok(Some(guard))
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let settings = load_settings(cli.dir.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Lookup { key, locale, default } => {
            let set = load_set(cli.dir.as_deref(), &settings).await?;
            let text = match &default {
                Some(default) => set.lookup_or(&locale, &key, default),
                None => set.lookup(&locale, &key),
            };
            writeln!(stdout, "{text}")?;
        }
        Command::Check { reference } => {
            let set = load_set(cli.dir.as_deref(), &settings).await?;
            let complete = check(&set, &reference, &mut stdout)?;
            return Ok(if complete { ExitCode::SUCCESS } else { ExitCode::FAILURE });
        }
        Command::Dump { locale } => {
            let set = load_set(cli.dir.as_deref(), &settings).await?;
            dump(&set, &locale, &mut stdout)?;
        }
        Command::Fmt { file } => {
            let catalog = Catalog::from_file(&file, settings.duplicate_keys)?;
            catalog.write_ts(&mut stdout)?;
        }
        Command::Labels { hypothesis, locale } => {
            let set = load_set(cli.dir.as_deref(), &settings).await?;
            let labels = DialogLabels::resolve(&set, &locale, hypothesis);
            serde_json::to_writer_pretty(&mut stdout, &labels)?;
            writeln!(stdout)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_settings(dir: Option<&Path>) -> Result<CatalogSettings, CliError> {
    let mut manager = ConfigManager::new();
    manager.load_settings(dir.map(Path::to_path_buf))?;
    Ok(manager.get_settings().clone())
}

async fn load_set(dir: Option<&Path>, settings: &CatalogSettings) -> Result<CatalogSet, CliError> {
    match dir {
        Some(dir) => Ok(CatalogIndexer::new(settings.clone()).load_dir(dir).await?),
        None => Ok(bundled::catalog_set()?),
    }
}

/// Prints missing keys per locale; `Ok(false)` when any locale misses a key.
///
/// Locales sharing the reference's language are not checked against it.
fn check(set: &CatalogSet, reference: &Locale, out: &mut impl Write) -> Result<bool, CliError> {
    if set.family_catalogs(reference).is_empty() {
        return Err(CliError::NoCatalogs(reference.clone()));
    }

    let mut complete = true;
    for locale in set.locales().into_iter().filter(|locale| locale.language() != reference.language()) {
        let missing = set.missing_keys(reference, locale);
        if missing.is_empty() {
            writeln!(out, "{locale}: complete")?;
            continue;
        }
        complete = false;
        writeln!(out, "{locale}: {} missing", missing.len())?;
        for key in missing {
            writeln!(out, "    {key}")?;
        }
    }

    Ok(complete)
}

/// Writes the catalogs of `locale` and its language family as JSON.
fn dump(set: &CatalogSet, locale: &Locale, out: &mut impl Write) -> Result<(), CliError> {
    let catalogs = set.family_catalogs(locale);
    if catalogs.is_empty() {
        return Err(CliError::NoCatalogs(locale.clone()));
    }
    serde_json::to_writer_pretty(&mut *out, &catalogs)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn run_check(reference: &str) -> (Result<bool, CliError>, String) {
        let set = bundled::catalog_set().unwrap();
        let mut out = Vec::new();
        let result = check(&set, &locale(reference), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[rstest]
    #[case("fr")]
    #[case("fr_FR")]
    fn test_check_expands_reference_language(#[case] reference: &str) {
        let (result, output) = run_check(reference);

        assert!(!result.unwrap());
        assert!(output.contains("en: 39 missing\n"), "{output}");
        assert!(output.contains("    LSZ_ENTRY_COLUMN\n"), "{output}");
        assert!(!output.contains("fr_FR:"), "{output}");
    }

    #[googletest::test]
    fn test_check_same_output_for_language_and_region() {
        let (_, language) = run_check("fr");
        let (_, region) = run_check("fr_FR");

        assert_eq!(language, region);
    }

    #[googletest::test]
    fn test_check_unknown_reference_is_an_error() {
        let (result, output) = run_check("xx");

        assert!(matches!(result, Err(CliError::NoCatalogs(ref l)) if *l == locale("xx")));
        expect_that!(output, eq(""));
    }

    #[googletest::test]
    fn test_dump_selects_language_family() {
        let set = bundled::catalog_set().unwrap();
        let mut out = Vec::new();

        dump(&set, &locale("fr"), &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        expect_that!(json.as_array().map(Vec::len), some(eq(1)));
        expect_that!(String::from_utf8(out).unwrap(), contains_substring("\"fr_FR\""));
    }

    #[googletest::test]
    fn test_dump_unknown_locale_is_an_error() {
        let set = bundled::catalog_set().unwrap();
        let mut out = Vec::new();

        let result = dump(&set, &locale("xx"), &mut out);

        assert!(matches!(result, Err(CliError::NoCatalogs(_))));
        expect_that!(out, is_empty());
    }

    #[googletest::test]
    fn test_fmt_help_names_dropped_markup() {
        let command = Cli::command();
        let about = command.find_subcommand("fmt").unwrap().get_about().unwrap().to_string();

        expect_that!(about, contains_substring("comments"));
        expect_that!(about, contains_substring("location"));
    }
}
