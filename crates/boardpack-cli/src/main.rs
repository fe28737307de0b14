use boardpack::render::{LayoutWarning, plan_document};
use boardpack::{
    DiagramRequirement, DocumentRequest, FormFields, GenerateError, PacketConfig,
    PacketGenerator, SectionSpec,
};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BOARDPACK_LOG";
const ASSETS_ENV: &str = "BOARDPACK_ASSETS";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Field(String),
    Io(std::io::Error),
    Generate(GenerateError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Field(raw) => write!(f, "Expected --field key=value, got {raw:?}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Generate(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<GenerateError> for CliError {
    fn from(value: GenerateError) -> Self {
        Self::Generate(value)
    }
}

impl From<boardpack::Error> for CliError {
    fn from(value: boardpack::Error) -> Self {
        Self::Generate(GenerateError::Form(value))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Generate,
    Resolve,
    Plan,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    fields: Vec<(String, String)>,
    config: Option<PathBuf>,
    assets: Option<PathBuf>,
    out: Option<PathBuf>,
    pretty: bool,
}

#[derive(Serialize)]
struct SectionOut<'a> {
    section: &'a SectionSpec,
    diagrams: &'a [DiagramRequirement],
}

#[derive(Serialize)]
struct GenerateOut<'a> {
    path: &'a Path,
    pages: usize,
    warnings: &'a [LayoutWarning],
}

fn usage() -> &'static str {
    "boardpack-cli\n\
\n\
USAGE:\n\
  boardpack-cli [generate] [--config <path>] [--assets <dir>] [--out <dir|file.pdf>] [--field <key=value>]... [<form.json>|-]\n\
  boardpack-cli resolve [--config <path>] [--pretty] [--field <key=value>]... [<form.json>|-]\n\
  boardpack-cli plan [--config <path>] [--assets <dir>] [--pretty] [--field <key=value>]... [<form.json>|-]\n\
\n\
NOTES:\n\
  - The form is a JSON object of field names to values (num_sections, section_type_1, ...).\n\
  - If <form.json> is omitted or '-', it is read from stdin unless only --field values are given.\n\
  - --field entries are applied on top of the form and may be repeated.\n\
  - generate writes the PDF into --out (default: current directory) and prints a JSON summary.\n\
  - Diagram images are read from --assets, then $BOARDPACK_ASSETS, then the config file.\n\
  - Log verbosity follows $BOARDPACK_LOG (default: warn).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "generate" => args.command = Command::Generate,
            "resolve" => args.command = Command::Resolve,
            "plan" => args.command = Command::Plan,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(PathBuf::from(path));
            }
            "--assets" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.assets = Some(PathBuf::from(dir));
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(PathBuf::from(out));
            }
            "--field" => {
                let Some(raw) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let Some((key, value)) = raw.split_once('=') else {
                    return Err(CliError::Field(raw.clone()));
                };
                if key.trim().is_empty() {
                    return Err(CliError::Field(raw.clone()));
                }
                args.fields.push((key.trim().to_string(), value.to_string()));
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            other => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_form(args: &Args) -> Result<FormFields, CliError> {
    let text = match args.input.as_deref() {
        None if !args.fields.is_empty() => None,
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Some(buf)
        }
        Some(path) => Some(std::fs::read_to_string(path)?),
    };

    let mut fields = match text {
        Some(text) if !text.trim().is_empty() => {
            let value: serde_json::Value = serde_json::from_str(&text)?;
            FormFields::from_json(&value)?
        }
        _ => FormFields::new(),
    };
    for (key, value) in &args.fields {
        fields.insert(key.clone(), value.clone());
    }
    Ok(fields)
}

fn load_config(args: &Args) -> Result<PacketConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => PacketConfig::load(path)?,
        None => PacketConfig::default(),
    };
    if let Some(dir) = &args.assets {
        config.assets_dir = dir.clone();
    } else if let Some(dir) = std::env::var_os(ASSETS_ENV) {
        config.assets_dir = PathBuf::from(dir);
    }
    Ok(config)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let fields = read_form(&args)?;
    let generator = PacketGenerator::new(load_config(&args)?);
    tracing::debug!(
        fields = fields.len(),
        assets = %generator.config.assets_dir.display(),
        "form loaded"
    );

    match args.command {
        Command::Resolve => {
            let sections = generator.resolve(&fields)?;
            let out: Vec<SectionOut<'_>> = sections
                .iter()
                .map(|(section, diagrams)| SectionOut { section, diagrams })
                .collect();
            write_json(&out, args.pretty)
        }
        Command::Plan => {
            let request = DocumentRequest::from_form(&fields)?;
            let plan = plan_document(
                &request,
                &generator.catalog(),
                &generator.config.resolve,
                &generator.config.layout,
            );
            write_json(&plan, args.pretty)
        }
        Command::Generate => {
            let packet = generator.generate(&fields)?;
            let path = match &args.out {
                Some(out) if out.extension().is_some_and(|ext| ext == "pdf") => {
                    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &packet.bytes)?;
                    out.clone()
                }
                Some(dir) => {
                    std::fs::create_dir_all(dir)?;
                    packet.write_to(dir)?
                }
                None => packet.write_to(Path::new("."))?,
            };
            write_json(
                &GenerateOut {
                    path: &path,
                    pages: packet.pages,
                    warnings: &packet.warnings,
                },
                args.pretty,
            )
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
