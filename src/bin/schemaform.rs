use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "schemaform", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a form schema.
    Validate(ValidateArgs),
    /// Print the view tree of a freshly mounted form.
    Render(RenderArgs),
    /// Apply a list of events and print every notification as a JSON line.
    Replay(ReplayArgs),
    /// List the selectable color scales.
    Scales,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Form schema JSON.
    #[arg(long)]
    schema: PathBuf,
}

#[derive(Parser, Debug)]
struct FormArgs {
    /// Form schema JSON.
    #[arg(long)]
    schema: PathBuf,

    /// Initial values JSON (empty form when omitted).
    #[arg(long)]
    values: Option<PathBuf>,

    /// Hide the `Add` action on entries.
    #[arg(long)]
    no_add: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    form: FormArgs,

    /// Expand every entry before rendering.
    #[arg(long)]
    expand: bool,

    /// Print HTML instead of the JSON view tree.
    #[arg(long)]
    html: bool,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    #[command(flatten)]
    form: FormArgs,

    /// JSON array of form events.
    #[arg(long)]
    events: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Render(args) => cmd_render(args),
        Command::Replay(args) => cmd_replay(args),
        Command::Scales => cmd_scales(),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn mount<O: schemaform::FormObserver>(
    args: &FormArgs,
    observer: O,
) -> anyhow::Result<schemaform::Form<O>> {
    let schema: schemaform::FormSchema = read_json(&args.schema, "schema")?;
    let values = match &args.values {
        Some(path) => read_json(path, "values")?,
        None => schemaform::FormValues::new(),
    };
    let options = schemaform::FormOptions {
        allow_add_forms: !args.no_add,
    };
    Ok(schemaform::Form::new(schema, values, options, observer)?)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let schema: schemaform::FormSchema = read_json(&args.schema, "schema")?;
    if let Err(errs) = schema.validate() {
        for e in &errs.errors {
            eprintln!("{e}");
        }
        anyhow::bail!("schema has {} error(s)", errs.errors.len());
    }

    let group = schema.dynamic_group().map(|g| g.fields.len()).unwrap_or(0);
    println!(
        "ok: {} static field(s), {} nested field(s)",
        schema.static_fields().count(),
        group
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut form = mount(&args.form, ())?;
    if args.expand {
        for index in 0..form.values().entries().len() {
            form.dispatch(schemaform::FormEvent::ToggleEntry { index })?;
        }
    }

    let view = form.render();
    if args.html {
        print!("{}", schemaform::to_html(&view));
    } else {
        let json = serde_json::to_string_pretty(&view).context("serialize view")?;
        println!("{json}");
    }
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let events: Vec<schemaform::FormEvent> = read_json(&args.events, "events")?;
    let mut form = mount(&args.form, schemaform::RecordingObserver::new())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (i, event) in events.into_iter().enumerate() {
        form.dispatch(event)
            .with_context(|| format!("apply event #{i}"))?;
        for n in form.observer_mut().drain() {
            let line = serde_json::to_string(&n).context("serialize notification")?;
            writeln!(out, "{line}").context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_scales() -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for entry in schemaform::scales::whitelist() {
        let chip = schemaform::scales::chip_color(entry.name);
        let strip = schemaform::scales::preview_strip(entry.name)
            .map(|s| {
                s.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        writeln!(out, "{:>2} {:<18} {chip} {strip}", entry.id, entry.name)
            .context("write stdout")?;
    }
    Ok(())
}
