use std::{
    io::Read,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use flexi_logger::{Logger, LoggerHandle};

use mathbox::{
    Atom, MarkupError, MathDisplay, Renderer, SerializeOptions, from_json_str, serialize_list,
    to_json_string,
};

mod config_file;

use config_file::{Config, load_config_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// An indented dump of the box tree
    Box,
    /// The box tree as JSON
    Json,
    /// The atoms written back as LaTeX
    Latex,
    /// A JSON snapshot of the atoms
    Snapshot,
}

/// Lays out LaTeX formulas as TeX boxes
#[derive(Parser, Debug)]
#[command(version, about = "Lays out LaTeX formulas as TeX boxes", long_about = None)]
struct Args {
    /// The formula; read from stdin if not given
    formula: Option<String>,

    /// Read the input as a JSON snapshot of atoms instead of LaTeX
    #[arg(long)]
    from_snapshot: bool,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Format::Box)]
    format: Format,

    /// Sets the display style for the formula to "inline"
    #[arg(short, long, group = "mode")]
    inline: bool,

    /// Sets the display style for the formula to "block"
    #[arg(short, long, group = "mode")]
    block: bool,

    /// Leave out colors and sizes when printing LaTeX
    #[arg(long)]
    skip_styles: bool,

    /// A TOML file with renderer settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more; repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    let _logger = init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => {
            load_config_file(path).unwrap_or_else(|e| exit_config_error(e, Some(path.as_path())))
        }
        None => Config::default(),
    };
    let display = if args.block || (config.block && !args.inline) {
        MathDisplay::Block
    } else {
        MathDisplay::Inline
    };
    let renderer = Renderer::new(config.mathbox)
        .unwrap_or_else(|e| exit_config_error(e, args.config.as_deref()));

    let input = match args.formula {
        Some(ref formula) => formula.clone(),
        None => read_stdin(),
    };
    let atoms = if args.from_snapshot {
        from_json_str(&input).unwrap_or_else(|e| exit_snapshot_error(e))
    } else {
        renderer
            .parse(&input)
            .unwrap_or_else(|e| exit_markup_error(&e, &input))
    };
    print_output(&args, &renderer, &atoms, display);
}

fn init_logging(verbose: u8) -> Option<LoggerHandle> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    match Logger::try_with_env_or_str(level).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Could not start logging: {e}");
            None
        }
    }
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        exit_io_error(e);
    }
    buffer
}

fn print_output(args: &Args, renderer: &Renderer, atoms: &[Atom], display: MathDisplay) {
    match args.format {
        Format::Latex => {
            let options = SerializeOptions {
                skip_styles: args.skip_styles,
            };
            println!("{}", serialize_list(atoms, options));
        }
        Format::Snapshot => match to_json_string(atoms) {
            Ok(json) => println!("{json}"),
            Err(e) => exit_snapshot_error(e),
        },
        Format::Box | Format::Json => {
            let Some(b) = renderer.render_atoms(atoms, display) else {
                log::warn!("the formula renders to nothing");
                return;
            };
            if args.format == Format::Box {
                println!("{}", b.dump().trim_start());
            } else {
                match serde_json::to_string_pretty(&b) {
                    Ok(json) => println!("{json}"),
                    Err(e) => exit_snapshot_error(e),
                }
            }
        }
    }
}

fn exit_markup_error(e: &MarkupError, input: &str) -> ! {
    let report = e.to_report("<input>", true);
    if report
        .eprint(("<input>", ariadne::Source::from(input)))
        .is_err()
    {
        eprintln!("Markup error at {e}");
    }
    std::process::exit(2);
}

fn exit_snapshot_error<E: std::error::Error>(e: E) -> ! {
    eprintln!("Snapshot error: {e}");
    std::process::exit(2);
}

fn exit_config_error<E: std::error::Error>(e: E, fp: Option<&Path>) -> ! {
    eprint!("Configuration error");
    if let Some(fp) = fp {
        eprint!(" in '{}'", fp.display());
    }
    eprintln!(": {e}");
    std::process::exit(1);
}

fn exit_io_error(e: std::io::Error) -> ! {
    eprintln!("IO Error: {e}");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let args =
            Args::try_parse_from(["mathbox", "-b", "--format", "latex", r"\sum_k"]).unwrap();
        assert!(args.block);
        assert_eq!(args.format, Format::Latex);
        assert_eq!(args.formula.as_deref(), Some(r"\sum_k"));

        let args = Args::try_parse_from(["mathbox", "-vv", "x"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.format, Format::Box);

        assert!(Args::try_parse_from(["mathbox", "-i", "-b", "x"]).is_err());
    }
}
