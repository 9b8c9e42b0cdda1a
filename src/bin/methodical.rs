//! Normalize an interface declaration and optionally check a method list
//! against it.
//!
//! Reads a declaration (JSON) from a file or stdin. Without `--implements` the
//! canonical descriptor is printed as compact JSON. With `--implements` the
//! listed methods are treated as an object's callable members and checked for
//! conformance; a failing check prints the full list of missing methods and
//! exits 1.

use anyhow::{Context, Result, bail};
use methodical::{
    Methodical, load_declaration_from_path, object_implementing, parse_declaration,
    resolve_interface_name, split_list,
};
use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let declaration = args.source.load()?;

    let mut descriptor = Methodical::new(declaration);
    if let Some(name) = resolve_interface_name(args.name) {
        descriptor.set_name(name);
    }

    match args.implements {
        None => {
            println!("{}", serde_json::to_string(descriptor.interface())?);
        }
        Some(methods) => {
            let object = object_implementing(methods);
            descriptor.check(&object)?;
            println!("ok");
        }
    }
    Ok(())
}

struct CliArgs {
    source: InputSource,
    name: Option<String>,
    implements: Option<Vec<String>>,
}

enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn load(&self) -> Result<methodical::Declaration> {
        match self {
            InputSource::File(path) => {
                if !path.is_file() {
                    bail!("declaration file not found: {}", path.display());
                }
                load_declaration_from_path(path)
            }
            InputSource::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading stdin")?;
                parse_declaration(&buf)
            }
        }
    }
}

impl CliArgs {
    fn parse() -> Result<Self> {
        Self::parse_from(env::args_os().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = std::ffi::OsString>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut source: Option<InputSource> = None;
        let mut name: Option<String> = None;
        let mut implements: Option<Vec<String>> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--file" => {
                    let path = next_value(&mut args, "--file")?;
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(InputSource::File(PathBuf::from(path)));
                }
                "--stdin" => {
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(InputSource::Stdin);
                }
                "--name" => {
                    name = Some(next_value(&mut args, "--name")?);
                }
                "--implements" => {
                    let raw = next_value(&mut args, "--implements")?;
                    implements
                        .get_or_insert_with(Vec::new)
                        .extend(split_list(&raw));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs {
            source: source.unwrap_or(InputSource::Stdin),
            name,
            implements,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: methodical [--file PATH|--stdin] [--name NAME] [--implements LIST]\n\
Reads an interface declaration (JSON list or {\"required\", \"optional\"} mapping) and prints its canonical form.\n\
With --implements, checks the comma/space separated method list against the interface instead.\n\
NAME defaults to $METHODICAL_INTERFACE_NAME when set.\n"
}

fn print_usage() {
    print!("{}", usage());
}
