// External crates
use clap::ArgMatches;
use log::{debug, info};

// Standard library imports
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::options::{DocumentKind, NormalizeOptions};
use crate::problem::{ProblemDetails, ValidationProblemDetails};
use crate::xml::{decode_local_name, encode_local_name};
use crate::xml_input::{parse_document, root_name};
use crate::xml_output::{write_document, TAG_VALIDATION_PROBLEM_DETAILS};

/// Runs the subcommand selected on the command line.
pub fn run(matches: ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("escape", sub)) => print_lines(sub, "keys", |key| encode_local_name(key).into_owned()),
        Some(("unescape", sub)) => {
            print_lines(sub, "names", |name| decode_local_name(name).into_owned())
        }
        Some(("normalize", sub)) => normalize(&NormalizeOptions::from_matches(sub)),
        _ => Ok(()),
    }
}

fn print_lines<F>(matches: &ArgMatches, id: &str, convert: F) -> Result<()>
where
    F: Fn(&str) -> String,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for value in matches.get_many::<String>(id).into_iter().flatten() {
        writeln!(out, "{}", convert(value))?;
    }
    out.flush()?;
    Ok(())
}

/// Reads a document and writes it back in canonical element order.
pub fn normalize(options: &NormalizeOptions) -> Result<()> {
    let bytes = read_input(options.input.as_deref())?;

    let kind = match options.kind {
        DocumentKind::Auto => {
            let root = root_name(&bytes)?;
            debug!("Detected root element <{}>", root);
            DocumentKind::from_root(&root).ok_or(Error::UnexpectedRoot {
                expected: TAG_VALIDATION_PROBLEM_DETAILS,
                found: root,
            })?
        }
        kind => kind,
    };

    // Parse before touching the output so a bad document never clobbers a file
    match kind {
        DocumentKind::Problem => {
            let problem: ProblemDetails = parse_document(&bytes)?;
            write_document(&problem, create_output(options)?, options.indent)
        }
        _ => {
            let details: ValidationProblemDetails = parse_document(&bytes)?;
            write_document(&details, create_output(options)?, options.indent)
        }
    }
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            info!("Reading {}", path);
            Ok(fs::read(path)?)
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

fn create_output(options: &NormalizeOptions) -> Result<Box<dyn Write>> {
    match options.output_filename.as_deref() {
        Some(file) => {
            if Path::new(file).exists() && !options.force_overwrite {
                return Err(Error::OutputExists(file.to_string()));
            }
            info!("Writing {}", file);
            Ok(Box::new(io::BufWriter::new(fs::File::create(file)?)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
