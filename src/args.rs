use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

/// Builds the command-line interface.
pub fn build_cli() -> Command {
    let bold_underline = "\x1b[1;4m";
    let bold = "\x1b[1m";
    let reset = "\x1b[0m";

    Command::new("problem-xml")
        .version(clap::crate_version!())
        .about(format!(
            "\n\n{}Program:{} {}problem-xml{} (problem details XML tool)\n\
            Version: {}",
            bold_underline,
            reset,
            bold,
            reset,
            clap::crate_version!()
        ))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("escape")
                .about("Encode keys as XML element names")
                .arg(
                    Arg::new("keys")
                        .help("Keys to encode")
                        .num_args(1..)
                        .allow_hyphen_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("unescape")
                .about("Decode XML element names back to keys")
                .arg(
                    Arg::new("names")
                        .help("Element names to decode")
                        .num_args(1..)
                        .allow_hyphen_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("normalize")
                .about("Parse a problem details document and write it back in canonical form")
                .arg(
                    Arg::new("input")
                        .help("Input document; reads stdin when omitted or '-'")
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write to FILE instead of stdout")
                        .num_args(1),
                )
                .arg(
                    Arg::new("kind")
                        .short('k')
                        .long("kind")
                        .help("Document kind; auto picks it from the root element")
                        .value_parser(["auto", "problem", "validation"])
                        .default_value("auto"),
                )
                .arg(
                    Arg::new("indent")
                        .long("indent")
                        .value_name("N")
                        .help("Indent nested elements by N spaces")
                        .value_parser(value_parser!(usize))
                        .num_args(1),
                )
                .arg(
                    Arg::new("force")
                        .short('f')
                        .long("force")
                        .help("Overwrite the output file if it exists [false]")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Parses command-line arguments using clap.
pub fn parse_args() -> ArgMatches {
    build_cli().get_matches()
}
