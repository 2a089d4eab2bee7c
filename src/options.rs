use clap::ArgMatches;

use crate::xml_output::{TAG_PROBLEM_DETAILS, TAG_VALIDATION_PROBLEM_DETAILS};

/// Which record type a document is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Auto,
    Problem,
    Validation,
}

impl DocumentKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(DocumentKind::Auto),
            "problem" => Some(DocumentKind::Problem),
            "validation" => Some(DocumentKind::Validation),
            _ => None,
        }
    }

    /// Picks the kind whose root element is `root`.
    pub fn from_root(root: &str) -> Option<Self> {
        match root {
            TAG_PROBLEM_DETAILS => Some(DocumentKind::Problem),
            TAG_VALIDATION_PROBLEM_DETAILS => Some(DocumentKind::Validation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub input: Option<String>,
    pub output_filename: Option<String>,
    pub kind: DocumentKind,
    pub indent: Option<usize>,
    pub force_overwrite: bool,
}

impl NormalizeOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        // "-" is the conventional name for stdin
        let input = matches
            .get_one::<String>("input")
            .filter(|path| path.as_str() != "-")
            .cloned();
        let kind = matches
            .get_one::<String>("kind")
            .and_then(|name| DocumentKind::from_name(name))
            .unwrap_or(DocumentKind::Auto);

        NormalizeOptions {
            input,
            output_filename: matches.get_one::<String>("output").cloned(),
            kind,
            indent: matches.get_one::<usize>("indent").copied(),
            force_overwrite: matches.get_flag("force"),
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            input: None,
            output_filename: None,
            kind: DocumentKind::Auto,
            indent: None,
            force_overwrite: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::build_cli;

    fn normalize_matches(args: &[&str]) -> NormalizeOptions {
        let mut argv = vec!["problem-xml", "normalize"];
        argv.extend_from_slice(args);
        let matches = build_cli().try_get_matches_from(argv).unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "normalize");
        NormalizeOptions::from_matches(sub)
    }

    #[test]
    fn test_options_from_matches_default() {
        let options = normalize_matches(&[]);
        assert_eq!(options, NormalizeOptions::default());
    }

    #[test]
    fn test_options_from_matches_all_flags() {
        let options = normalize_matches(&[
            "in.xml",
            "--output",
            "out.xml",
            "--kind",
            "validation",
            "--indent",
            "4",
            "--force",
        ]);

        assert_eq!(options.input.as_deref(), Some("in.xml"));
        assert_eq!(options.output_filename.as_deref(), Some("out.xml"));
        assert_eq!(options.kind, DocumentKind::Validation);
        assert_eq!(options.indent, Some(4));
        assert!(options.force_overwrite);
    }

    #[test]
    fn test_dash_input_means_stdin() {
        let options = normalize_matches(&["-"]);
        assert_eq!(options.input, None);
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let result =
            build_cli().try_get_matches_from(vec!["problem-xml", "normalize", "--kind", "json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_kind_from_root() {
        assert_eq!(
            DocumentKind::from_root("ProblemDetails"),
            Some(DocumentKind::Problem)
        );
        assert_eq!(
            DocumentKind::from_root("ValidationProblemDetails"),
            Some(DocumentKind::Validation)
        );
        assert_eq!(DocumentKind::from_root("Other"), None);
    }
}
