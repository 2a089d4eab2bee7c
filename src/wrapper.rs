//! Adapters that present a record to the XML reader and writer.
//!
//! A wrapper borrows one record for the duration of a single write. Reading
//! produces an owned record, so it is an associated function instead.

use quick_xml::writer::Writer;
use quick_xml::Reader;

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::problem::{ProblemDetails, ValidationProblemDetails};
use crate::xml_input::{read_document, read_validation_errors};
use crate::xml_output::{
    write_document, write_validation_errors, TAG_ERRORS, TAG_PROBLEM_DETAILS,
    TAG_VALIDATION_PROBLEM_DETAILS,
};

/// A record that can be written as and read from a problem details document.
pub trait ProblemRecord: Default {
    /// Name of the document's root element.
    const ROOT: &'static str;

    fn problem(&self) -> &ProblemDetails;

    fn problem_mut(&mut self) -> &mut ProblemDetails;

    /// Writes elements that follow the extension members.
    fn write_trailer<W: Write>(&self, _writer: &mut Writer<W>) -> Result<()> {
        Ok(())
    }

    /// Offers a child of the root element to the record before the fixed
    /// fields and extension members are considered. Returns true if the
    /// element was consumed.
    fn read_member(&mut self, _reader: &mut Reader<&[u8]>, _name: &str, _empty: bool) -> Result<bool> {
        Ok(false)
    }
}

impl ProblemRecord for ProblemDetails {
    const ROOT: &'static str = TAG_PROBLEM_DETAILS;

    fn problem(&self) -> &ProblemDetails {
        self
    }

    fn problem_mut(&mut self) -> &mut ProblemDetails {
        self
    }
}

impl ProblemRecord for ValidationProblemDetails {
    const ROOT: &'static str = TAG_VALIDATION_PROBLEM_DETAILS;

    fn problem(&self) -> &ProblemDetails {
        &self.problem
    }

    fn problem_mut(&mut self) -> &mut ProblemDetails {
        &mut self.problem
    }

    fn write_trailer<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        write_validation_errors(writer, &self.errors)
    }

    fn read_member(&mut self, reader: &mut Reader<&[u8]>, name: &str, empty: bool) -> Result<bool> {
        if name != TAG_ERRORS {
            return Ok(false);
        }
        if !empty {
            read_validation_errors(reader, &mut self.errors)?;
        }
        Ok(true)
    }
}

fn render<T: ProblemRecord>(record: &T, indent: Option<usize>) -> Result<String> {
    let mut buffer = Vec::new();
    write_document(record, &mut buffer, indent)?;
    String::from_utf8(buffer).map_err(|e| Error::Utf8(e.utf8_error()))
}

/// Writes and reads [`ProblemDetails`] under the `ProblemDetails` root.
#[derive(Debug, Clone, Copy)]
pub struct ProblemDetailsWrapper<'a> {
    problem: &'a ProblemDetails,
}

impl<'a> ProblemDetailsWrapper<'a> {
    pub fn new(problem: &'a ProblemDetails) -> Self {
        ProblemDetailsWrapper { problem }
    }

    pub fn problem_details(&self) -> &'a ProblemDetails {
        self.problem
    }

    pub fn write_xml<W: Write>(&self, output: W) -> Result<()> {
        write_document(self.problem, output, None)
    }

    pub fn to_xml_string(&self) -> Result<String> {
        render(self.problem, None)
    }

    pub fn read_xml<R: Read>(input: R) -> Result<ProblemDetails> {
        read_document(input)
    }
}

/// Writes and reads [`ValidationProblemDetails`] under the `ValidationProblemDetails` root.
#[derive(Debug, Clone, Copy)]
pub struct ValidationProblemDetailsWrapper<'a> {
    details: &'a ValidationProblemDetails,
}

impl<'a> ValidationProblemDetailsWrapper<'a> {
    pub fn new(details: &'a ValidationProblemDetails) -> Self {
        ValidationProblemDetailsWrapper { details }
    }

    pub fn validation_problem_details(&self) -> &'a ValidationProblemDetails {
        self.details
    }

    pub fn write_xml<W: Write>(&self, output: W) -> Result<()> {
        write_document(self.details, output, None)
    }

    pub fn write_xml_indented<W: Write>(&self, output: W, indent: usize) -> Result<()> {
        write_document(self.details, output, Some(indent))
    }

    pub fn to_xml_string(&self) -> Result<String> {
        render(self.details, None)
    }

    pub fn read_xml<R: Read>(input: R) -> Result<ValidationProblemDetails> {
        read_document(input)
    }
}
