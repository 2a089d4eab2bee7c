// External crates
use log::{debug, warn};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

// Standard library imports
use std::io::Write;

use crate::error::{Error, Result};
use crate::ordered::ValidationErrors;
use crate::problem::ProblemDetails;
use crate::wrapper::ProblemRecord;
use crate::xml::{encode_local_name, is_xml_char};

// Constants for XML output
pub const XML_VERSION: &str = "1.0";
pub const XML_ENCODING: &str = "utf-8";
pub const TAG_PROBLEM_DETAILS: &str = "ProblemDetails";
pub const TAG_VALIDATION_PROBLEM_DETAILS: &str = "ValidationProblemDetails";
pub const TAG_DETAIL: &str = "Detail";
pub const TAG_TITLE: &str = "Title";
pub const TAG_STATUS: &str = "Status";
pub const TAG_INSTANCE: &str = "Instance";
pub const TAG_TYPE: &str = "Type";
pub const TAG_ERRORS: &str = "Errors";

/// Element names with a fixed meaning inside the root element.
pub const RESERVED_TAGS: [&str; 6] = [
    TAG_DETAIL,
    TAG_TITLE,
    TAG_STATUS,
    TAG_INSTANCE,
    TAG_TYPE,
    TAG_ERRORS,
];

/// Writes the XML declaration and opens the root element.
pub fn output_xml_header<W: Write>(writer: &mut Writer<W>, root: &str) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new(
        XML_VERSION,
        Some(XML_ENCODING),
        None,
    )))?;
    writer.write_event(Event::Start(BytesStart::new(root)))?;
    Ok(())
}

/// Writes `<name>text</name>`, or `<name/>` when `text` is empty.
///
/// Fails before writing anything if `text` holds a character XML 1.0 forbids.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyKey);
    }
    if let Some(c) = text.chars().find(|&c| !is_xml_char(c)) {
        return Err(Error::InvalidChar(c));
    }
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_optional<W: Write>(writer: &mut Writer<W>, name: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(text) if !text.is_empty() => write_text_element(writer, name, text),
        _ => Ok(()),
    }
}

/// Writes the fixed fields followed by the extension members.
///
/// An extension whose encoded key equals a fixed element name is still
/// written, but reads back as that fixed field. For `Errors` on a validation
/// record the value is lost on read.
pub fn write_problem_members<W: Write>(
    writer: &mut Writer<W>,
    problem: &ProblemDetails,
) -> Result<()> {
    write_optional(writer, TAG_DETAIL, problem.detail.as_deref())?;
    write_optional(writer, TAG_TITLE, problem.title.as_deref())?;
    if let Some(status) = problem.status {
        write_text_element(writer, TAG_STATUS, &status.to_string())?;
    }
    write_optional(writer, TAG_INSTANCE, problem.instance.as_deref())?;
    write_optional(writer, TAG_TYPE, problem.type_uri.as_deref())?;

    for (key, value) in problem.extensions.iter() {
        let name = encode_local_name(key);
        if RESERVED_TAGS.contains(&name.as_ref()) {
            warn!(
                "Extension member '{}' shares its element name with a fixed field",
                key
            );
        }
        write_text_element(writer, &name, value)?;
    }
    Ok(())
}

/// Writes the `Errors` container. Messages of one field are joined by a single space.
pub fn write_validation_errors<W: Write>(
    writer: &mut Writer<W>,
    errors: &ValidationErrors,
) -> Result<()> {
    if errors.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(TAG_ERRORS)))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new(TAG_ERRORS)))?;
    for (field, messages) in errors.iter() {
        write_text_element(writer, &encode_local_name(field), &messages.join(" "))?;
    }
    writer.write_event(Event::End(BytesEnd::new(TAG_ERRORS)))?;
    Ok(())
}

/// Serializes `record` as a complete document and flushes `output`.
///
/// With `indent` set, each element starts on its own line indented by that many spaces per level.
pub fn write_document<T: ProblemRecord, W: Write>(
    record: &T,
    output: W,
    indent: Option<usize>,
) -> Result<()> {
    let mut writer = match indent {
        Some(width) => Writer::new_with_indent(output, b' ', width),
        None => Writer::new(output),
    };

    output_xml_header(&mut writer, T::ROOT)?;
    write_problem_members(&mut writer, record.problem())?;
    record.write_trailer(&mut writer)?;
    writer.write_event(Event::End(BytesEnd::new(T::ROOT)))?;

    writer.into_inner().flush()?;
    debug!("Wrote <{}> document", T::ROOT);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ValidationProblemDetails;
    use std::io::Cursor;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Writer<&mut Cursor<Vec<u8>>>) -> Result<()>,
    {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = Writer::new(&mut buffer);
        f(&mut writer).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn test_output_xml_header() {
        let output = render(|w| output_xml_header(w, TAG_VALIDATION_PROBLEM_DETAILS));
        assert_eq!(
            output,
            r#"<?xml version="1.0" encoding="utf-8"?><ValidationProblemDetails>"#
        );
    }

    #[test]
    fn test_write_text_element_escapes_content() {
        let output = render(|w| write_text_element(w, "key", "a < b & c"));
        assert_eq!(output, "<key>a &lt; b &amp; c</key>");
    }

    #[test]
    fn test_write_text_element_empty() {
        assert_eq!(render(|w| write_text_element(w, "key", "")), "<key/>");
    }

    #[test]
    fn test_write_text_element_rejects_empty_name() {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = Writer::new(&mut buffer);
        let result = write_text_element(&mut writer, "", "value");
        assert!(matches!(result, Err(Error::EmptyKey)));
        assert!(buffer.into_inner().is_empty());
    }

    #[test]
    fn test_write_text_element_rejects_control_chars() {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = Writer::new(&mut buffer);
        let result = write_text_element(&mut writer, "k", "a\u{1}b");
        assert!(matches!(result, Err(Error::InvalidChar('\u{1}'))));
        assert!(buffer.into_inner().is_empty());

        // Tab and newlines are fine
        assert_eq!(
            render(|w| write_text_element(w, "k", "a\tb\nc")),
            "<k>a\tb\nc</k>"
        );
    }

    #[test]
    fn test_fixed_field_order_and_skipping() {
        let problem = ProblemDetails {
            type_uri: Some("https://example.com/probs/out-of-credit".to_string()),
            title: Some("Some title".to_string()),
            status: Some(403),
            detail: Some(String::new()),
            instance: Some("/account/12345".to_string()),
            ..ProblemDetails::default()
        };
        let output = render(|w| write_problem_members(w, &problem));
        assert_eq!(
            output,
            "<Title>Some title</Title>\
             <Status>403</Status>\
             <Instance>/account/12345</Instance>\
             <Type>https://example.com/probs/out-of-credit</Type>"
        );
    }

    #[test]
    fn test_write_validation_errors_empty() {
        let errors = ValidationErrors::new();
        assert_eq!(render(|w| write_validation_errors(w, &errors)), "<Errors/>");
    }

    #[test]
    fn test_write_validation_errors_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.add_error("error1", "Test error 1");
        errors.add_error("error1", "Test error 2");
        errors.add_error("[error2]", "Test error 3");
        assert_eq!(
            render(|w| write_validation_errors(w, &errors)),
            "<Errors>\
             <error1>Test error 1 Test error 2</error1>\
             <_x005B_error2_x005D_>Test error 3</_x005B_error2_x005D_>\
             </Errors>"
        );
    }

    #[test]
    fn test_write_document_empty_record() {
        let mut output = Vec::new();
        write_document(&ValidationProblemDetails::new(), &mut output, None).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            r#"<?xml version="1.0" encoding="utf-8"?><ValidationProblemDetails><Errors/></ValidationProblemDetails>"#
        );
    }

    #[test]
    fn test_write_document_plain_problem_has_no_errors() {
        let mut output = Vec::new();
        let problem = ProblemDetails::new().with_status(500);
        write_document(&problem, &mut output, None).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            r#"<?xml version="1.0" encoding="utf-8"?><ProblemDetails><Status>500</Status></ProblemDetails>"#
        );
    }

    #[test]
    fn test_write_document_indented() {
        let mut output = Vec::new();
        let problem = ProblemDetails::new().with_title("t");
        write_document(&problem, &mut output, Some(2)).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\n  <Title>t</Title>\n"));
        assert!(text.ends_with("</ProblemDetails>"));
    }
}
