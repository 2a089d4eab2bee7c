// External crates
use log::{debug, warn};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

// Standard library imports
use std::io::Read;

use crate::error::{Error, Result};
use crate::ordered::ValidationErrors;
use crate::wrapper::ProblemRecord;
use crate::xml::decode_local_name;
use crate::xml_output::{TAG_DETAIL, TAG_ERRORS, TAG_INSTANCE, TAG_STATUS, TAG_TITLE, TAG_TYPE};

/// Reads `input` to the end and parses it as a `T` document.
pub fn read_document<T: ProblemRecord, R: Read>(mut input: R) -> Result<T> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    parse_document(&bytes)
}

/// Parses an in-memory document. Nothing is returned unless the whole document parsed.
pub fn parse_document<T: ProblemRecord>(bytes: &[u8]) -> Result<T> {
    let mut reader = Reader::from_reader(bytes);

    loop {
        match reader.read_event()? {
            Event::Start(root) => {
                expect_root::<T>(&root)?;
                let mut record = T::default();
                read_members(&mut reader, &mut record)?;
                expect_epilog(&mut reader)?;
                return Ok(record);
            }
            Event::Empty(root) => {
                expect_root::<T>(&root)?;
                expect_epilog(&mut reader)?;
                return Ok(T::default());
            }
            Event::Eof => return Err(Error::MissingRoot),
            _ => {}
        }
    }
}

/// Returns the local name of the document's root element.
pub fn root_name(bytes: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(bytes);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => return element_name(&e),
            Event::Eof => return Err(Error::MissingRoot),
            _ => {}
        }
    }
}

// Only comments, processing instructions and whitespace may follow the root.
fn expect_epilog(reader: &mut Reader<&[u8]>) -> Result<()> {
    loop {
        match reader.read_event()? {
            Event::Eof => return Ok(()),
            Event::Comment(_) | Event::PI(_) => {}
            Event::Text(e) if e.iter().all(u8::is_ascii_whitespace) => {}
            Event::Start(e) | Event::Empty(e) => {
                return Err(Error::TrailingContent(format!("<{}>", element_name(&e)?)))
            }
            other => return Err(Error::TrailingContent(format!("{:?}", other))),
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> Result<String> {
    Ok(std::str::from_utf8(start.local_name().as_ref())?.to_owned())
}

fn expect_root<T: ProblemRecord>(root: &BytesStart<'_>) -> Result<()> {
    let found = element_name(root)?;
    if found != T::ROOT {
        return Err(Error::UnexpectedRoot {
            expected: T::ROOT,
            found,
        });
    }
    debug!("Reading <{}> document", T::ROOT);
    Ok(())
}

/// Collects the character data of the element opened by `start`.
///
/// Entity references are resolved and CDATA sections are taken verbatim.
/// Comments and processing instructions are dropped. Text of nested elements
/// is included without their markup.
fn element_text(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>, empty: bool) -> Result<String> {
    let mut text = String::new();
    if empty {
        return Ok(text);
    }

    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            Event::Text(e) => text.push_str(&unescape(std::str::from_utf8(&e)?)?),
            Event::CData(e) => text.push_str(std::str::from_utf8(&e)?),
            Event::GeneralRef(e) => {
                let entity = format!("&{};", std::str::from_utf8(&e)?);
                text.push_str(&unescape(&entity)?);
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(text),
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(Error::Truncated(element_name(start)?)),
            _ => {}
        }
    }
}

fn read_members<T: ProblemRecord>(reader: &mut Reader<&[u8]>, record: &mut T) -> Result<()> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => read_member(reader, record, &e, false)?,
            Event::Empty(e) => read_member(reader, record, &e, true)?,
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(Error::Truncated(T::ROOT.to_string())),
            _ => {}
        }
    }
}

fn read_member<T: ProblemRecord>(
    reader: &mut Reader<&[u8]>,
    record: &mut T,
    start: &BytesStart<'_>,
    empty: bool,
) -> Result<()> {
    let name = element_name(start)?;
    if record.read_member(reader, &name, empty)? {
        return Ok(());
    }

    let text = element_text(reader, start, empty)?;
    let problem = record.problem_mut();
    match name.as_str() {
        TAG_DETAIL => problem.detail = Some(text),
        TAG_TITLE => problem.title = Some(text),
        TAG_STATUS => problem.status = Some(parse_status(&text)?),
        TAG_INSTANCE => problem.instance = Some(text),
        TAG_TYPE => problem.type_uri = Some(text),
        _ => {
            let key = decode_local_name(&name).into_owned();
            if problem.extensions.contains_key(&key) {
                debug!("Replacing duplicate extension member '{}'", key);
            }
            problem.extensions.insert(key, text);
        }
    }
    Ok(())
}

fn parse_status(text: &str) -> Result<i32> {
    text.trim()
        .parse()
        .map_err(|_| Error::InvalidStatus(text.to_string()))
}

/// Reads the children of a non-empty `Errors` element into `errors`.
///
/// Each child holds the messages of one field as a single text node, which
/// becomes one message.
pub(crate) fn read_validation_errors(
    reader: &mut Reader<&[u8]>,
    errors: &mut ValidationErrors,
) -> Result<()> {
    loop {
        let (start, empty) = match reader.read_event()? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(Error::Truncated(TAG_ERRORS.to_string())),
            _ => continue,
        };

        let name = element_name(&start)?;
        let field = decode_local_name(&name).into_owned();
        let message = element_text(reader, &start, empty)?;
        if errors.contains_key(&field) {
            warn!("Duplicate errors entry for '{}', appending", field);
        }
        errors.add_error(field, message);
    }
}
