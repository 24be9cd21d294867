use crate::parser::OutputParser;
use anyhow::{anyhow, bail, Context, Result};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::name::QName;
use quick_xml::Reader;
use report_model::model::message::{Event, Message};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

// Raw shape of a SpotBugs `BugCollection` document. Only the parts the
// conversion reads are kept; everything else is skipped. Class and
// Method annotations are collected as one sequence because SpotBugs
// interleaves them freely (multi-class bug patterns emit a secondary
// Class after the Method), and events must keep document order.
struct RawBugCollection {
    project_entries: Vec<String>,
    bugs: Vec<RawBug>,
}

struct RawBug {
    bug_type: String,
    instance_hash: Option<String>,
    long_message: Option<String>,
    source_line: Option<RawSourceLine>,
    annotations: Vec<RawAnnotation>,
}

struct RawAnnotation {
    message: Option<String>,
    source_line: Option<RawSourceLine>,
}

struct RawSourceLine {
    source_path: Option<String>,
    start: Option<u32>,
}

/// Parser for SpotBugs analyzer results.
///
/// Source paths in the XML are relative to the analyzed project, so
/// the `<Project>` element's entries are collected first and used to
/// resolve every `sourcepath`. A diagnostic whose source file cannot
/// be found on disk is dropped with a warning.
pub struct SpotBugsParser {
    project_paths: Vec<PathBuf>,
}

impl SpotBugsParser {
    pub fn new() -> Self {
        Self {
            project_paths: Vec::new(),
        }
    }

    /// Parse a SpotBugs `BugCollection` document.
    pub fn parse_str(&mut self, analyzer_result: &str) -> Result<Vec<Message>> {
        let collection =
            read_bug_collection(analyzer_result).context("malformed SpotBugs analyzer result")?;

        self.project_paths = collect_project_paths(&collection.project_entries);

        let mut messages = Vec::new();
        for bug in &collection.bugs {
            if let Some(message) = self.message_from_bug(bug)? {
                messages.push(message);
            }
        }
        Ok(messages)
    }

    fn message_from_bug(&self, bug: &RawBug) -> Result<Option<Message>> {
        let message = bug
            .long_message
            .clone()
            .ok_or_else(|| anyhow!("bug instance `{}` has no LongMessage", bug.bug_type))?;
        let source_line = bug
            .source_line
            .as_ref()
            .ok_or_else(|| anyhow!("bug instance `{}` has no SourceLine", bug.bug_type))?;
        let source_path = source_line
            .source_path
            .as_deref()
            .ok_or_else(|| anyhow!("bug instance `{}` has no source path", bug.bug_type))?;
        let line = source_line
            .start
            .ok_or_else(|| anyhow!("bug instance `{}` has no start line", bug.bug_type))?;

        let Some(path) = self.resolve_path(source_path) else {
            return Ok(None);
        };

        let events = bug
            .annotations
            .iter()
            .filter_map(|annotation| self.event_from_annotation(annotation))
            .collect();

        Ok(Some(Message {
            path,
            line,
            column: 0,
            message,
            checker: bug.bug_type.clone(),
            report_hash: bug.instance_hash.clone(),
            events,
            notes: vec![],
            macro_expansions: vec![],
            fixits: vec![],
        }))
    }

    // An annotation without a message, a resolvable source path or a
    // start line carries no usable position and is dropped.
    fn event_from_annotation(&self, annotation: &RawAnnotation) -> Option<Event> {
        let message = annotation.message.clone()?;
        let source_line = annotation.source_line.as_ref()?;
        let line = source_line.start?;
        let path = self.resolve_path(source_line.source_path.as_deref()?)?;
        Some(Event {
            path,
            line,
            column: 0,
            message,
        })
    }

    fn resolve_path(&self, source_path: &str) -> Option<PathBuf> {
        let path = Path::new(source_path);
        if path.exists() {
            return Some(path.to_path_buf());
        }
        for project_path in &self.project_paths {
            let full_path = project_path.join(source_path);
            if full_path.exists() {
                return Some(full_path);
            }
        }
        warn!("no source file found: {source_path}");
        None
    }
}

impl Default for SpotBugsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputParser for SpotBugsParser {
    fn parse_file(&mut self, analyzer_result: &Path) -> Result<Vec<Message>> {
        let contents = fs::read_to_string(analyzer_result).with_context(|| {
            format!(
                "cannot read analyzer result `{}`",
                analyzer_result.display()
            )
        })?;
        self.parse_str(&contents)
    }
}

fn read_bug_collection(xml: &str) -> Result<RawBugCollection> {
    let mut reader = Reader::from_str(xml);
    let mut collection = RawBugCollection {
        project_entries: Vec::new(),
        bugs: Vec::new(),
    };
    let mut saw_root = false;
    loop {
        match reader.read_event()? {
            XmlEvent::Start(element) => match element.name().as_ref() {
                b"BugCollection" => saw_root = true,
                b"Project" => {
                    collection.project_entries = read_project_entries(&mut reader)?;
                }
                b"BugInstance" => {
                    collection.bugs.push(read_bug(&mut reader, &element)?);
                }
                _ => {}
            },
            XmlEvent::Eof => break,
            _ => {}
        }
    }
    if !saw_root {
        bail!("no BugCollection root element");
    }
    Ok(collection)
}

// Every child of `<Project>` (SrcDir, WrkDir, Jar, AuxClasspathEntry,
// ...) names a path of the analyzed project.
fn read_project_entries(reader: &mut Reader<&[u8]>) -> Result<Vec<String>> {
    let mut entries = Vec::new();
    loop {
        match reader.read_event()? {
            XmlEvent::Start(element) => {
                let text = reader.read_text(element.name())?;
                let text = text.trim();
                if !text.is_empty() {
                    entries.push(text.to_string());
                }
            }
            XmlEvent::End(element) if element.name().as_ref() == b"Project" => break,
            XmlEvent::Eof => bail!("unexpected end of document inside Project"),
            _ => {}
        }
    }
    Ok(entries)
}

fn read_bug(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<RawBug> {
    let bug_type = attribute(start, "type")?
        .ok_or_else(|| anyhow!("BugInstance element has no type attribute"))?;
    let mut bug = RawBug {
        bug_type,
        instance_hash: attribute(start, "instanceHash")?,
        long_message: None,
        source_line: None,
        annotations: Vec::new(),
    };
    loop {
        match reader.read_event()? {
            XmlEvent::Start(element) => match element.name().as_ref() {
                b"LongMessage" => {
                    let text = reader.read_text(element.name())?;
                    bug.long_message = Some(text.trim().to_string());
                }
                // the first SourceLine is the primary location
                b"SourceLine" => {
                    if bug.source_line.is_none() {
                        bug.source_line = Some(source_line_from(&element)?);
                    }
                    reader.read_to_end(element.name())?;
                }
                b"Class" | b"Method" => {
                    bug.annotations.push(read_annotation(reader, element.name())?);
                }
                _ => {
                    reader.read_to_end(element.name())?;
                }
            },
            XmlEvent::Empty(element) => {
                if element.name().as_ref() == b"SourceLine" && bug.source_line.is_none() {
                    bug.source_line = Some(source_line_from(&element)?);
                }
            }
            XmlEvent::End(element) if element.name().as_ref() == b"BugInstance" => break,
            XmlEvent::Eof => bail!("unexpected end of document inside BugInstance"),
            _ => {}
        }
    }
    Ok(bug)
}

fn read_annotation(reader: &mut Reader<&[u8]>, end: QName) -> Result<RawAnnotation> {
    let mut annotation = RawAnnotation {
        message: None,
        source_line: None,
    };
    loop {
        match reader.read_event()? {
            XmlEvent::Start(element) => match element.name().as_ref() {
                b"Message" => {
                    let text = reader.read_text(element.name())?;
                    annotation.message = Some(text.trim().to_string());
                }
                b"SourceLine" => {
                    if annotation.source_line.is_none() {
                        annotation.source_line = Some(source_line_from(&element)?);
                    }
                    reader.read_to_end(element.name())?;
                }
                _ => {
                    reader.read_to_end(element.name())?;
                }
            },
            XmlEvent::Empty(element) => {
                if element.name().as_ref() == b"SourceLine" && annotation.source_line.is_none() {
                    annotation.source_line = Some(source_line_from(&element)?);
                }
            }
            XmlEvent::End(element) if element.name() == end => break,
            XmlEvent::Eof => bail!("unexpected end of document inside bug annotation"),
            _ => {}
        }
    }
    Ok(annotation)
}

fn source_line_from(element: &BytesStart) -> Result<RawSourceLine> {
    let start = match attribute(element, "start")? {
        Some(value) => Some(
            value
                .parse::<u32>()
                .with_context(|| format!("invalid start line `{value}`"))?,
        ),
        None => None,
    };
    Ok(RawSourceLine {
        source_path: attribute(element, "sourcepath")?,
        start,
    })
}

fn attribute(element: &BytesStart, name: &str) -> Result<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(attribute) => Ok(Some(attribute.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

// A directory entry is a source root as-is; a file entry (a jar, a
// class file) contributes its parent directory.
fn collect_project_paths(entries: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for entry in entries {
        let path = Path::new(entry);
        if path.is_dir() {
            paths.push(path.to_path_buf());
        } else if path.is_file() {
            if let Some(parent) = path.parent() {
                paths.push(parent.to_path_buf());
            }
        }
    }
    paths
}
