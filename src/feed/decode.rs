use bytes::Bytes;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::DecodeError;

use super::types::{ActivityFeed, Entry};

/// Decode an activity-stream document into typed entries.
///
/// Elements are matched on their local name, so `activity:object` and
/// `usr:username` land in the same slots as their unprefixed forms. Anything
/// not modelled in [`Entry`] is skipped; missing elements stay empty.
pub fn decode_feed(xml: &Bytes) -> Result<ActivityFeed, DecodeError> {
    let mut reader = Reader::from_reader(&xml[..]);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut feed: Option<ActivityFeed> = None;
    let mut entry: Option<Entry> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = local_name(e.local_name().as_ref());
                open_element(&path, &name, &mut feed, &mut entry)?;
                path.push(name);
            }
            Event::Empty(e) => {
                let name = local_name(e.local_name().as_ref());
                open_element(&path, &name, &mut feed, &mut entry)?;
                close_element(&path, &name, &mut feed, &mut entry);
                if path.is_empty() { break; }
            }
            Event::End(_) => {
                if let Some(name) = path.pop() {
                    close_element(&path, &name, &mut feed, &mut entry);
                }
                if path.is_empty() { break; }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                append_text(&path, &text, &mut feed, &mut entry);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                let text = String::from_utf8_lossy(&raw);
                append_text(&path, &text, &mut feed, &mut entry);
            }
            Event::Eof => {
                if !path.is_empty() { return Err(DecodeError::Truncated); }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    feed.ok_or(DecodeError::Empty)
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn open_element(
    path: &[String],
    name: &str,
    feed: &mut Option<ActivityFeed>,
    entry: &mut Option<Entry>,
) -> Result<(), DecodeError> {
    match path.len() {
        0 if name == "feed" => { *feed = Some(ActivityFeed::default()); }
        0 => return Err(DecodeError::UnexpectedRoot(name.to_string())),
        1 if name == "entry" => { *entry = Some(Entry::default()); }
        _ => {}
    }
    Ok(())
}

// `path` no longer contains `name`.
fn close_element(path: &[String], name: &str, feed: &mut Option<ActivityFeed>, entry: &mut Option<Entry>) {
    if path.len() == 1 && name == "entry" {
        if let (Some(f), Some(e)) = (feed.as_mut(), entry.take()) {
            f.entries.push(e);
        }
    }
}

fn append_text(path: &[String], text: &str, feed: &mut Option<ActivityFeed>, entry: &mut Option<Entry>) {
    let rel: Vec<&str> = path.iter().skip(1).map(String::as_str).collect();
    let slot = match rel.as_slice() {
        ["entry", rest @ ..] => entry.as_mut().and_then(|e| entry_slot(e, rest)),
        ["id"] => feed.as_mut().map(|f| &mut f.id),
        ["title"] => feed.as_mut().map(|f| &mut f.title),
        _ => None,
    };
    if let Some(slot) = slot {
        slot.push_str(text);
    }
}

fn entry_slot<'a>(entry: &'a mut Entry, rel: &[&str]) -> Option<&'a mut String> {
    match rel {
        ["id"] => Some(&mut entry.id),
        ["title"] => Some(&mut entry.title),
        ["summary"] => Some(&mut entry.summary),
        ["content"] => Some(&mut entry.content),
        ["published"] => Some(&mut entry.published),
        ["updated"] => Some(&mut entry.updated),
        ["object", "id"] => Some(&mut entry.object.id),
        ["object", "title"] => Some(&mut entry.object.title),
        ["target", "id"] => Some(&mut entry.target.id),
        ["target", "title"] => Some(&mut entry.target.title),
        ["author", "name"] => Some(&mut entry.author.name),
        ["author", "username"] => Some(&mut entry.author.username),
        _ => None,
    }
}
