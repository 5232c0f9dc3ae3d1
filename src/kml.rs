use std::{
    ffi::OsString,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use _model::Contact;
use anyhow::{Context, Result};
use geo::Point;
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

const KML_NS: &str = "http://www.opengis.net/kml/2.2";
const FOLDER_NAME: &str = "Markers";

#[derive(Debug, PartialEq)]
pub struct Written {
    pub placemarks: usize,
    pub skipped: usize,
}

/// Contacts that can go on the map, with their position.
fn placemarks(contacts: &[Contact]) -> impl Iterator<Item = (&Contact, Point)> {
    contacts
        .iter()
        .filter_map(|c| c.valid_position().map(|p| (c, p)))
}

/// Renders a KML document with one placemark per contact that has a valid
/// position, in input order.
pub fn render(contacts: &[Contact], document_name: &str) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("kml").with_attributes([("xmlns", KML_NS)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;
    text_element(&mut writer, "name", document_name)?;
    writer.write_event(Event::Start(BytesStart::new("Folder")))?;
    text_element(&mut writer, "name", FOLDER_NAME)?;

    for (contact, point) in placemarks(contacts) {
        writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
        text_element(&mut writer, "name", &placemark_name(contact))?;
        text_element(&mut writer, "description", &description(contact))?;
        writer.write_event(Event::Start(BytesStart::new("Point")))?;
        text_element(&mut writer, "coordinates", &coordinates(point))?;
        writer.write_event(Event::End(BytesEnd::new("Point")))?;
        writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Folder")))?;
    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;

    let mut output = writer.into_inner();
    output.push(b'\n');
    Ok(output)
}

/// Writes the KML for `contacts` to `path`, named after the file. The
/// document goes to a sibling `.tmp` file first and is renamed into place.
pub fn write(contacts: &[Contact], path: &Path) -> Result<Written> {
    let name = path
        .file_name()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let output = render(contacts, &name)?;

    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(err) = fs::write(&tmp, &output).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("Failed to write {}", path.display()));
    }

    let placemarks = placemarks(contacts).count();
    Ok(Written {
        placemarks,
        skipped: contacts.len() - placemarks,
    })
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn placemark_name(contact: &Contact) -> String {
    match &contact.order {
        Some(order) => order.units.to_string(),
        None => contact.full_name(),
    }
}

fn description(contact: &Contact) -> String {
    let mut lines = vec![
        contact.address_label(),
        format!("phone 1: {}", contact.phone),
    ];
    if let Some(order) = &contact.order {
        lines.push(format!("phone 2: {}", order.phone2));
    }
    lines.push(format!("e-mail: {}", contact.email));
    if let Some(order) = &contact.order {
        lines.push(format!("Notes: {}", order.notes));
    }
    lines.join("\n")
}

// longitude first; debug formatting keeps the fraction on whole degrees
fn coordinates(point: Point) -> String {
    format!("{:?},{:?}", point.x(), point.y())
}
