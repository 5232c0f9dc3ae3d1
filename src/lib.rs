pub mod geocode;
pub mod kml;
pub mod sheet;
pub mod utils;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use calamine::Data;

    use crate::{
        geocode::{resolve, tests::FakeGeocoder, Candidate, Throttle},
        kml::render,
        sheet::read_rows,
    };

    fn row(cells: [&str; 13]) -> Vec<Data> {
        cells
            .iter()
            .map(|x| match *x {
                "" => Data::Empty,
                x => Data::String(x.to_string()),
            })
            .collect()
    }

    fn sheet() -> Vec<Vec<Data>> {
        vec![
            row([
                "First", "Last", "Address", "City", "State", "Zip", "Phone", "Phone 2", "Email",
                "Bags", "Delivery", "Paid", "Notes",
            ]),
            row([
                "Ann",
                "Smith",
                "1 Main St",
                "Media",
                "PA",
                "19063",
                "(610) 555-0100",
                "",
                "ann@example.com",
                "5",
                "yes",
                "25",
                "",
            ]),
            row([
                "Bob", "Jones", "2 Oak Ave", "Media", "PA", "19063", "", "", "", "3", "no", "15",
                "",
            ]),
        ]
    }

    fn kml(geocoder: &FakeGeocoder) -> String {
        let rows = sheet();
        let mut contacts = read_rows(rows.iter().map(Vec::as_slice), 10).unwrap();
        resolve(&mut contacts, geocoder, &mut Throttle::new(Duration::ZERO)).unwrap();
        String::from_utf8(render(&contacts, "orders.kml").unwrap()).unwrap()
    }

    #[test]
    fn sheet_to_markers() {
        let mut geocoder = FakeGeocoder::default();
        geocoder.results.insert(
            "1 Main St, Media, PA 19063".into(),
            vec![Candidate::new(40.0, -75.0)],
        );

        let output = kml(&geocoder);
        assert_eq!(output.matches("<Placemark>").count(), 1);
        assert!(output.contains("<name>5</name>"));
        assert!(output.contains("<coordinates>-75.0,40.0</coordinates>"));
        assert!(!output.contains("Jones"));
        // only the delivery row is geocoded
        assert_eq!(geocoder.calls.borrow().len(), 1);
    }

    #[test]
    fn unlocated_delivery_left_off_map() {
        let geocoder = FakeGeocoder::default();

        let rows = sheet();
        let mut contacts = read_rows(rows.iter().map(Vec::as_slice), 10).unwrap();
        resolve(&mut contacts, &geocoder, &mut Throttle::new(Duration::ZERO)).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].position, None);

        let output = kml(&geocoder);
        assert!(!output.contains("<Placemark>"));
    }
}
