use geo::Point;

/// A delivery recipient. `position` is `x = longitude, y = latitude` once
/// the address has been geocoded.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub position: Option<Point>,
    pub order: Option<OrderDetails>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderDetails {
    pub units: u32,
    pub phone2: String,
    pub notes: String,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `address, city, state zip`, the form handed to the geocoder.
    pub fn address_one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }

    /// The address as it would appear on a mailing label.
    pub fn address_label(&self) -> String {
        let mut name = self.full_name();
        if let Some(order) = &self.order {
            name.push_str(&format!(" ({})", order.units));
        }
        format!(
            "{name}\n{}\n{}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }

    /// The position, but only if both coordinates are in range.
    pub fn valid_position(&self) -> Option<Point> {
        self.position.filter(|p| {
            (-90.0..=90.0).contains(&p.y()) && (-180.0..=180.0).contains(&p.x())
        })
    }
}
