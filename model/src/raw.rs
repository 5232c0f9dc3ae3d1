use crate::{Contact, OrderDetails};

pub const MISSING: &str = "MISSING";
pub const PHONE_PLACEHOLDER: &str = "(###) ###-####";
pub const ZIP_PLACEHOLDER: &str = "#####";
pub const NOTES_PLACEHOLDER: &str = "-";
pub const UNITS_DEFAULT: u32 = 0;

/// A contact as read from a source row, `None` where the cell was blank.
#[derive(Clone, Debug, Default)]
pub struct RawContact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub order: Option<RawOrder>,
}

#[derive(Clone, Debug, Default)]
pub struct RawOrder {
    pub units: Option<u32>,
    pub phone2: Option<String>,
    pub notes: Option<String>,
}

pub fn text_or(value: Option<String>, placeholder: &str) -> String {
    value.unwrap_or_else(|| placeholder.to_string())
}

impl RawContact {
    pub fn refine(self) -> Contact {
        Contact {
            first_name: text_or(self.first_name, MISSING),
            last_name: text_or(self.last_name, MISSING),
            email: text_or(self.email, MISSING),
            phone: text_or(self.phone, PHONE_PLACEHOLDER),
            address: text_or(self.address, MISSING),
            city: text_or(self.city, MISSING),
            state: text_or(self.state, MISSING),
            zip_code: text_or(self.zip_code, ZIP_PLACEHOLDER),
            position: None,
            order: self.order.map(RawOrder::refine),
        }
    }
}

impl RawOrder {
    pub fn refine(self) -> OrderDetails {
        OrderDetails {
            units: self.units.unwrap_or(UNITS_DEFAULT),
            phone2: text_or(self.phone2, PHONE_PLACEHOLDER),
            notes: text_or(self.notes, NOTES_PLACEHOLDER),
        }
    }
}
