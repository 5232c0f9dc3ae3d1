mod contact;
mod raw;

pub use contact::{Contact, OrderDetails};
pub use raw::{
    text_or, RawContact, RawOrder, MISSING, NOTES_PLACEHOLDER, PHONE_PLACEHOLDER, ZIP_PLACEHOLDER,
};
