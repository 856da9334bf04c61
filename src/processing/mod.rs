//! CV section parsing, keyword classification and template filling

pub mod document;
pub mod keywords;
pub mod tailor;
