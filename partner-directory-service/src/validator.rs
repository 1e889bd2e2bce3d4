//! Input validation for add-partner payloads.
//!
//! Checks required-field presence, then the contact-info shape. Values
//! pass through unchanged; no trimming or case normalization, so the
//! anchored patterns must match the whole string as given.

use once_cell::sync::Lazy;
use partner_directory_types::{AddPartnerRequest, NewPartner};
use regex::Regex;

use crate::error::DirectoryError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Exactly 10 decimal digits, no separators
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

pub fn validate_new_partner(req: &AddPartnerRequest) -> Result<NewPartner, DirectoryError> {
    let (Some(name), Some(partner_type), Some(resources), Some(contact_info)) = (
        req.name.as_ref(),
        req.partner_type.as_ref(),
        req.resources.as_ref(),
        req.contact_info.as_ref(),
    ) else {
        return Err(DirectoryError::MissingField);
    };

    if !EMAIL_RE.is_match(contact_info) && !PHONE_RE.is_match(contact_info) {
        return Err(DirectoryError::InvalidContactFormat);
    }

    Ok(NewPartner {
        name: name.clone(),
        partner_type: partner_type.clone(),
        resources: resources.clone(),
        contact_info: contact_info.clone(),
    })
}
