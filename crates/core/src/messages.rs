//! Bilingual (English / Hindi) status messages attached to API responses.

use serde::Serialize;

/// A human-readable status message in English and Hindi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Message {
    pub en: &'static str,
    pub hi: &'static str,
}

const fn msg(en: &'static str, hi: &'static str) -> Message {
    Message { en, hi }
}

pub const REGISTERED: Message = msg("Registration successful", "पंजीकरण सफल! राम राम!");
pub const LOGGED_IN: Message = msg("Login successful", "लॉगिन सफल! राम राम!");
pub const PROFILE: Message = msg("Your profile", "आपकी प्रोफ़ाइल");

pub const PROPERTIES_FOUND: Message = msg("Properties found", "सम्पत्तियाँ मिल गईं");
pub const PROPERTY_FOUND: Message = msg("Property found", "सम्पत्ति मिल गई");
pub const PROPERTY_CREATED: Message = msg("Property created", "सम्पत्ति सफलतापूर्वक बनाई गई");
pub const PROPERTY_UPDATED: Message = msg("Property updated", "सम्पत्ति अपडेट हो गई");
pub const PROPERTY_DELETED: Message = msg("Property deleted", "सम्पत्ति हटा दी गई");
pub const IMAGES_UPLOADED: Message = msg("Files uploaded", "फाइलें सफलतापूर्वक अपलोड हुईं");
pub const IMAGE_DELETED: Message = msg("Image deleted", "तस्वीर हटा दी गई");

pub const RENTAL_CREATED: Message = msg("Rental agreement created", "किराएदारी समझौता बन गया");
pub const RENTAL_FOUND: Message = msg("Rental details", "किराएदारी का विवरण");
pub const RENTAL_TERMINATED: Message = msg("Rental terminated", "किराएदारी समाप्त हो गई");
pub const MY_RENTALS: Message = msg("Your rentals", "आपकी किराएदारी की जानकारी");
pub const MY_DUES: Message = msg("Your outstanding rent", "आपका बकाया किराया");
pub const PAYMENT_RECORDED: Message = msg("Payment recorded", "भुगतान दर्ज हो गया");

pub const DASHBOARD: Message = msg("Dashboard statistics", "डैशबोर्ड की जानकारी");
pub const ALL_USERS: Message = msg("All users", "सभी उपयोगकर्ता");
pub const USER_STATUS_CHANGED: Message = msg("User status updated", "उपयोगकर्ता की स्थिति बदल गई");
pub const ALL_RENTALS: Message = msg("All rentals", "सभी किराएदारी");
pub const OVERDUE_RENTALS: Message = msg("Overdue rent", "बकाया किराया");
