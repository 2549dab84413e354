use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One spreadsheet line keyed by the header row. Every value is a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub fields: HashMap<String, String>,
}

impl Row {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field value, or `""` when the column does not exist.
    pub fn field(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn slug(&self) -> &str {
        self.field("slug")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

pub const DEFAULT_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1533105079780-92b9be482077?q=80&w=1600&auto=format&fit=crop";
pub const DEFAULT_CASE_STUDY_IMAGE: &str =
    "https://images.unsplash.com/photo-1521295121783-8a321d551ad2?q=80&w=1400&auto=format&fit=crop";
pub const DEFAULT_CONTACT_EMAIL: &str = "partners@stasher.com";
pub const DEFAULT_CONTACT_PHONE: &str = "+44 20 4525 2401";

/// A partner row read through the landing-page field names, with
/// presentation defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub slug: String,
    pub business_name: String,
    pub city: String,
    pub landmark: String,
    pub hero_image_url: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub form_action: Option<String>,
    pub google_maps_url: String,
    pub currency: String,
    pub current: Stats,
    pub expected: Stats,
    pub top_bookings: String,
    pub top_views: String,
    pub top_revenue: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub paris_one: String,
    pub paris_two: String,
    pub madrid_one: String,
    pub madrid_two: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub website_impressions: String,
    pub gmaps_impressions: String,
    pub bookings: String,
    pub revenue: String,
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

impl From<&Row> for Business {
    fn from(row: &Row) -> Self {
        let owned = |name: &str| row.field(name).trim().to_string();
        let form_action = Some(owned("formAction")).filter(|s| !s.is_empty());

        Self {
            slug: owned("slug"),
            business_name: or_default(row.field("businessName"), "Your Business"),
            city: or_default(row.field("city"), "Paris"),
            landmark: or_default(row.field("landmark"), "a key landmark"),
            hero_image_url: or_default(row.field("heroImageUrl"), DEFAULT_HERO_IMAGE),
            contact_email: or_default(row.field("contactEmail"), DEFAULT_CONTACT_EMAIL),
            contact_phone: or_default(row.field("contactPhone"), DEFAULT_CONTACT_PHONE),
            form_action,
            google_maps_url: or_default(row.field("googleMapsUrl"), "https://maps.google.com"),
            currency: owned("currency"),
            current: Stats {
                website_impressions: owned("websiteImpressions"),
                gmaps_impressions: owned("gmapsImpressions"),
                bookings: owned("bookings"),
                revenue: owned("revenue"),
            },
            expected: Stats {
                website_impressions: owned("liftWebsiteImpressions"),
                gmaps_impressions: owned("liftGmapsImpressions"),
                bookings: owned("liftBookings"),
                revenue: owned("liftRevenue"),
            },
            top_bookings: owned("topBookings"),
            top_views: owned("topViews"),
            top_revenue: owned("topRevenue"),
            owner_email: owned("ownerEmail"),
            owner_phone: owned("ownerPhone"),
            paris_one: owned("parisOne"),
            paris_two: owned("parisTwo"),
            madrid_one: owned("madridOne"),
            madrid_two: owned("madridTwo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_field_defaults_to_empty() {
        let row: Row = [("slug", "abc")].into_iter().collect();
        assert_eq!(row.slug(), "abc");
        assert_eq!(row.field("city"), "");
        assert_eq!(row.get("city"), None);
    }

    #[test]
    fn test_business_applies_presentation_defaults() {
        let row: Row = [("slug", "le-grand-hotel"), ("businessName", "")]
            .into_iter()
            .collect();
        let business = Business::from(&row);

        assert_eq!(business.business_name, "Your Business");
        assert_eq!(business.city, "Paris");
        assert_eq!(business.landmark, "a key landmark");
        assert_eq!(business.contact_email, DEFAULT_CONTACT_EMAIL);
        assert_eq!(business.form_action, None);
        assert_eq!(business.current.bookings, "");
    }

    #[test]
    fn test_business_reads_lift_columns_into_expected_stats() {
        let row: Row = [
            ("businessName", "Le Grand Hotel"),
            ("formAction", "https://hooks.example.com/abc"),
            ("bookings", "42"),
            ("liftBookings", "120"),
        ]
        .into_iter()
        .collect();
        let business = Business::from(&row);

        assert_eq!(business.business_name, "Le Grand Hotel");
        assert_eq!(
            business.form_action.as_deref(),
            Some("https://hooks.example.com/abc")
        );
        assert_eq!(business.current.bookings, "42");
        assert_eq!(business.expected.bookings, "120");
    }
}
