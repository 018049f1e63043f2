//! Typed records for the named configuration sections.

use crate::node::Node;
use crate::toggle::ToggleNode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date formats accepted for accreditation validity and blackout dates.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Parses a hand-authored date, trying each supported format in turn.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// The full parsed content and settings tree for the site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    pub company: CompanyInfo,
    pub design: DesignConfig,
    pub services: Vec<Service>,
    pub accreditations: Vec<Accreditation>,
    pub gallery: Vec<GalleryProject>,
    pub testimonials: Vec<Testimonial>,
    pub hero_slider: HeroSliderConfig,
    pub top_bar: TopBarConfig,
    pub chatbot: ChatbotConfig,
    pub calendar: CalendarConfig,
    pub seo: SeoConfig,
    pub feature_toggles: ToggleNode,
    pub pages: Node,
    pub ui: Node,
    pub forms: Node,
    pub business_policies: Node,
    pub service_areas: Node,
}

// --- Company ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CompanyInfo {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub logo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded: Option<u16>,
    pub contact: ContactInfo,
    pub hours: Vec<OpeningHours>,
    pub social: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub emergency_phone: String,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub county: String,
    pub postcode: String,
    pub country: String,
}

impl Address {
    /// Non-empty address lines joined with `", "`.
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.city,
            &self.county,
            &self.postcode,
            &self.country,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Free-text opening hours for one weekday, e.g. `("monday", "8:00 - 18:00")`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningHours {
    pub day: String,
    pub hours: String,
}

// --- Branding ---

/// Color and typography tokens, keyed by their document tag names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    pub colors: BTreeMap<String, String>,
    pub typography: BTreeMap<String, String>,
}

// --- Listings ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub duration: String,
    pub price_range: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Accreditation {
    pub id: String,
    pub name: String,
    pub number: String,
    pub issuer: String,
    pub valid_until: String,
    pub logo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_url: Option<String>,
}

impl Accreditation {
    /// Whether the certificate had lapsed by `today`.
    ///
    /// An unreadable or missing validity date is never reported as expired.
    /// Callers must evaluate this at render time; the result depends on the
    /// current date and is not stored anywhere.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        parse_date(&self.valid_until).is_some_and(|until| until < today)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Testimonial {
    pub name: String,
    pub location: String,
    /// Star rating, always within `1..=5`.
    pub rating: u8,
    pub text: String,
    pub project_type: String,
    pub date: String,
}

impl Default for Testimonial {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            rating: Testimonial::MAX_RATING,
            text: String::new(),
            project_type: String::new(),
            date: String::new(),
        }
    }
}

impl Testimonial {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;

    /// Coerces raw document text into a valid rating, defaulting to the
    /// maximum when the value is missing or unreadable.
    pub fn rating_from_text(text: &str) -> u8 {
        text.trim()
            .parse::<i64>()
            .map(|r| r.clamp(Self::MIN_RATING as i64, Self::MAX_RATING as i64) as u8)
            .unwrap_or(Self::MAX_RATING)
    }

    pub fn stars(&self) -> String {
        "★".repeat(self.rating as usize)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GalleryProject {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    pub images: Vec<String>,
}

// --- Widgets ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HeroSliderConfig {
    pub autoplay: bool,
    pub interval_ms: u32,
    pub slides: Vec<HeroSlide>,
}

impl Default for HeroSliderConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval_ms: 5000,
            slides: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HeroSlide {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub cta_text: String,
    pub cta_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TopBarConfig {
    pub enabled: bool,
    pub message: String,
    pub phone: String,
    pub email: String,
}

impl Default for TopBarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            message: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ChatbotConfig {
    pub enabled: bool,
    pub name: String,
    pub greeting: String,
    pub quick_replies: Vec<String>,
    pub ui: Node,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CalendarConfig {
    pub enabled: bool,
    pub working_hours: Vec<WorkingDay>,
    pub appointment_types: Vec<AppointmentType>,
    pub blackout_dates: Vec<String>,
    pub buffer_minutes: u32,
    pub notice_minutes: u32,
}

impl CalendarConfig {
    /// Whether `date` is listed as a blackout day.
    pub fn is_blackout(&self, date: NaiveDate) -> bool {
        self.blackout_dates
            .iter()
            .any(|d| parse_date(d) == Some(date))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingDay {
    pub day: String,
    pub open: bool,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AppointmentType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SeoConfig {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_image: String,
    pub canonical_url: String,
}
