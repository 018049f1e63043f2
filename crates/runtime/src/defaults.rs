//! Placeholder configuration used when neither the compiled artifact nor the
//! live document is available.

use sitecfg_types::{
    Accreditation, Address, AppointmentType, CalendarConfig, ChatbotConfig, CompanyInfo,
    Configuration, ContactInfo, DesignConfig, GalleryProject, HeroSlide, HeroSliderConfig, Node,
    OpeningHours, SeoConfig, Service, Testimonial, ToggleNode, TopBarConfig, WorkingDay,
};
use std::collections::BTreeMap;

const WEEKDAYS: [&str; 5] = ["monday", "tuesday", "wednesday", "thursday", "friday"];
const WEEKEND: [&str; 2] = ["saturday", "sunday"];

fn strings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn object<const N: usize>(entries: [(&str, Node); N]) -> Node {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn texts<const N: usize>(entries: [(&str, &str); N]) -> Node {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), Node::text(v)))
        .collect()
}

fn service(id: &str, name: &str, icon: &str, description: &str) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        duration: "Contact us".to_string(),
        price_range: "On request".to_string(),
        image: String::new(),
    }
}

fn form_field(name: &str, kind: &str, label: &str) -> Node {
    texts([
        ("name", name),
        ("type", kind),
        ("required", "true"),
        ("label", label),
    ])
}

fn company() -> CompanyInfo {
    CompanyInfo {
        name: "Building Services".to_string(),
        tagline: "Quality building work you can rely on".to_string(),
        description: "Local building, renovation and maintenance services.".to_string(),
        logo: "images/logo.png".to_string(),
        founded: None,
        contact: ContactInfo {
            phone: "Call for details".to_string(),
            email: "info@example.com".to_string(),
            emergency_phone: String::new(),
            address: Address {
                country: "United Kingdom".to_string(),
                ..Default::default()
            },
        },
        hours: WEEKDAYS
            .iter()
            .map(|day| OpeningHours {
                day: day.to_string(),
                hours: "8:00 - 17:00".to_string(),
            })
            .chain(WEEKEND.iter().map(|day| OpeningHours {
                day: day.to_string(),
                hours: "Closed".to_string(),
            }))
            .collect(),
        social: BTreeMap::new(),
    }
}

fn chatbot() -> ChatbotConfig {
    ChatbotConfig {
        enabled: true,
        name: "Site Assistant".to_string(),
        greeting: "Hello! How can we help with your project?".to_string(),
        quick_replies: ["Get a quote", "Opening hours", "Contact details"]
            .iter()
            .map(|r| r.to_string())
            .collect(),
        ui: texts([
            ("title", "Chat with us"),
            ("placeholder", "Type your message..."),
            ("send-button", "Send"),
        ]),
    }
}

fn calendar() -> CalendarConfig {
    CalendarConfig {
        enabled: true,
        working_hours: WEEKDAYS
            .iter()
            .map(|day| WorkingDay {
                day: day.to_string(),
                open: true,
                start: "08:00".to_string(),
                end: "17:00".to_string(),
            })
            .chain(WEEKEND.iter().map(|day| WorkingDay {
                day: day.to_string(),
                ..Default::default()
            }))
            .collect(),
        appointment_types: vec![AppointmentType {
            id: "site-visit".to_string(),
            name: "Site Visit".to_string(),
            description: "We visit to discuss your plans and provide a quote.".to_string(),
            duration_minutes: 60,
        }],
        blackout_dates: Vec::new(),
        buffer_minutes: 30,
        notice_minutes: 1440,
    }
}

fn feature_toggles() -> ToggleNode {
    let mut gallery = ToggleNode::with_enabled(true);
    if let ToggleNode::Branch(map) = &mut gallery {
        map.insert("instagram-feed".to_string(), ToggleNode::with_enabled(false));
    }
    let toggles = [
        "hero-section",
        "top-bar",
        "chatbot",
        "services-page",
        "booking-page",
        "testimonials-carousel",
    ]
    .iter()
    .map(|name| (name.to_string(), ToggleNode::with_enabled(true)))
    .chain([("gallery-page".to_string(), gallery)])
    .collect();
    ToggleNode::Branch(toggles)
}

fn ui() -> Node {
    let links = [
        ("Home", "index.html"),
        ("Services", "services.html"),
        ("Contact", "contact.html"),
    ];
    let navigation = object([(
        "item",
        Node::Array(
            links
                .into_iter()
                .map(|(label, href)| texts([("label", label), ("href", href)]))
                .collect(),
        ),
    )]);
    object([
        ("navigation", navigation),
        ("buttons", texts([("get-quote", "Get a Quote"), ("contact-us", "Contact Us")])),
        ("labels", texts([("call-us", "Call us"), ("email-us", "Email us")])),
        (
            "messages",
            object([
                ("success", texts([("form-sent", "Thanks! We'll be in touch soon.")])),
                ("error", texts([("general", "Something went wrong. Please call us.")])),
            ]),
        ),
    ])
}

fn forms() -> Node {
    object([(
        "contact-form",
        object([
            ("title", Node::text("Request a Quote")),
            (
                "fields",
                object([(
                    "field",
                    Node::Array(vec![
                        form_field("name", "text", "Your name"),
                        form_field("email", "email", "Email address"),
                        form_field("message", "textarea", "Tell us about your project"),
                    ]),
                )]),
            ),
            ("submit", Node::text("Send Enquiry")),
        ]),
    )])
}

/// A complete, non-empty configuration with safe placeholder content.
pub fn fallback_configuration() -> Configuration {
    Configuration {
        company: company(),
        design: DesignConfig {
            colors: strings(&[
                ("primary", "#1a3a5c"),
                ("secondary", "#f5a623"),
                ("text", "#333333"),
                ("background", "#ffffff"),
            ]),
            typography: strings(&[
                ("heading", "'Montserrat', sans-serif"),
                ("body", "'Open Sans', sans-serif"),
            ]),
        },
        services: vec![
            service(
                "general-building",
                "General Building",
                "🏗️",
                "Extensions, alterations and structural work.",
            ),
            service(
                "renovations",
                "Renovations",
                "🔨",
                "Kitchens, bathrooms and whole-house refurbishments.",
            ),
            service(
                "maintenance",
                "Maintenance & Repairs",
                "🔧",
                "Reliable repairs and planned maintenance.",
            ),
        ],
        accreditations: vec![Accreditation {
            id: "insured".to_string(),
            name: "Fully Insured".to_string(),
            number: "Available on request".to_string(),
            issuer: "Public liability insurance".to_string(),
            valid_until: String::new(),
            logo: "images/accreditations/insured.png".to_string(),
            verification_url: None,
        }],
        gallery: vec![GalleryProject {
            id: "recent-work".to_string(),
            title: "Recent Work".to_string(),
            description: "A selection of our recent building projects.".to_string(),
            category: "general".to_string(),
            location: "Local area".to_string(),
            duration: "Varies".to_string(),
            year: None,
            images: vec!["images/gallery/placeholder.jpg".to_string()],
        }],
        testimonials: vec![Testimonial {
            name: "A happy customer".to_string(),
            text: "Professional, tidy and finished on time.".to_string(),
            ..Default::default()
        }],
        hero_slider: HeroSliderConfig {
            slides: vec![HeroSlide {
                title: "Quality Building Services".to_string(),
                subtitle: "Trusted local builders".to_string(),
                cta_text: "Get a Quote".to_string(),
                cta_link: "contact.html".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        },
        top_bar: TopBarConfig {
            message: "Free, no-obligation quotes".to_string(),
            ..Default::default()
        },
        chatbot: chatbot(),
        calendar: calendar(),
        seo: SeoConfig {
            title: "Building Services | Local Builders".to_string(),
            description: "Local building, renovation and maintenance services.".to_string(),
            keywords: "builders, renovations, maintenance".to_string(),
            ..Default::default()
        },
        feature_toggles: feature_toggles(),
        pages: object([(
            "index",
            object([(
                "hero",
                texts([
                    ("title", "Quality Building Services"),
                    ("subtitle", "Trusted local builders"),
                ]),
            )]),
        )]),
        ui: ui(),
        forms: forms(),
        business_policies: texts([
            ("quotes", "All quotes are free and without obligation."),
            ("guarantee", "All workmanship is guaranteed."),
        ]),
        service_areas: object([
            ("area", texts([("name", "Local area")])),
            ("radius", Node::text("Please call to confirm coverage")),
        ]),
    }
}
