//! Fixed-field extractors for the named configuration sections.

use crate::extract::{
    attr, attr_or_text, child, children, elements, extract_node, flag, number, own_text, text,
};
use roxmltree::Node as XmlNode;
use sitecfg_types::toggle::ENABLED_KEY;
use sitecfg_types::{
    Accreditation, Address, AppointmentType, CalendarConfig, ChatbotConfig, CompanyInfo,
    Configuration, ContactInfo, DesignConfig, GalleryProject, HeroSlide, HeroSliderConfig, Node,
    OpeningHours, SeoConfig, Service, Testimonial, ToggleNode, TopBarConfig, WorkingDay,
};
use std::collections::BTreeMap;

pub(crate) fn configuration(root: XmlNode<'_, '_>) -> Configuration {
    let section = |name: &str| child(root, name);
    let generic = |name: &str| section(name).map(extract_node).unwrap_or_default();

    let config = Configuration {
        company: section("company").map(company).unwrap_or_default(),
        design: section("branding").map(design).unwrap_or_default(),
        services: list(section("services"), "service", service),
        accreditations: list(section("accreditations"), "certification", accreditation),
        gallery: list(section("gallery"), "project", gallery_project),
        testimonials: list(section("testimonials"), "testimonial", testimonial),
        hero_slider: section("hero-slider").map(hero_slider).unwrap_or_default(),
        top_bar: section("top-bar").map(top_bar).unwrap_or_default(),
        chatbot: section("chatbot").map(chatbot).unwrap_or_default(),
        calendar: section("calendar").map(calendar).unwrap_or_default(),
        seo: section("seo").map(seo).unwrap_or_default(),
        feature_toggles: section("feature-toggles")
            .map(toggle_node)
            .unwrap_or_default(),
        pages: generic("pages"),
        ui: generic("ui"),
        forms: generic("forms"),
        business_policies: generic("business-policies"),
        service_areas: generic("service-areas"),
    };

    log::debug!(
        "Parsed {} services, {} testimonials, {} accreditations, {} gallery projects",
        config.services.len(),
        config.testimonials.len(),
        config.accreditations.len(),
        config.gallery.len()
    );
    config
}

/// Collects every `item` child of an optional section.
fn list<T>(
    section: Option<XmlNode<'_, '_>>,
    item: &str,
    extract: impl Fn(XmlNode<'_, '_>) -> T,
) -> Vec<T> {
    section
        .map(|s| children(s, item).map(&extract).collect())
        .unwrap_or_default()
}

/// Text leaves of every element child, keyed by tag name.
fn token_map(element: Option<XmlNode<'_, '_>>) -> BTreeMap<String, String> {
    element
        .map(|e| {
            elements(e)
                .map(|c| (c.tag_name().name().to_string(), own_text(c)))
                .collect()
        })
        .unwrap_or_default()
}

fn company(e: XmlNode<'_, '_>) -> CompanyInfo {
    CompanyInfo {
        name: text(e, "name"),
        tagline: text(e, "tagline"),
        description: text(e, "description"),
        logo: text(e, "logo"),
        founded: number(e, "founded"),
        contact: child(e, "contact").map(contact).unwrap_or_default(),
        hours: child(e, "hours").map(opening_hours).unwrap_or_default(),
        social: token_map(child(e, "social")),
    }
}

fn contact(e: XmlNode<'_, '_>) -> ContactInfo {
    ContactInfo {
        phone: text(e, "phone"),
        email: text(e, "email"),
        emergency_phone: text(e, "emergency-phone"),
        address: child(e, "address").map(address).unwrap_or_default(),
    }
}

fn address(e: XmlNode<'_, '_>) -> Address {
    Address {
        street: text(e, "street"),
        city: text(e, "city"),
        county: text(e, "county"),
        postcode: text(e, "postcode"),
        country: text(e, "country"),
    }
}

/// Accepts both `<day name="monday">..</day>` and `<monday>..</monday>`.
fn opening_hours(e: XmlNode<'_, '_>) -> Vec<OpeningHours> {
    elements(e)
        .map(|d| {
            let day = match d.tag_name().name() {
                "day" => attr(d, "name"),
                other => other.to_string(),
            };
            OpeningHours {
                day,
                hours: own_text(d),
            }
        })
        .collect()
}

fn design(e: XmlNode<'_, '_>) -> DesignConfig {
    DesignConfig {
        colors: token_map(child(e, "colors")),
        typography: token_map(child(e, "typography")),
    }
}

fn service(e: XmlNode<'_, '_>) -> Service {
    let image = match text(e, "featured-image") {
        s if s.is_empty() => text(e, "image"),
        s => s,
    };
    Service {
        id: attr_or_text(e, "id"),
        name: text(e, "name"),
        description: text(e, "description"),
        icon: text(e, "icon"),
        duration: text(e, "duration"),
        price_range: text(e, "price-range"),
        image,
    }
}

fn accreditation(e: XmlNode<'_, '_>) -> Accreditation {
    let verification_url = text(e, "verification-url");
    Accreditation {
        id: attr_or_text(e, "id"),
        name: text(e, "name"),
        number: text(e, "number"),
        issuer: text(e, "issuer"),
        valid_until: text(e, "valid-until"),
        logo: text(e, "logo"),
        verification_url: (!verification_url.is_empty()).then_some(verification_url),
    }
}

fn testimonial(e: XmlNode<'_, '_>) -> Testimonial {
    Testimonial {
        name: text(e, "name"),
        location: text(e, "location"),
        rating: Testimonial::rating_from_text(&text(e, "rating")),
        text: text(e, "text"),
        project_type: text(e, "project-type"),
        date: text(e, "date"),
    }
}

fn gallery_project(e: XmlNode<'_, '_>) -> GalleryProject {
    GalleryProject {
        id: attr_or_text(e, "id"),
        title: text(e, "title"),
        description: text(e, "description"),
        category: text(e, "category"),
        location: text(e, "location"),
        duration: text(e, "duration"),
        year: number(e, "year"),
        images: child(e, "images")
            .map(|imgs| children(imgs, "image").map(own_text).collect())
            .unwrap_or_default(),
    }
}

fn hero_slider(e: XmlNode<'_, '_>) -> HeroSliderConfig {
    let defaults = HeroSliderConfig::default();
    HeroSliderConfig {
        autoplay: flag(e, "autoplay", defaults.autoplay),
        interval_ms: number(e, "interval").unwrap_or(defaults.interval_ms),
        slides: children(e, "slide")
            .map(|s| HeroSlide {
                title: text(s, "title"),
                subtitle: text(s, "subtitle"),
                image: text(s, "image"),
                cta_text: text(s, "cta-text"),
                cta_link: text(s, "cta-link"),
            })
            .collect(),
    }
}

fn top_bar(e: XmlNode<'_, '_>) -> TopBarConfig {
    TopBarConfig {
        enabled: flag(e, "enabled", true),
        message: text(e, "message"),
        phone: text(e, "phone"),
        email: text(e, "email"),
    }
}

fn chatbot(e: XmlNode<'_, '_>) -> ChatbotConfig {
    ChatbotConfig {
        enabled: flag(e, "enabled", false),
        name: text(e, "name"),
        greeting: text(e, "greeting"),
        quick_replies: child(e, "quick-replies")
            .map(|q| children(q, "reply").map(own_text).collect())
            .unwrap_or_default(),
        ui: child(e, "ui").map(extract_node).unwrap_or_default(),
    }
}

fn calendar(e: XmlNode<'_, '_>) -> CalendarConfig {
    CalendarConfig {
        enabled: flag(e, "enabled", false),
        working_hours: child(e, "working-hours")
            .map(|w| {
                children(w, "day")
                    .map(|d| WorkingDay {
                        day: attr(d, "name"),
                        open: flag(d, "open", true),
                        start: attr(d, "start"),
                        end: attr(d, "end"),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        appointment_types: child(e, "appointment-types")
            .map(|a| {
                children(a, "type")
                    .map(|t| AppointmentType {
                        id: attr_or_text(t, "id"),
                        name: text(t, "name"),
                        description: text(t, "description"),
                        duration_minutes: number(t, "duration").unwrap_or(0),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        blackout_dates: child(e, "blackout-dates")
            .map(|b| children(b, "date").map(own_text).collect())
            .unwrap_or_default(),
        buffer_minutes: number(e, "buffer-minutes").unwrap_or(0),
        notice_minutes: number(e, "notice-minutes").unwrap_or(0),
    }
}

fn seo(e: XmlNode<'_, '_>) -> SeoConfig {
    SeoConfig {
        title: text(e, "title"),
        description: text(e, "description"),
        keywords: text(e, "keywords"),
        og_image: text(e, "og-image"),
        canonical_url: text(e, "canonical-url"),
    }
}

/// Builds the toggle tree. `enabled` attributes, `<enabled>` children and
/// bare `true`/`false` leaves are all normalized to booleans. An `<enabled>`
/// element is always a flag, whatever it contains.
fn toggle_node(e: XmlNode<'_, '_>) -> ToggleNode {
    if e.tag_name().name() == ENABLED_KEY {
        return ToggleNode::Flag(own_text(e) == "true");
    }

    let has_children = elements(e).next().is_some();
    if !has_children && e.attributes().next().is_none() {
        return match own_text(e).as_str() {
            "" => ToggleNode::default(),
            value => ToggleNode::Flag(value == "true"),
        };
    }

    let mut map = BTreeMap::new();
    if let Some(v) = e.attribute(ENABLED_KEY) {
        map.insert(ENABLED_KEY.to_string(), ToggleNode::Flag(v.trim() == "true"));
    }
    for c in elements(e) {
        map.insert(c.tag_name().name().to_string(), toggle_node(c));
    }
    ToggleNode::Branch(map)
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use sitecfg_types::ToggleNode;

    #[test]
    fn test_services_in_document_order() {
        let config = parse(
            r#"<site-config><services>
                <service id="kitchens"><name>Kitchens</name><price-range>£5,000</price-range></service>
                <service id="bathrooms"><name>Bathrooms</name><image>/img/bath.jpg</image></service>
            </services></site-config>"#,
        )
        .unwrap();
        let ids: Vec<_> = config.services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["kitchens", "bathrooms"]);
        assert_eq!(config.services[0].price_range, "£5,000");
        assert_eq!(config.services[1].image, "/img/bath.jpg");
    }

    #[test]
    fn test_toggle_attributes_are_normalized() {
        let config = parse(
            r#"<site-config><feature-toggles>
                <gallery-page enabled="true"><instagram-feed enabled="false"/></gallery-page>
                <chatbot><enabled>false</enabled></chatbot>
            </feature-toggles></site-config>"#,
        )
        .unwrap();
        let toggles = &config.feature_toggles;
        let feed = toggles
            .child("gallery-page")
            .and_then(|g| g.child("instagram-feed"))
            .and_then(|f| f.child("enabled"));
        assert_eq!(feed, Some(&ToggleNode::Flag(false)));
        let chatbot = toggles.child("chatbot").and_then(|c| c.child("enabled"));
        assert_eq!(chatbot, Some(&ToggleNode::Flag(false)));
    }

    #[test]
    fn test_enabled_element_is_always_a_flag() {
        let config = parse(
            r#"<site-config><feature-toggles>
                <reviews><enabled>true<carousel/></enabled></reviews>
                <chatbot><enabled note="x"/></chatbot>
            </feature-toggles></site-config>"#,
        )
        .unwrap();
        let toggles = &config.feature_toggles;
        let reviews = toggles.child("reviews").and_then(|r| r.child("enabled"));
        assert_eq!(reviews, Some(&ToggleNode::Flag(true)));
        let chatbot = toggles.child("chatbot").and_then(|c| c.child("enabled"));
        assert_eq!(chatbot, Some(&ToggleNode::Flag(false)));
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let config = parse("<site-config/>").unwrap();
        assert!(config.services.is_empty());
        assert_eq!(config.company.name, "");
        assert!(config.pages.is_empty());
        assert!(config.feature_toggles.is_branch());
    }

    #[test]
    fn test_company_hours_both_shapes() {
        let config = parse(
            r#"<site-config><company><name> Acme Builders </name><founded>1998</founded>
                <hours><day name="monday">8:00 - 18:00</day><sunday>Closed</sunday></hours>
            </company></site-config>"#,
        )
        .unwrap();
        assert_eq!(config.company.name, "Acme Builders");
        assert_eq!(config.company.founded, Some(1998));
        assert_eq!(config.company.hours[0].day, "monday");
        assert_eq!(config.company.hours[1].day, "sunday");
        assert_eq!(config.company.hours[1].hours, "Closed");
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let err = parse("<site-config><company></site-config>").unwrap_err();
        assert!(matches!(err, crate::DocumentError::Syntax { .. }));
    }
}
