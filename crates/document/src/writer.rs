//! Serializes a [`Configuration`] back into the XML document format.
//!
//! The output parses back into an equal configuration, which is what the
//! round-trip tests rely on.

use crate::error::DocumentError;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use sitecfg_types::node::TEXT_KEY;
use sitecfg_types::toggle::ENABLED_KEY;
use sitecfg_types::{Configuration, Node, ToggleNode};
use std::collections::BTreeMap;

pub const ROOT_ELEMENT: &str = "site-config";

/// Writes `config` as an indented XML document.
pub fn to_document(config: &Configuration) -> Result<String, DocumentError> {
    let mut w = DocWriter::new();
    w.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.open(ROOT_ELEMENT, &[])?;

    company(&mut w, config)?;
    design(&mut w, config)?;
    listings(&mut w, config)?;
    widgets(&mut w, config)?;

    if !is_empty_branch(&config.feature_toggles) {
        toggle(&mut w, "feature-toggles", &config.feature_toggles)?;
    }
    for (name, node) in [
        ("pages", &config.pages),
        ("ui", &config.ui),
        ("forms", &config.forms),
        ("business-policies", &config.business_policies),
        ("service-areas", &config.service_areas),
    ] {
        if *node != Node::default() {
            w.node(name, node)?;
        }
    }

    w.close(ROOT_ELEMENT)?;
    w.finish()
}

struct DocWriter {
    inner: Writer<Vec<u8>>,
}

impl DocWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), DocumentError> {
        self.inner
            .write_event(event)
            .map_err(|e| DocumentError::Write(e.to_string()))
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocumentError> {
        let mut start = BytesStart::new(name);
        for attr in attrs {
            start.push_attribute(*attr);
        }
        self.event(Event::Start(start))
    }

    fn close(&mut self, name: &str) -> Result<(), DocumentError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), DocumentError> {
        let mut start = BytesStart::new(name);
        for attr in attrs {
            start.push_attribute(*attr);
        }
        self.event(Event::Empty(start))
    }

    /// Writes `<name>value</name>`, always, even when `value` is blank.
    fn text(&mut self, name: &str, value: &str) -> Result<(), DocumentError> {
        if value.is_empty() {
            return self.empty(name, &[]);
        }
        self.open(name, &[])?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.close(name)
    }

    /// Writes a text leaf only when it carries a value.
    fn field(&mut self, name: &str, value: &str) -> Result<(), DocumentError> {
        if value.is_empty() {
            return Ok(());
        }
        self.text(name, value)
    }

    fn fields(&mut self, pairs: &[(&str, &str)]) -> Result<(), DocumentError> {
        for (name, value) in pairs {
            self.field(name, value)?;
        }
        Ok(())
    }

    fn token_map(
        &mut self,
        name: &str,
        map: &BTreeMap<String, String>,
    ) -> Result<(), DocumentError> {
        if map.is_empty() {
            return Ok(());
        }
        self.open(name, &[])?;
        for (k, v) in map {
            self.text(k, v)?;
        }
        self.close(name)
    }

    /// Writes a generic node. Arrays expand into repeated `name` elements.
    fn node(&mut self, name: &str, node: &Node) -> Result<(), DocumentError> {
        match node {
            Node::Text(s) => self.text(name, s),
            Node::Array(items) => {
                for item in items {
                    self.node(name, item)?;
                }
                Ok(())
            }
            Node::Object(map) => {
                self.open(name, &[])?;
                if let Some(Node::Text(t)) = map.get(TEXT_KEY) {
                    self.event(Event::Text(BytesText::new(t)))?;
                }
                for (k, v) in map.iter().filter(|(k, _)| k.as_str() != TEXT_KEY) {
                    self.node(k, v)?;
                }
                self.close(name)
            }
        }
    }

    fn finish(self) -> Result<String, DocumentError> {
        String::from_utf8(self.inner.into_inner()).map_err(|e| DocumentError::Write(e.to_string()))
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn company(w: &mut DocWriter, config: &Configuration) -> Result<(), DocumentError> {
    let c = &config.company;
    w.open("company", &[])?;
    w.fields(&[
        ("name", &c.name),
        ("tagline", &c.tagline),
        ("description", &c.description),
        ("logo", &c.logo),
    ])?;
    if let Some(year) = c.founded {
        w.text("founded", &year.to_string())?;
    }

    w.open("contact", &[])?;
    w.fields(&[
        ("phone", &c.contact.phone),
        ("email", &c.contact.email),
        ("emergency-phone", &c.contact.emergency_phone),
    ])?;
    let a = &c.contact.address;
    w.open("address", &[])?;
    w.fields(&[
        ("street", &a.street),
        ("city", &a.city),
        ("county", &a.county),
        ("postcode", &a.postcode),
        ("country", &a.country),
    ])?;
    w.close("address")?;
    w.close("contact")?;

    if !c.hours.is_empty() {
        w.open("hours", &[])?;
        for h in &c.hours {
            w.open("day", &[("name", &h.day)])?;
            w.event(Event::Text(BytesText::new(&h.hours)))?;
            w.close("day")?;
        }
        w.close("hours")?;
    }
    w.token_map("social", &c.social)?;
    w.close("company")
}

fn design(w: &mut DocWriter, config: &Configuration) -> Result<(), DocumentError> {
    w.open("branding", &[])?;
    w.token_map("colors", &config.design.colors)?;
    w.token_map("typography", &config.design.typography)?;
    w.close("branding")
}

fn listings(w: &mut DocWriter, config: &Configuration) -> Result<(), DocumentError> {
    w.open("services", &[])?;
    for s in &config.services {
        w.open("service", &[("id", &s.id)])?;
        w.fields(&[
            ("name", &s.name),
            ("description", &s.description),
            ("icon", &s.icon),
            ("duration", &s.duration),
            ("price-range", &s.price_range),
            ("featured-image", &s.image),
        ])?;
        w.close("service")?;
    }
    w.close("services")?;

    w.open("accreditations", &[])?;
    for a in &config.accreditations {
        w.open("certification", &[("id", &a.id)])?;
        w.fields(&[
            ("name", &a.name),
            ("number", &a.number),
            ("issuer", &a.issuer),
            ("valid-until", &a.valid_until),
            ("logo", &a.logo),
        ])?;
        if let Some(url) = &a.verification_url {
            w.field("verification-url", url)?;
        }
        w.close("certification")?;
    }
    w.close("accreditations")?;

    w.open("gallery", &[])?;
    for p in &config.gallery {
        w.open("project", &[("id", &p.id)])?;
        w.fields(&[
            ("title", &p.title),
            ("description", &p.description),
            ("category", &p.category),
            ("location", &p.location),
            ("duration", &p.duration),
        ])?;
        if let Some(year) = p.year {
            w.text("year", &year.to_string())?;
        }
        if !p.images.is_empty() {
            w.open("images", &[])?;
            for img in &p.images {
                w.text("image", img)?;
            }
            w.close("images")?;
        }
        w.close("project")?;
    }
    w.close("gallery")?;

    w.open("testimonials", &[])?;
    for t in &config.testimonials {
        w.open("testimonial", &[])?;
        w.fields(&[("name", &t.name), ("location", &t.location)])?;
        w.text("rating", &t.rating.to_string())?;
        w.fields(&[
            ("text", &t.text),
            ("project-type", &t.project_type),
            ("date", &t.date),
        ])?;
        w.close("testimonial")?;
    }
    w.close("testimonials")
}

fn widgets(w: &mut DocWriter, config: &Configuration) -> Result<(), DocumentError> {
    let hero = &config.hero_slider;
    let interval = hero.interval_ms.to_string();
    w.open(
        "hero-slider",
        &[("autoplay", bool_str(hero.autoplay)), ("interval", &interval)],
    )?;
    for s in &hero.slides {
        w.open("slide", &[])?;
        w.fields(&[
            ("title", &s.title),
            ("subtitle", &s.subtitle),
            ("image", &s.image),
            ("cta-text", &s.cta_text),
            ("cta-link", &s.cta_link),
        ])?;
        w.close("slide")?;
    }
    w.close("hero-slider")?;

    let bar = &config.top_bar;
    w.open("top-bar", &[("enabled", bool_str(bar.enabled))])?;
    w.fields(&[
        ("message", &bar.message),
        ("phone", &bar.phone),
        ("email", &bar.email),
    ])?;
    w.close("top-bar")?;

    let bot = &config.chatbot;
    w.open("chatbot", &[("enabled", bool_str(bot.enabled))])?;
    w.fields(&[("name", &bot.name), ("greeting", &bot.greeting)])?;
    if !bot.quick_replies.is_empty() {
        w.open("quick-replies", &[])?;
        for r in &bot.quick_replies {
            w.text("reply", r)?;
        }
        w.close("quick-replies")?;
    }
    if bot.ui != Node::default() {
        w.node("ui", &bot.ui)?;
    }
    w.close("chatbot")?;

    calendar(w, config)?;

    let seo = &config.seo;
    w.open("seo", &[])?;
    w.fields(&[
        ("title", &seo.title),
        ("description", &seo.description),
        ("keywords", &seo.keywords),
        ("og-image", &seo.og_image),
        ("canonical-url", &seo.canonical_url),
    ])?;
    w.close("seo")
}

fn calendar(w: &mut DocWriter, config: &Configuration) -> Result<(), DocumentError> {
    let cal = &config.calendar;
    w.open("calendar", &[("enabled", bool_str(cal.enabled))])?;
    if !cal.working_hours.is_empty() {
        w.open("working-hours", &[])?;
        for d in &cal.working_hours {
            w.empty(
                "day",
                &[
                    ("name", &d.day),
                    ("open", bool_str(d.open)),
                    ("start", &d.start),
                    ("end", &d.end),
                ],
            )?;
        }
        w.close("working-hours")?;
    }
    if !cal.appointment_types.is_empty() {
        w.open("appointment-types", &[])?;
        for t in &cal.appointment_types {
            let duration = t.duration_minutes.to_string();
            w.open("type", &[("id", &t.id), ("duration", &duration)])?;
            w.fields(&[("name", &t.name), ("description", &t.description)])?;
            w.close("type")?;
        }
        w.close("appointment-types")?;
    }
    if !cal.blackout_dates.is_empty() {
        w.open("blackout-dates", &[])?;
        for d in &cal.blackout_dates {
            w.text("date", d)?;
        }
        w.close("blackout-dates")?;
    }
    w.text("buffer-minutes", &cal.buffer_minutes.to_string())?;
    w.text("notice-minutes", &cal.notice_minutes.to_string())?;
    w.close("calendar")
}

fn is_empty_branch(node: &ToggleNode) -> bool {
    matches!(node, ToggleNode::Branch(map) if map.is_empty())
}

/// Writes a toggle branch, folding its `enabled` flag into an attribute.
fn toggle(w: &mut DocWriter, name: &str, node: &ToggleNode) -> Result<(), DocumentError> {
    match node {
        ToggleNode::Flag(b) => w.text(name, bool_str(*b)),
        ToggleNode::Text(s) => w.text(name, s),
        ToggleNode::Branch(map) => {
            let enabled = map.get(ENABLED_KEY).and_then(ToggleNode::as_flag);
            let attrs: Vec<(&str, &str)> = enabled
                .map(|b| vec![(ENABLED_KEY, bool_str(b))])
                .unwrap_or_default();
            let children: Vec<_> = map.iter().filter(|(k, _)| k.as_str() != ENABLED_KEY).collect();
            if children.is_empty() {
                return w.empty(name, &attrs);
            }
            w.open(name, &attrs)?;
            for (k, v) in children {
                toggle(w, k, v)?;
            }
            w.close(name)
        }
    }
}
