//! Pre-rendered card markup for the repeated-list sections.

use crate::error::CompileError;
use handlebars::Handlebars;
use serde_json::{Value, json};
use sitecfg_types::Configuration;
use std::collections::BTreeMap;

pub const SERVICE_CARD: &str = "service-card";
pub const TESTIMONIAL: &str = "testimonial";
pub const ACCREDITATION: &str = "accreditation";
pub const GALLERY_PROJECT: &str = "gallery-project";

const SERVICE_CARD_TEMPLATE: &str = r#"
<div class="service-card" data-service="{{id}}">
    <div class="service-image" style="background-image: url('{{image}}')"></div>
    <div class="card-header">
        <div class="card-icon">{{icon}}</div>
        <h3 class="card-title">{{name}}</h3>
    </div>
    <div class="card-content">
        <p>{{description}}</p>
        <div class="service-meta">
            <span class="duration">Duration: {{duration}}</span>
            <span class="price-range">From: {{price_range}}</span>
        </div>
    </div>
</div>
"#;

const TESTIMONIAL_TEMPLATE: &str = r#"
<div class="testimonial-card">
    <div class="testimonial-rating">
        <span class="stars">{{stars}}</span>
    </div>
    <blockquote class="testimonial-text">"{{text}}"</blockquote>
    <div class="testimonial-author">
        <strong>{{name}}</strong>
        <div class="testimonial-location">{{location}}</div>
        <div class="testimonial-project">{{project_type}}</div>
    </div>
</div>
"#;

const ACCREDITATION_TEMPLATE: &str = r#"
<div class="accreditation-item" data-cert="{{id}}">
    <img src="{{logo}}" alt="{{name}}" class="accreditation-logo">
    <div class="accreditation-name">{{name}}</div>
    <div class="accreditation-number">No: {{number}}</div>
    <div class="accreditation-validity">Valid until: {{valid_until}}</div>
</div>
"#;

const GALLERY_PROJECT_TEMPLATE: &str = r#"
<div class="gallery-item" data-project="{{id}}" data-category="{{category}}">
    {{#if cover}}<img src="{{cover}}" alt="{{title}}" class="gallery-image">{{/if}}
    <div class="gallery-overlay">
        <h3 class="gallery-title">{{title}}</h3>
        <p class="gallery-location">{{location}}</p>
        <span class="gallery-duration">{{duration}}</span>
    </div>
</div>
"#;

/// Renders card fragments with HTML-escaped field values.
pub struct CardRenderer {
    engine: Handlebars<'static>,
}

impl CardRenderer {
    pub fn new() -> Result<Self, CompileError> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(false);
        engine.register_template_string(SERVICE_CARD, SERVICE_CARD_TEMPLATE)?;
        engine.register_template_string(TESTIMONIAL, TESTIMONIAL_TEMPLATE)?;
        engine.register_template_string(ACCREDITATION, ACCREDITATION_TEMPLATE)?;
        engine.register_template_string(GALLERY_PROJECT, GALLERY_PROJECT_TEMPLATE)?;
        Ok(CardRenderer { engine })
    }

    /// Renders every card, grouped by template name and indexed by list
    /// position. Empty lists produce no entry.
    pub fn render_all(
        &self,
        config: &Configuration,
    ) -> Result<BTreeMap<String, Vec<String>>, CompileError> {
        let services = config.services.iter().map(|s| {
            json!({
                "id": s.id,
                "image": s.image,
                "icon": s.icon,
                "name": s.name,
                "description": s.description,
                "duration": s.duration,
                "price_range": s.price_range,
            })
        });
        let testimonials = config.testimonials.iter().map(|t| {
            json!({
                "stars": t.stars(),
                "text": t.text,
                "name": t.name,
                "location": t.location,
                "project_type": t.project_type,
            })
        });
        let accreditations = config.accreditations.iter().map(|a| {
            json!({
                "id": a.id,
                "logo": a.logo,
                "name": a.name,
                "number": a.number,
                "valid_until": a.valid_until,
            })
        });
        let gallery = config.gallery.iter().map(|p| {
            json!({
                "id": p.id,
                "category": p.category,
                "cover": p.images.first(),
                "title": p.title,
                "location": p.location,
                "duration": p.duration,
            })
        });

        let mut templates = BTreeMap::new();
        self.render_group(&mut templates, SERVICE_CARD, services)?;
        self.render_group(&mut templates, TESTIMONIAL, testimonials)?;
        self.render_group(&mut templates, ACCREDITATION, accreditations)?;
        self.render_group(&mut templates, GALLERY_PROJECT, gallery)?;
        Ok(templates)
    }

    fn render_group(
        &self,
        templates: &mut BTreeMap<String, Vec<String>>,
        name: &str,
        contexts: impl Iterator<Item = Value>,
    ) -> Result<(), CompileError> {
        let rendered = contexts
            .map(|ctx| Ok(self.engine.render(name, &ctx)?.trim().to_string()))
            .collect::<Result<Vec<_>, CompileError>>()?;
        if !rendered.is_empty() {
            log::debug!("Rendered {} '{}' fragments", rendered.len(), name);
            templates.insert(name.to_string(), rendered);
        }
        Ok(())
    }
}
