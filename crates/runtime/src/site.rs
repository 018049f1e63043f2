//! The loaded configuration and its accessor surface.

use crate::style::{StyleSink, apply_styles};
use chrono::NaiveDate;
use serde_json::Value;
use sitecfg_toggles::ToggleError;
use sitecfg_types::{
    Accreditation, CalendarConfig, ChatbotConfig, CompanyInfo, CompiledArtifact, Configuration,
    GalleryProject, HeroSliderConfig, Node, SeoConfig, Service, StyleTable, Testimonial,
    ToggleNode, TopBarConfig,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

/// Which load strategy produced the active configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    Compiled,
    Parsed,
    Fallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provenance::Compiled => "compiled",
            Provenance::Parsed => "parsed",
            Provenance::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Notified after a debug override changes the toggle tree, so that
/// toggle-dependent sections can be shown or hidden again.
pub trait ToggleListener: Send + Sync {
    fn toggles_changed(&self, site: &SiteConfig);
}

impl<F> ToggleListener for F
where
    F: Fn(&SiteConfig) + Send + Sync,
{
    fn toggles_changed(&self, site: &SiteConfig) {
        self(site)
    }
}

/// An accreditation paired with its expiry state on a given day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccreditationStatus<'a> {
    pub accreditation: &'a Accreditation,
    pub expired: bool,
}

/// The active site configuration.
///
/// Read-only after load, apart from the toggle tree, which can be
/// overridden when debug toggles were enabled at construction. Every
/// accessor is total: absent content yields an empty value.
pub struct SiteConfig {
    provenance: Provenance,
    config: Configuration,
    tree: Value,
    templates: BTreeMap<String, Vec<String>>,
    styles: StyleTable,
    toggles: RwLock<ToggleNode>,
    debug_toggles: bool,
    listeners: Mutex<Vec<Arc<dyn ToggleListener>>>,
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("provenance", &self.provenance)
            .field("company", &self.config.company.name)
            .field("templates", &self.templates.len())
            .field("debug_toggles", &self.debug_toggles)
            .finish_non_exhaustive()
    }
}

impl SiteConfig {
    /// Adopts a compiled artifact with its templates and style table.
    pub fn from_artifact(artifact: CompiledArtifact, debug_toggles: bool) -> Self {
        Self::assemble(
            Provenance::Compiled,
            artifact.config,
            artifact.templates,
            artifact.css_vars,
            debug_toggles,
        )
    }

    /// Wraps a parsed or fallback configuration. Such configurations have no
    /// pre-rendered templates.
    pub fn from_config(provenance: Provenance, config: Configuration, debug_toggles: bool) -> Self {
        let styles = StyleTable::from_design(&config.design);
        Self::assemble(provenance, config, BTreeMap::new(), styles, debug_toggles)
    }

    fn assemble(
        provenance: Provenance,
        config: Configuration,
        templates: BTreeMap<String, Vec<String>>,
        styles: StyleTable,
        debug_toggles: bool,
    ) -> Self {
        let tree = serde_json::to_value(&config).unwrap_or_default();
        let toggles = RwLock::new(config.feature_toggles.clone());
        Self {
            provenance,
            config,
            tree,
            templates,
            styles,
            toggles,
            debug_toggles,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Writes the style table to the page's root style scope.
    pub fn apply_styles(&self, sink: &dyn StyleSink) {
        apply_styles(&self.styles, sink);
    }

    // --- Records ---

    pub fn company(&self) -> &CompanyInfo {
        &self.config.company
    }

    pub fn services(&self) -> &[Service] {
        &self.config.services
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.config.testimonials
    }

    pub fn accreditations(&self) -> &[Accreditation] {
        &self.config.accreditations
    }

    pub fn gallery(&self) -> &[GalleryProject] {
        &self.config.gallery
    }

    pub fn hero_slider(&self) -> &HeroSliderConfig {
        &self.config.hero_slider
    }

    pub fn top_bar(&self) -> &TopBarConfig {
        &self.config.top_bar
    }

    pub fn chatbot(&self) -> &ChatbotConfig {
        &self.config.chatbot
    }

    pub fn calendar(&self) -> &CalendarConfig {
        &self.config.calendar
    }

    pub fn seo(&self) -> &SeoConfig {
        &self.config.seo
    }

    /// Expiry state of every accreditation on `today`. Never cached.
    pub fn accreditation_statuses(&self, today: NaiveDate) -> Vec<AccreditationStatus<'_>> {
        self.config
            .accreditations
            .iter()
            .map(|accreditation| AccreditationStatus {
                accreditation,
                expired: accreditation.is_expired_on(today),
            })
            .collect()
    }

    /// [`accreditation_statuses`](Self::accreditation_statuses) for the
    /// local current date.
    pub fn current_accreditation_statuses(&self) -> Vec<AccreditationStatus<'_>> {
        self.accreditation_statuses(chrono::Local::now().date_naive())
    }

    // --- Free-form content ---

    /// Dotted lookup over the whole configuration, using document key
    /// names (`company.contact.phone`). `Null` when absent.
    ///
    /// Reflects the configuration as loaded; debug toggle overrides are
    /// only visible through [`is_enabled`](Self::is_enabled).
    pub fn value(&self, path: &str) -> Value {
        path.split('.')
            .try_fold(&self.tree, |node, key| match node {
                Value::Object(map) => map.get(key),
                Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Content for one page: `pages.<name>`, or else the `page` item whose
    /// `name` matches.
    pub fn page(&self, name: &str) -> &Node {
        let pages = &self.config.pages;
        match pages.get(name) {
            Some(page @ Node::Object(_)) => page,
            _ => pages
                .child_or_empty("page")
                .items()
                .into_iter()
                .find(|p| p.text_at("name", "") == name)
                .unwrap_or(Node::empty()),
        }
    }

    pub fn form(&self, name: &str) -> &Node {
        self.config.forms.child_or_empty(name)
    }

    /// Fields of a form, a single field being a one-element list.
    pub fn form_fields(&self, name: &str) -> Vec<&Node> {
        match self.form(name).path("fields.field") {
            Some(fields) => fields.items(),
            None => Vec::new(),
        }
    }

    pub fn form_field(&self, form: &str, field: &str) -> &Node {
        self.form_fields(form)
            .into_iter()
            .find(|f| f.text_at("name", "") == field)
            .unwrap_or(Node::empty())
    }

    pub fn service_areas(&self) -> &Node {
        &self.config.service_areas
    }

    pub fn business_policies(&self) -> &Node {
        &self.config.business_policies
    }

    pub fn navigation(&self) -> &Node {
        self.config.ui.child_or_empty("navigation")
    }

    pub fn chatbot_ui(&self) -> &Node {
        &self.config.chatbot.ui
    }

    // --- UI strings ---

    /// Text at a dotted path under `ui`, or the path itself.
    pub fn ui_text<'a>(&'a self, path: &'a str) -> &'a str {
        self.config.ui.text_at(path, path)
    }

    pub fn button_text<'a>(&'a self, key: &'a str) -> &'a str {
        self.ui_section_text("buttons", key)
    }

    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.ui_section_text("labels", key)
    }

    /// Message at a dotted path under `ui.messages`, e.g. `error.general`.
    pub fn message<'a>(&'a self, path: &'a str) -> &'a str {
        self.ui_section_text("messages", path)
    }

    fn ui_section_text<'a>(&'a self, section: &str, path: &'a str) -> &'a str {
        self.config.ui.child_or_empty(section).text_at(path, path)
    }

    // --- Templates ---

    /// Pre-rendered card markup. Empty unless the configuration came from a
    /// compiled artifact.
    pub fn template(&self, name: &str, index: usize) -> &str {
        self.templates
            .get(name)
            .and_then(|t| t.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn all_templates(&self, name: &str) -> &[String] {
        self.templates.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    // --- Feature toggles ---

    pub fn is_enabled(&self, path: &str) -> bool {
        self.toggles
            .read()
            .map(|toggles| sitecfg_toggles::is_enabled(&toggles, path))
            .unwrap_or(true)
    }

    /// A copy of the current toggle tree, overrides included.
    pub fn feature_toggles(&self) -> ToggleNode {
        self.toggles
            .read()
            .map(|toggles| toggles.clone())
            .unwrap_or_default()
    }

    pub fn debug_toggles(&self) -> bool {
        self.debug_toggles
    }

    pub fn add_toggle_listener(&self, listener: Arc<dyn ToggleListener>) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(listener);
        }
    }

    /// Overrides one toggle in memory and notifies every listener.
    ///
    /// Only available when the configuration was built with debug toggles.
    /// Not meant for concurrent writers.
    pub fn override_toggle(&self, path: &str, enabled: bool) -> Result<(), ToggleError> {
        if !self.debug_toggles {
            return Err(ToggleError::DebugDisabled);
        }
        {
            let mut toggles = self
                .toggles
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            sitecfg_toggles::set_enabled(&mut toggles, path, enabled)?;
        }
        log::info!("Debug override: '{path}' -> {enabled}");

        let listeners = self
            .listeners
            .lock()
            .map(|l| l.clone())
            .unwrap_or_default();
        for listener in listeners {
            listener.toggles_changed(self);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecfg_types::toggle::ENABLED_KEY;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn parsed(xml: &str, debug: bool) -> SiteConfig {
        let config = sitecfg_document::parse(xml).unwrap();
        SiteConfig::from_config(Provenance::Parsed, config, debug)
    }

    const UI_DOC: &str = r#"<site-config>
        <company><name>Acme</name><contact><phone>01234 567890</phone></contact></company>
        <ui>
            <buttons><get-quote>Get a Free Quote</get-quote></buttons>
            <labels><call-us>Call us</call-us></labels>
            <messages><error><general>Something went wrong</general></error></messages>
            <navigation><item>Home</item><item>Services</item></navigation>
        </ui>
        <pages>
            <index><hero><title>Welcome</title></hero></index>
            <page name="about"><title>About us</title></page>
            <page name="contact"><title>Contact</title></page>
        </pages>
        <forms>
            <contact-form>
                <fields>
                    <field name="name"><label>Your name</label></field>
                    <field name="email"><label>Email</label></field>
                </fields>
            </contact-form>
            <callback-form><fields><field name="phone"><label>Phone</label></field></fields></callback-form>
        </forms>
    </site-config>"#;

    #[test]
    fn test_ui_strings_fall_back_to_key() {
        let site = parsed(UI_DOC, false);
        assert_eq!(site.button_text("get-quote"), "Get a Free Quote");
        assert_eq!(site.button_text("book-now"), "book-now");
        assert_eq!(site.label("call-us"), "Call us");
        assert_eq!(site.message("error.general"), "Something went wrong");
        assert_eq!(site.message("error.timeout"), "error.timeout");
        assert_eq!(site.ui_text("labels.call-us"), "Call us");
        assert_eq!(site.navigation().child_or_empty("item").items().len(), 2);
    }

    #[test]
    fn test_page_lookup_by_key_and_name() {
        let site = parsed(UI_DOC, false);
        assert_eq!(site.page("index").text_at("hero.title", ""), "Welcome");
        assert_eq!(site.page("contact").text_at("title", ""), "Contact");
        assert!(site.page("missing").is_empty());
    }

    #[test]
    fn test_form_fields_normalize_single_field() {
        let site = parsed(UI_DOC, false);
        assert_eq!(site.form_fields("contact-form").len(), 2);
        assert_eq!(site.form_fields("callback-form").len(), 1);
        assert_eq!(
            site.form_field("contact-form", "email").text_at("label", ""),
            "Email"
        );
        assert!(site.form_field("contact-form", "phone").is_empty());
        assert!(site.form_fields("missing").is_empty());
    }

    #[test]
    fn test_value_lookup() {
        let site = parsed(UI_DOC, false);
        assert_eq!(site.value("company.contact.phone"), Value::from("01234 567890"));
        assert_eq!(site.value("company.missing.phone"), Value::Null);
        assert_eq!(site.value("ui.navigation.item.1"), Value::from("Services"));
    }

    #[test]
    fn test_templates_empty_without_artifact() {
        let site = parsed(UI_DOC, false);
        assert_eq!(site.template("service-card", 0), "");
        assert!(site.all_templates("service-card").is_empty());
    }

    #[test]
    fn test_override_requires_debug_mode() {
        let site = parsed("<site-config/>", false);
        assert_eq!(
            site.override_toggle("chatbot", false),
            Err(ToggleError::DebugDisabled)
        );
        assert!(site.is_enabled("chatbot"));
    }

    #[test]
    fn test_override_notifies_listeners() {
        let site = parsed(
            r#"<site-config><feature-toggles><chatbot enabled="true"/></feature-toggles></site-config>"#,
            true,
        );
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        site.add_toggle_listener(Arc::new(move |s: &SiteConfig| {
            assert!(!s.is_enabled("chatbot"));
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        site.override_toggle("chatbot", false).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!site.is_enabled("chatbot"));
        assert_eq!(
            site.feature_toggles().child("chatbot").and_then(|c| c.child(ENABLED_KEY)),
            Some(&ToggleNode::Flag(false))
        );
        assert!(matches!(
            site.override_toggle("bad path", true),
            Err(ToggleError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_override_of_enabled_key_disables_parent() {
        let site = parsed(
            r#"<site-config><feature-toggles><chatbot enabled="true"/></feature-toggles></site-config>"#,
            true,
        );
        site.override_toggle("chatbot.enabled", false).unwrap();
        assert!(!site.is_enabled("chatbot"));
        assert_eq!(
            sitecfg_toggles::flatten(&site.feature_toggles()).get("chatbot"),
            Some(&false)
        );
    }

    #[test]
    fn test_accreditation_statuses_follow_the_date() {
        let site = parsed(
            r#"<site-config><accreditations>
                <certification id="gas-safe"><valid-until>2025-06-30</valid-until></certification>
                <certification id="trustmark"><valid-until>2030-01-01</valid-until></certification>
            </accreditations></site-config>"#,
            false,
        );
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let expired: Vec<_> = site
            .accreditation_statuses(day(2025, 7, 1))
            .iter()
            .map(|s| (s.accreditation.id.as_str(), s.expired))
            .collect();
        assert_eq!(expired, vec![("gas-safe", true), ("trustmark", false)]);
        assert!(site.accreditation_statuses(day(2025, 1, 1)).iter().all(|s| !s.expired));
    }
}
