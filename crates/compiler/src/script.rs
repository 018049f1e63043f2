//! Generation of the artifact script loaded by the page.
//!
//! The script defines `CompiledConfig`, assigns one instance to
//! `window.compiledConfig` and embeds the serialized artifact between the
//! payload markers so that the runtime can read it back without a script
//! engine.

use sitecfg_types::{CompiledArtifact, PAYLOAD_END, PAYLOAD_START};

/// Renders the artifact as a standalone script. Dev mode pretty-prints the
/// payload and logs to the console once loaded.
pub fn generate_script(artifact: &CompiledArtifact, dev_mode: bool) -> serde_json::Result<String> {
    let payload = if dev_mode {
        serde_json::to_string_pretty(artifact)?
    } else {
        serde_json::to_string(artifact)?
    };
    // `*/` only occurs inside JSON strings, where `\/` is a valid escape.
    let payload = payload.replace("*/", "*\\/");

    let mut script = String::with_capacity(payload.len() + CLASS_BODY.len() + 512);
    script.push_str(&header(artifact));
    script.push_str("(function (global) {\n    'use strict';\n\n");
    script.push_str(&format!("    const PAYLOAD = {PAYLOAD_START}{payload}{PAYLOAD_END};\n\n"));
    script.push_str(CLASS_BODY);
    script.push_str("\n    global.compiledConfig = new CompiledConfig(PAYLOAD);\n");
    script.push_str(
        "\n    if (typeof module !== 'undefined' && module.exports) {\n        module.exports = CompiledConfig;\n    }\n",
    );
    if dev_mode {
        script.push_str("\n    console.log('Compiled configuration loaded');\n");
    }
    script.push_str("})(typeof window !== 'undefined' ? window : globalThis);\n");
    Ok(script)
}

fn header(artifact: &CompiledArtifact) -> String {
    let name = match artifact.config.company.name.as_str() {
        "" => "the site",
        name => name,
    };
    format!(
        "/**\n * Compiled configuration for {name}\n * Generated from {source}\n * Source SHA-256: {digest}\n *\n * DO NOT EDIT THIS FILE DIRECTLY.\n * Edit the source document and recompile.\n */\n\n",
        name = name.replace("*/", "* /"),
        source = artifact.source.replace("*/", "* /"),
        digest = artifact.source_digest,
    )
}

const CLASS_BODY: &str = r#"    class CompiledConfig {
        constructor(payload) {
            this.source = payload.source;
            this.sourceDigest = payload.sourceDigest;
            this.config = payload.config;
            this.templates = payload.templates;
            this.cssVars = payload.cssVars;
            this.featureMap = payload.featureMap;
            this.loaded = payload.loaded === true;
        }

        getValue(path) {
            return path.split('.').reduce((obj, key) => (obj == null ? undefined : obj[key]), this.config);
        }

        isFeatureEnabled(featurePath) {
            return this.featureMap[featurePath] !== false;
        }

        getTemplate(templateName, index = 0) {
            const list = this.templates[templateName];
            return (Array.isArray(list) && list[index]) || '';
        }

        getAllTemplates(templateName) {
            const list = this.templates[templateName];
            return Array.isArray(list) ? list.slice() : [];
        }

        applyBrandingStyles(root) {
            const target = root || document.documentElement;
            Object.entries(this.cssVars).forEach(([property, value]) => {
                target.style.setProperty(property, value);
            });
        }

        getCompany() {
            return this.config.company || {};
        }

        getServices() {
            return this.config.services || [];
        }

        getTestimonials() {
            return this.config.testimonials || [];
        }

        getAccreditations() {
            return this.config.accreditations || [];
        }

        getGallery() {
            return this.config.gallery || [];
        }

        getPageContent(pageName) {
            const pages = this.config.pages || {};
            if (pages[pageName] && typeof pages[pageName] === 'object') {
                return pages[pageName];
            }
            const list = [].concat(pages.page || []);
            return list.find(page => page && page.name === pageName) || {};
        }

        getFormConfig(formName) {
            return (this.config.forms || {})[formName] || {};
        }

        getFormFields(formName) {
            const fields = this.getFormConfig(formName).fields;
            return fields && fields.field ? [].concat(fields.field) : [];
        }

        getFormField(formName, fieldName) {
            return this.getFormFields(formName).find(field => field.name === fieldName) || {};
        }

        getServiceAreas() {
            return this.config['service-areas'] || {};
        }

        getBusinessPolicies() {
            return this.config['business-policies'] || {};
        }

        getNavigation() {
            return (this.config.ui || {}).navigation || {};
        }

        getButtonText(buttonKey) {
            return this.lookupText(['buttons', buttonKey], buttonKey);
        }

        getLabel(labelKey) {
            return this.lookupText(['labels', labelKey], labelKey);
        }

        getMessage(messagePath) {
            return this.lookupText(['messages'].concat(messagePath.split('.')), messagePath);
        }

        getChatbotUI() {
            return (this.config.chatbot || {}).ui || {};
        }

        lookupText(parts, fallback) {
            let current = this.config.ui;
            for (const part of parts) {
                if (!current || typeof current !== 'object' || !(part in current)) {
                    return fallback;
                }
                current = current[part];
            }
            return typeof current === 'string' && current !== '' ? current : fallback;
        }
    }
"#;
