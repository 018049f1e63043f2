/// Two services, one toggle override, a design block and a free-form page.
pub const SMALL_SITE: &str = r#"<site-config>
    <company><name>Acme Builders</name><contact><phone>01234 567890</phone></contact></company>
    <branding>
        <colors><primary>#1a3a5c</primary><accentColor>#f5a623</accentColor></colors>
        <typography><heading>Montserrat</heading></typography>
    </branding>
    <services>
        <service id="kitchens"><name>Kitchens</name><price-range>£5,000+</price-range></service>
        <service id="bathrooms"><name>Bathrooms</name></service>
    </services>
    <testimonials>
        <testimonial><name>Jo</name><rating>12</rating><text>Brilliant</text></testimonial>
    </testimonials>
    <feature-toggles>
        <chatbot enabled="false"/>
        <gallery-page enabled="true"><instagram-feed enabled="false"/></gallery-page>
    </feature-toggles>
    <pages><page name="index"><hero><title>Welcome</title></hero></page></pages>
</site-config>"#;

/// Syntactically broken: `<company>` is never closed.
pub const MALFORMED: &str = "<site-config><company><name>Acme</name></site-config>";

/// Free-form section with repeated and single siblings.
pub const POLICIES: &str = r#"<site-config>
    <business-policies>
        <policy>Deposit on booking</policy>
        <policy>Staged payments</policy>
        <policy>Ten-year guarantee</policy>
    </business-policies>
    <service-areas><area><name>Leeds</name></area></service-areas>
</site-config>"#;
