//! Configuration data model for the site.
//!
//! Every record here is plain data: the parser fills it, the compiler
//! serializes it into the generated artifact and the runtime reads it back.
//! All records implement `Default` so that an absent section is always a
//! well-typed empty value.

pub mod artifact;
pub mod model;
pub mod node;
pub mod style;
pub mod toggle;

pub use artifact::{ArtifactError, CompiledArtifact, PAYLOAD_END, PAYLOAD_START};
pub use model::{
    Accreditation, Address, AppointmentType, CalendarConfig, ChatbotConfig, CompanyInfo,
    Configuration, ContactInfo, DesignConfig, GalleryProject, HeroSlide, HeroSliderConfig,
    OpeningHours, SeoConfig, Service, Testimonial, TopBarConfig, WorkingDay,
};
pub use node::Node;
pub use style::StyleTable;
pub use toggle::ToggleNode;
