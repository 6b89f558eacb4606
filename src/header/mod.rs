pub mod template;
pub mod detector;
pub mod injector;

// Re-export the main API for easier access
pub use template::{HeaderTemplate, HeaderVariant, TemplateCatalog};
pub use detector::is_compliant;
pub use injector::inject;
