//! # oxide-dynform
//!
//! Schema-driven forms: a declarative description of sections and fields
//! drives value state, validation, HTML rendering and submission.
//!
//! This crate provides:
//! - A serde-loadable schema ([`FormConfig`], [`FormSection`], [`FormField`])
//! - Per-field validation rules with a fixed evaluation order
//! - A value store and an error map keyed by field name
//! - One widget per field type, with a visible placeholder for unknown types
//! - A [`FormController`] that sequences validate, submit and reset
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_dynform::{FieldType, FormConfig, FormController, FormField, FormSection};
//! use oxide_dynform::validation::ValidationRule;
//!
//! let config = FormConfig::new("Kontakt").section(
//!     FormSection::new("contact", "Kontaktinformasjon")
//!         .field(FormField::new("name", "Navn", FieldType::Text).required())
//!         .field(
//!             FormField::new("postal_code", "Postnummer", FieldType::Text).validation(
//!                 ValidationRule::new()
//!                     .pattern("^[0-9]{4}$", "Postnummer må være 4 siffer")
//!                     .unwrap(),
//!             ),
//!         ),
//! );
//!
//! let mut controller = FormController::new(config).unwrap();
//! controller.blur("postal_code", "12a4").unwrap();
//! assert_eq!(controller.error("postal_code"), Some("Postnummer må være 4 siffer"));
//!
//! controller.input("postal_code", "0150").unwrap();
//! assert_eq!(controller.error("postal_code"), None);
//! ```
//!
//! ## Field Helpers
//!
//! ```rust
//! use oxide_dynform::fields::{email_field, number_field, select_field};
//!
//! let fields = vec![
//!     email_field("email", "E-post", Some("E-post er påkrevd"), "Ugyldig e-postformat"),
//!     number_field(
//!         "consumption",
//!         "Årlig forbruk (kWh)",
//!         Some((0.0, "Kan ikke være negativt")),
//!         None,
//!     ),
//!     select_field(
//!         "property_type",
//!         "Boligtype",
//!         vec![("apartment", "Leilighet"), ("house", "Enebolig")],
//!         None,
//!     ),
//! ];
//! assert!(fields[0].required);
//! ```
//!
//! ## Submission
//!
//! ```rust,no_run
//! # async fn run(config: oxide_dynform::FormConfig) -> oxide_dynform::Result<()> {
//! use oxide_dynform::{FormController, FormData, SubmitError, SubmitOutcome};
//!
//! let mut controller = FormController::new(config)?.with_handler(|data: FormData| async move {
//!     if data.is_empty() {
//!         return Err(SubmitError::Rejected("empty form".to_string()));
//!     }
//!     Ok(())
//! });
//!
//! match controller.submit().await {
//!     SubmitOutcome::Invalid { focus } => println!("fix {focus:?} first"),
//!     outcome => println!("{outcome:?}"),
//! }
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
pub mod fields;
mod form;
mod schema;
mod settings;
mod state;
mod submit;
pub mod validation;
mod value;
pub mod widgets;

pub use controller::FormController;
pub use error::{ErrorState, FormError, Result, SubmitError};
pub use form::{render_field, render_form};
pub use schema::{FieldType, FormConfig, FormField, FormSection, SelectOption};
pub use settings::{FormSettings, ValidationMessages};
pub use state::FormState;
pub use submit::{
    InFlight, PendingSubmit, SimulatedSubmit, SubmissionStatus, SubmitHandler, SubmitOutcome,
};
pub use value::{FieldValue, FormData};
