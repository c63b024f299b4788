//! Browser-side logic of the model panels: input validation, the phase
//! machine that drives each panel, result layout, and the client that talks
//! to the proxy routes.

pub mod api;
pub mod conv_model;
pub mod language_model;
pub mod phase;
pub mod validation;
pub mod view;

pub use api::{ProxyApi, ProxyClient};
pub use conv_model::{Classification, ClassificationResults, ConvModel};
pub use language_model::LanguageModel;
pub use phase::{FormEvent, FormPhase, FormStateMachine, Visibility};
pub use validation::{ValidationError, validate_number_to_generate, validate_temperature};
pub use view::{Label, LabelClass, NameGrid, NameResults};
