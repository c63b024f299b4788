use super::{
    api::ProxyApi,
    phase::{FormEvent, FormPhase, FormStateMachine, Visibility},
    validation::{validate_number_to_generate, validate_temperature},
    view::{Label, NameResults},
};
use crate::{
    Result,
    models::{LanguageModelRequest, LanguageModelResponse},
};
use std::sync::Arc;
use tracing::{info, warn};

pub const GENERIC_ERROR: &str =
    "Sorry, there was an error getting your new pokémon name. Try again?";
pub const TEMPERATURE_LABEL: &str =
    "Provide a value between 0.5 and 5. The higher the number the more random the names:";
pub const NUMBER_TO_GENERATE_LABEL: &str =
    "Pick a number of names to generate between 1 and 15 (inclusive)!";

/// The name generation panel: two numeric inputs, a results area and a
/// "generate again" control.
pub struct LanguageModel {
    api: Arc<dyn ProxyApi>,
    machine: FormStateMachine,
    temperature: String,
    number_to_generate: String,
    temperature_label: Label,
    number_label: Label,
    results: NameResults,
}

impl LanguageModel {
    pub fn new(api: Arc<dyn ProxyApi>) -> Self {
        Self {
            api,
            machine: FormStateMachine::new("LanguageModel"),
            temperature: String::new(),
            number_to_generate: String::new(),
            temperature_label: Label::normal(TEMPERATURE_LABEL),
            number_label: Label::normal(NUMBER_TO_GENERATE_LABEL),
            results: NameResults::Empty,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.machine.current_phase()
    }

    pub fn visibility(&self) -> Visibility {
        self.phase().visibility()
    }

    pub fn results(&self) -> &NameResults {
        &self.results
    }

    pub fn temperature_label(&self) -> &Label {
        &self.temperature_label
    }

    pub fn number_label(&self) -> &Label {
        &self.number_label
    }

    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    pub fn number_to_generate(&self) -> &str {
        &self.number_to_generate
    }

    pub fn set_temperature(&mut self, value: impl Into<String>) {
        self.temperature = value.into();
    }

    pub fn set_number_to_generate(&mut self, value: impl Into<String>) {
        self.number_to_generate = value.into();
    }

    /// Checks both inputs, temperature first. A failing field gets the error
    /// text in its label; a passing temperature gets its default label back.
    fn validate(&mut self) -> Option<LanguageModelRequest> {
        let temperature = match validate_temperature(&self.temperature) {
            Ok(value) => {
                self.temperature_label = Label::normal(TEMPERATURE_LABEL);
                value
            }
            Err(e) => {
                self.temperature_label = Label::error(e.to_string());
                return None;
            }
        };

        let number_to_generate = match validate_number_to_generate(&self.number_to_generate) {
            Ok(value) => {
                self.number_label = Label::normal(NUMBER_TO_GENERATE_LABEL);
                value
            }
            Err(e) => {
                self.number_label = Label::error(e.to_string());
                return None;
            }
        };

        Some(LanguageModelRequest {
            temperature,
            number_to_generate,
        })
    }

    /// Validates the inputs and, if they pass, asks the proxy for names.
    /// Returns the phase the panel ends in; invalid input leaves it in `Input`.
    pub async fn submit(&mut self) -> Result<FormPhase> {
        self.machine.ensure_accepts(FormEvent::Submit)?;

        let Some(request) = self.validate() else {
            info!("LanguageModel input rejected by validation");
            return Ok(self.phase());
        };

        self.results = NameResults::Empty;
        self.machine.transition(FormEvent::Submit)?;

        let names = match self.api.generate_names(&request).await {
            Ok(body) => match serde_json::from_value::<LanguageModelResponse>(body) {
                Ok(response) => response.predicted_name.filter(|names| !names.is_empty()),
                Err(e) => {
                    warn!("Unexpected language model response: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Language model request failed: {}", e);
                None
            }
        };

        match names {
            Some(names) => {
                info!("Received {} generated names", names.len());
                self.results = NameResults::from_names(names);
                self.machine.transition(FormEvent::ResponseSucceeded)?;
            }
            None => {
                self.results = NameResults::Message(GENERIC_ERROR.to_string());
                self.machine.transition(FormEvent::ResponseFailed)?;
            }
        }

        Ok(self.phase())
    }

    /// The "generate again" action: back to an empty form.
    pub fn generate_again(&mut self) -> Result<()> {
        self.machine.transition(FormEvent::Reset)?;
        self.temperature.clear();
        self.number_to_generate.clear();
        self.temperature_label = Label::normal(TEMPERATURE_LABEL);
        self.number_label = Label::normal(NUMBER_TO_GENERATE_LABEL);
        self.results = NameResults::Empty;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, frontend::api::MockProxyApi, frontend::view::LabelClass};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn panel_with(api: MockProxyApi, temperature: &str, number: &str) -> LanguageModel {
        let mut panel = LanguageModel::new(Arc::new(api));
        panel.set_temperature(temperature);
        panel.set_number_to_generate(number);
        panel
    }

    #[tokio::test]
    async fn test_single_name_is_plain_text() {
        let mut api = MockProxyApi::new();
        api.expect_generate_names()
            .withf(|request| request.temperature == 1.0 && request.number_to_generate == 1)
            .times(1)
            .returning(|_| Ok(json!({"predictedName": ["Pikachu"]})));

        let mut panel = panel_with(api, "1", "1");
        let phase = panel.submit().await.unwrap();

        assert_eq!(phase, FormPhase::Result);
        assert_eq!(panel.results(), &NameResults::Single("Pikachu".to_string()));
        assert_eq!(panel.results().to_html(), "Pikachu");
        assert!(panel.visibility().generate_again);
        assert!(!panel.visibility().spinner);
    }

    #[tokio::test]
    async fn test_four_names_use_two_grid_rows() {
        let mut api = MockProxyApi::new();
        api.expect_generate_names()
            .returning(|_| Ok(json!({"predictedName": ["A", "B", "C", "D"]})));

        let mut panel = panel_with(api, "2.5", "4");
        panel.submit().await.unwrap();

        let NameResults::Grid(grid) = panel.results() else {
            panic!("expected grid, got {:?}", panel.results());
        };
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.template_columns(), "repeat(3,minmax(100px, 1fr))");
        assert_eq!(grid.template_rows(), "repeat(2, minmax(30px, 50px))");
        assert!(panel.results().to_html().contains("<div>D</div>"));
    }

    #[tokio::test]
    async fn test_missing_names_show_generic_error() {
        let mut api = MockProxyApi::new();
        api.expect_generate_names().returning(|_| Ok(json!({})));

        let mut panel = panel_with(api, "1", "3");
        let phase = panel.submit().await.unwrap();

        assert_eq!(phase, FormPhase::Error);
        assert_eq!(
            panel.results(),
            &NameResults::Message(GENERIC_ERROR.to_string())
        );
        assert!(panel.visibility().generate_again);
    }

    #[tokio::test]
    async fn test_empty_names_show_generic_error() {
        let mut api = MockProxyApi::new();
        api.expect_generate_names()
            .returning(|_| Ok(json!({"predictedName": []})));

        let mut panel = panel_with(api, "1", "3");

        assert_eq!(panel.submit().await.unwrap(), FormPhase::Error);
    }

    #[tokio::test]
    async fn test_network_failure_shows_generic_error() {
        let mut api = MockProxyApi::new();
        api.expect_generate_names()
            .returning(|_| Err(Error::upstream("connection refused")));

        let mut panel = panel_with(api, "1", "3");

        assert_eq!(panel.submit().await.unwrap(), FormPhase::Error);
        assert_eq!(panel.results().to_html(), GENERIC_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_temperature_makes_no_request() {
        let mut api = MockProxyApi::new();
        api.expect_generate_names().never();

        let mut panel = panel_with(api, "9", "3");
        let phase = panel.submit().await.unwrap();

        assert_eq!(phase, FormPhase::Input);
        assert_eq!(panel.temperature_label().class, LabelClass::ValidationErrorLabel);
        assert_eq!(
            panel.temperature_label().text,
            "Value must be a number between 0.5 and 5, and 9 does not meet those conditions"
        );
        // Number is not checked once temperature fails.
        assert!(!panel.number_label().is_error());
        assert!(panel.visibility().form);
    }

    #[tokio::test]
    async fn test_fractional_count_annotates_number_label() {
        let mut api = MockProxyApi::new();
        api.expect_generate_names().never();

        let mut panel = panel_with(api, "1", "2.5");
        panel.submit().await.unwrap();

        assert!(!panel.temperature_label().is_error());
        assert_eq!(panel.temperature_label().text, TEMPERATURE_LABEL);
        assert_eq!(
            panel.number_label().text,
            "Please pass an integer between 1 and 15"
        );
    }

    #[tokio::test]
    async fn test_generate_again_clears_form() {
        let mut api = MockProxyApi::new();
        api.expect_generate_names()
            .returning(|_| Ok(json!({"predictedName": ["Eevee"]})));

        let mut panel = panel_with(api, "1", "1");
        panel.submit().await.unwrap();
        panel.generate_again().unwrap();

        assert_eq!(panel.phase(), FormPhase::Input);
        assert_eq!(panel.temperature(), "");
        assert_eq!(panel.number_to_generate(), "");
        assert_eq!(panel.results(), &NameResults::Empty);
        assert!(!panel.visibility().results);
        assert!(!panel.visibility().generate_again);
    }

    #[tokio::test]
    async fn test_submit_after_result_requires_reset() {
        let mut api = MockProxyApi::new();
        api.expect_generate_names()
            .times(1)
            .returning(|_| Ok(json!({"predictedName": ["Eevee"]})));

        let mut panel = panel_with(api, "1", "1");
        panel.submit().await.unwrap();

        assert!(matches!(
            panel.submit().await,
            Err(Error::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_generate_again_requires_a_response() {
        let panel_api = MockProxyApi::new();
        let mut panel = LanguageModel::new(Arc::new(panel_api));

        assert!(panel.generate_again().is_err());
    }
}
