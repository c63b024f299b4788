use super::{
    api::ProxyApi,
    phase::{FormEvent, FormPhase, FormStateMachine, Visibility},
    view::escape_html,
};
use crate::{
    Result,
    models::{ConvModelResponse, ImageUpload},
};
use std::sync::Arc;
use tracing::{info, warn};

pub const CLASSIFY_ERROR: &str = "Sorry, there was an error classifying your image. Try again?";
pub const NO_IMAGE_SELECTED: &str = "Please select an image to classify";

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub most_likely_class: String,
    /// Highest probability first.
    pub probabilities: Vec<(String, f64)>,
}

impl From<ConvModelResponse> for Classification {
    fn from(response: ConvModelResponse) -> Self {
        let mut probabilities: Vec<(String, f64)> = response.all_probs.into_iter().collect();
        probabilities.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            most_likely_class: response.most_likely_class,
            probabilities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ClassificationResults {
    #[default]
    Empty,
    Classified(Classification),
    Message(String),
}

impl ClassificationResults {
    pub fn to_html(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Message(text) => escape_html(text),
            Self::Classified(classification) => {
                let rows: String = classification
                    .probabilities
                    .iter()
                    .map(|(class, prob)| {
                        format!("<li>{}: {:.1}%</li>", escape_html(class), prob * 100.0)
                    })
                    .collect();
                format!(
                    "<p>{}</p><ul>{}</ul>",
                    escape_html(&classification.most_likely_class),
                    rows
                )
            }
        }
    }
}

/// The image classification panel: a file picker, a results area and a
/// "classify again" control.
pub struct ConvModel {
    api: Arc<dyn ProxyApi>,
    machine: FormStateMachine,
    selected: Option<ImageUpload>,
    validation_message: Option<String>,
    results: ClassificationResults,
}

impl ConvModel {
    pub fn new(api: Arc<dyn ProxyApi>) -> Self {
        Self {
            api,
            machine: FormStateMachine::new("ConvModel"),
            selected: None,
            validation_message: None,
            results: ClassificationResults::Empty,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.machine.current_phase()
    }

    pub fn visibility(&self) -> Visibility {
        self.phase().visibility()
    }

    pub fn results(&self) -> &ClassificationResults {
        &self.results
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    pub fn select_image(&mut self, image: ImageUpload) {
        self.selected = Some(image);
    }

    pub async fn submit(&mut self) -> Result<FormPhase> {
        self.machine.ensure_accepts(FormEvent::Submit)?;

        let Some(image) = self.selected.clone().filter(|image| !image.bytes.is_empty()) else {
            self.validation_message = Some(NO_IMAGE_SELECTED.to_string());
            return Ok(self.phase());
        };

        self.validation_message = None;
        self.results = ClassificationResults::Empty;
        self.machine.transition(FormEvent::Submit)?;

        let classification = match self.api.classify_image(&image).await {
            Ok(body) => match serde_json::from_value::<ConvModelResponse>(body) {
                Ok(response) => Some(Classification::from(response)),
                Err(e) => {
                    warn!("Unexpected conv model response: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Conv model request failed: {}", e);
                None
            }
        };

        match classification {
            Some(classification) => {
                info!("Image classified as {}", classification.most_likely_class);
                self.results = ClassificationResults::Classified(classification);
                self.machine.transition(FormEvent::ResponseSucceeded)?;
            }
            None => {
                self.results = ClassificationResults::Message(CLASSIFY_ERROR.to_string());
                self.machine.transition(FormEvent::ResponseFailed)?;
            }
        }

        Ok(self.phase())
    }

    pub fn classify_again(&mut self) -> Result<()> {
        self.machine.transition(FormEvent::Reset)?;
        self.selected = None;
        self.validation_message = None;
        self.results = ClassificationResults::Empty;
        Ok(())
    }
}
