//! Upload flow and the single "current result" slot behind the advisor widget.
//!
//! Every accepted upload gets a ticket. Decoding may finish after the user has
//! already picked another file; completing any ticket but the latest one is a
//! no-op, so a superseded upload can never overwrite a newer result.

use std::rc::Rc;

use log::{info, warn};

use crate::classifier::{Classification, classify_with};
use crate::config::ClassifierConfig;
use crate::error::{Error, Result};
use crate::loader::{self, ImageFile};

/// The uploaded image as the host page should preview it.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub media_type: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Rc<[u8]>,
}

/// Everything the widget renders. Replaced as a whole on every transition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidgetState {
    pub preview: Option<Preview>,
    pub error: Option<String>,
    pub result: Option<Classification>,
    pub loading: bool,
}

/// Handle for an accepted upload attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn id(self) -> u64 {
        self.0
    }

    pub fn from_id(id: u64) -> Self {
        Self(id)
    }
}

/// What happened to a completed upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The result (or its error) is now the current state.
    Applied,
    /// A newer upload started in the meantime; the bytes were ignored.
    Superseded,
}

#[derive(Clone, Debug)]
struct PendingUpload {
    ticket: UploadTicket,
    media_type: String,
}

pub struct AdvisorWidget {
    config: ClassifierConfig,
    state: WidgetState,
    issued: u64,
    pending: Option<PendingUpload>,
}

impl AdvisorWidget {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: WidgetState::default(),
            issued: 0,
            pending: None,
        })
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Start an upload for a file of `media_type`.
    ///
    /// A non-image type only raises the error indicator; whatever was shown
    /// before stays visible. An accepted type clears the previous preview and
    /// result so nothing stale is shown next to the new attempt.
    pub fn begin_upload(&mut self, media_type: &str) -> Result<UploadTicket> {
        if !loader::is_image_media_type(media_type) {
            warn!("rejected upload with media type {media_type:?}");
            let err = Error::InvalidInput {
                media_type: media_type.to_string(),
            };
            self.state = WidgetState {
                error: Some(err.user_message()),
                ..self.state.clone()
            };
            return Err(err);
        }

        self.issued += 1;
        let ticket = UploadTicket(self.issued);
        if let Some(previous) = self.pending.take() {
            info!("upload {} superseded by {}", previous.ticket.0, ticket.0);
        }
        self.pending = Some(PendingUpload {
            ticket,
            media_type: media_type.to_string(),
        });
        self.state = WidgetState {
            loading: true,
            ..WidgetState::default()
        };
        info!("upload {} accepted ({media_type})", ticket.0);
        Ok(ticket)
    }

    /// Finish the upload identified by `ticket` with the file's contents.
    ///
    /// Returns `Ok(Completion::Superseded)` without touching the state when the
    /// ticket is not the latest pending one. Decode and sampling failures are
    /// recorded in the state and also returned; a decoded image that cannot be
    /// sampled keeps its preview.
    pub fn complete_upload(&mut self, ticket: UploadTicket, bytes: Vec<u8>) -> Result<Completion> {
        let pending = match self.pending.take() {
            Some(pending) if pending.ticket == ticket => pending,
            other => {
                warn!("ignoring stale upload {}", ticket.0);
                self.pending = other;
                return Ok(Completion::Superseded);
            }
        };

        let file = ImageFile::new(pending.media_type, bytes);
        let image = match loader::load(&file) {
            Ok(image) => image,
            Err(err) => {
                warn!("upload {} failed to decode: {err}", ticket.0);
                self.state = WidgetState {
                    error: Some(err.user_message()),
                    ..WidgetState::default()
                };
                return Err(err);
            }
        };

        let (width, height) = image.dimensions();
        let outcome = classify_with(&image, &self.config);
        let preview = Preview {
            media_type: file.media_type,
            width,
            height,
            bytes: Rc::from(file.bytes),
        };

        match outcome {
            Ok(result) => {
                info!("upload {} classified as {}", ticket.0, result.label);
                self.state = WidgetState {
                    preview: Some(preview),
                    error: None,
                    result: Some(result),
                    loading: false,
                };
                Ok(Completion::Applied)
            }
            Err(err) => {
                // The image decoded, so it stays on screen next to the error.
                warn!("upload {} could not be classified: {err}", ticket.0);
                self.state = WidgetState {
                    preview: Some(preview),
                    error: Some(err.user_message()),
                    result: None,
                    loading: false,
                };
                Err(err)
            }
        }
    }

    /// Begin and complete an upload in one step.
    pub fn upload(&mut self, file: ImageFile) -> Result<&WidgetState> {
        let ticket = self.begin_upload(&file.media_type)?;
        self.complete_upload(ticket, file.bytes)?;
        Ok(&self.state)
    }

    /// Forget the current image, result and error, and any upload in flight.
    pub fn reset(&mut self) {
        self.pending = None;
        self.state = WidgetState::default();
    }
}

impl Default for AdvisorWidget {
    fn default() -> Self {
        Self {
            config: ClassifierConfig::default(),
            state: WidgetState::default(),
            issued: 0,
            pending: None,
        }
    }
}
