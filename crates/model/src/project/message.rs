use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::media::{AudioClip, Language};

/// Kind of an electronic message cluster.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ElectronicMessageType {
    #[default]
    Mail,
    Log,
    Fragment,
}

impl ElectronicMessageType {
    pub const ALL: [Self; 3] = [Self::Mail, Self::Log, Self::Fragment];
}

/// Authoritative data for one electronic message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectronicMessageState {
    /// Id of the chained follow-up message, if any.
    pub next_message: Option<usize>,
    pub is_interrupt: bool,
    pub title: String,
    pub sender: String,
    pub subject: String,
    pub verbose_text: String,
    pub terse_text: String,
    pub audio: BTreeMap<Language, AudioClip>,
}

impl ElectronicMessageState {
    /// Applies a partial update; present fields overwrite, absent fields stay.
    pub fn apply(&mut self, patch: &ElectronicMessageProperties) {
        if let Some(next_message) = patch.next_message {
            self.next_message = next_message;
        }
        if let Some(is_interrupt) = patch.is_interrupt {
            self.is_interrupt = is_interrupt;
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(sender) = &patch.sender {
            self.sender = sender.clone();
        }
        if let Some(subject) = &patch.subject {
            self.subject = subject.clone();
        }
        if let Some(verbose_text) = &patch.verbose_text {
            self.verbose_text = verbose_text.clone();
        }
        if let Some(terse_text) = &patch.terse_text {
            self.terse_text = terse_text.clone();
        }
    }

    /// Full properties snapshot, as echoed by mutations.
    pub fn properties(&self) -> ElectronicMessageProperties {
        ElectronicMessageProperties {
            next_message: Some(self.next_message),
            is_interrupt: Some(self.is_interrupt),
            title: Some(self.title.clone()),
            sender: Some(self.sender.clone()),
            subject: Some(self.subject.clone()),
            verbose_text: Some(self.verbose_text.clone()),
            terse_text: Some(self.terse_text.clone()),
        }
    }
}

/// Partial message update; `None` leaves a field unchanged.
///
/// `next_message` is doubly optional: the outer `Option` is patch presence,
/// the inner one is the chain link itself, so `Some(None)` unlinks while
/// `None` keeps the current link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectronicMessageProperties {
    pub next_message: Option<Option<usize>>,
    pub is_interrupt: Option<bool>,
    pub title: Option<String>,
    pub sender: Option<String>,
    pub subject: Option<String>,
    pub verbose_text: Option<String>,
    pub terse_text: Option<String>,
}
