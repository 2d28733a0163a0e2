#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;

use std::collections::BTreeMap;

use strum::EnumIter;
use strum::IntoEnumIterator;

use super::Role;
use super::Transcript;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, EnumIter, strum::Display)]
pub enum ProfileField {
    #[strum(serialize = "Subject")]
    Subject,
    #[strum(serialize = "Learning goals")]
    Goals,
    #[strum(serialize = "Daily study time")]
    DailyTime,
    #[strum(serialize = "Skill level")]
    SkillLevel,
    #[strum(serialize = "Learning style")]
    LearningStyle,
}

impl ProfileField {
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ProfileField::Subject => return &["subject", "topic", "focus", "study", "learn"],
            ProfileField::Goals => return &["goal", "achieve", "aim", "objective", "exam"],
            ProfileField::DailyTime => return &["how much time", "hours", "minutes", "daily", "per day", "time"],
            ProfileField::SkillLevel => return &["skill level", "beginner", "intermediate", "advanced", "level", "experience"],
            ProfileField::LearningStyle => return &["learning style", "learn best", "visual", "auditory", "kinesthetic", "style"],
        }
    }

    /// Guesses which attribute an assistant question asks about. More specific
    /// attributes are tried first since generic words like "study" appear in
    /// almost every question.
    pub fn detect(question: &str) -> Option<ProfileField> {
        let lowered = question.to_lowercase();
        let priority = [
            ProfileField::LearningStyle,
            ProfileField::SkillLevel,
            ProfileField::DailyTime,
            ProfileField::Goals,
            ProfileField::Subject,
        ];

        return priority.into_iter().find(|field| {
            return field
                .keywords()
                .iter()
                .any(|keyword| return lowered.contains(keyword));
        });
    }
}

/// What the student told us about themselves during the chat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileData {
    fields: BTreeMap<ProfileField, String>,
    notes: Vec<String>,
}

impl ProfileData {
    /// Attributes every student answer to the question the assistant asked
    /// right before it. Answers to unrecognised questions become notes.
    pub fn from_transcript(transcript: &Transcript) -> ProfileData {
        let mut profile = ProfileData::default();
        let mut last_question: Option<&str> = None;

        for turn in transcript.visible_turns() {
            match turn.role {
                Role::Assistant => last_question = Some(turn.text.as_str()),
                Role::User => {
                    match last_question.and_then(ProfileField::detect) {
                        Some(field) => profile.record(field, &turn.text),
                        None => profile.note(&turn.text),
                    }
                    last_question = None;
                }
                Role::Instruction => {}
            }
        }

        return profile;
    }

    /// Follow up answers for the same attribute are kept alongside earlier ones.
    pub fn record(&mut self, field: ProfileField, answer: &str) {
        let answer = answer.trim();
        if answer.is_empty() {
            return;
        }

        self.fields
            .entry(field)
            .and_modify(|existing| {
                existing.push_str("; ");
                existing.push_str(answer);
            })
            .or_insert_with(|| return answer.to_string());
    }

    pub fn note(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.notes.push(text.to_string());
        }
    }

    pub fn get(&self, field: ProfileField) -> Option<&str> {
        return self.fields.get(&field).map(|e| return e.as_str());
    }

    pub fn notes(&self) -> &[String] {
        return &self.notes;
    }

    pub fn is_empty(&self) -> bool {
        return self.fields.is_empty() && self.notes.is_empty();
    }

    pub fn render(&self) -> String {
        if self.is_empty() {
            return "No profile details were collected.".to_string();
        }

        let mut lines = ProfileField::iter()
            .filter_map(|field| {
                return self
                    .get(field)
                    .map(|value| return format!("- {field}: {value}"));
            })
            .collect::<Vec<String>>();

        if !self.notes.is_empty() {
            lines.push("- Additional notes:".to_string());
            for note in self.notes.iter() {
                lines.push(format!("  - {note}"));
            }
        }

        return lines.join("\n");
    }
}
