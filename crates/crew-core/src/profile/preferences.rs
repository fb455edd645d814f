use std::fmt;

use super::ProfileUpdate;

/// The three preference lists collected during profile setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceCategory {
    Vibes,
    Scenes,
    Hobbies,
}

impl fmt::Display for PreferenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PreferenceCategory::Vibes => "vibe",
            PreferenceCategory::Scenes => "scene",
            PreferenceCategory::Hobbies => "hobby",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("select at least one {0}")]
    EmptySelection(PreferenceCategory),
}

/// Preference ids chosen on the summary screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferenceSelections {
    pub vibes: Vec<String>,
    pub scenes: Vec<String>,
    pub hobbies: Vec<String>,
}

impl PreferenceSelections {
    pub fn new(vibes: Vec<String>, scenes: Vec<String>, hobbies: Vec<String>) -> Self {
        Self {
            vibes,
            scenes,
            hobbies,
        }
    }

    /// Every category must carry at least one id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let lists = [
            (PreferenceCategory::Vibes, &self.vibes),
            (PreferenceCategory::Scenes, &self.scenes),
            (PreferenceCategory::Hobbies, &self.hobbies),
        ];
        for (category, ids) in lists {
            if ids.is_empty() {
                return Err(ValidationError::EmptySelection(category));
            }
        }
        Ok(())
    }

    /// The update that finalizes profile setup.
    pub fn into_completion_update(self) -> ProfileUpdate {
        ProfileUpdate {
            vibes: Some(self.vibes),
            scenes: Some(self.scenes),
            hobbies: Some(self.hobbies),
            profile_completed: Some(true),
            ..Default::default()
        }
    }
}
