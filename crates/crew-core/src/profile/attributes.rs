use serde::{Deserialize, Serialize};

/// Gender as collected on the basic-info step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Profile attributes as returned by the profile service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileAttributes {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<String>,
    pub school: Option<String>,
    pub occupation: Option<String>,
    pub culture: Option<String>,
    pub hometown: Option<String>,
    pub vibes: Vec<String>,
    pub scenes: Vec<String>,
    pub hobbies: Vec<String>,
    #[serde(rename = "termsAndConditionsAccepted")]
    pub terms_accepted: bool,
    pub profile_completed: bool,
}

impl ProfileAttributes {
    /// Overlay the fields present in `update`.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        fn set<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if let Some(value) = value {
                *slot = Some(value.clone());
            }
        }

        set(&mut self.gender, &update.gender);
        set(&mut self.date_of_birth, &update.date_of_birth);
        set(&mut self.school, &update.school);
        set(&mut self.culture, &update.culture);
        set(&mut self.hometown, &update.hometown);
        set(&mut self.avatar, &update.avatar);
        if let Some(vibes) = &update.vibes {
            self.vibes = vibes.clone();
        }
        if let Some(scenes) = &update.scenes {
            self.scenes = scenes.clone();
        }
        if let Some(hobbies) = &update.hobbies {
            self.hobbies = hobbies.clone();
        }
        if let Some(accepted) = update.terms_accepted {
            self.terms_accepted = accepted;
        }
        if let Some(completed) = update.profile_completed {
            self.profile_completed = completed;
        }
    }
}

/// Partial profile update. `None` fields are left untouched by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hometown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Vec<String>>,
    #[serde(
        rename = "termsAndConditionsAccepted",
        skip_serializing_if = "Option::is_none"
    )]
    pub terms_accepted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_completed: Option<bool>,
}
